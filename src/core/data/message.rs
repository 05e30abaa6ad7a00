use std::fmt;

/// Position of a call-site in a source file.
///
/// The file path is the logical source id: relative to the source root and
/// always `/`-separated, so references are stable across platforms.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceLocation {
    /// Logical source id (e.g., "src/app.js").
    pub file_path: String,
    /// Line number (1-indexed).
    pub line: usize,
}

impl SourceLocation {
    pub fn new(file_path: impl Into<String>, line: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
        }
    }

    /// Reference string as written to catalogs: `file:line`.
    pub fn reference(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file_path, self.line)
    }
}

/// The four call shapes a translatable message can take.
///
/// Each variant carries exactly the fields its shape has, so callers narrow
/// with a `match` instead of probing optional fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Message {
    /// `gettext("msgid")`
    Plain { msgid: String },
    /// `pgettext("context", "msgid")`
    Contextual { context: String, msgid: String },
    /// `ngettext("msgid", "plural", n)`
    Plural { msgid: String, plural: String },
    /// `npgettext("context", "msgid", "plural", n)`
    ContextualPlural {
        context: String,
        msgid: String,
        plural: String,
    },
}

impl Message {
    pub fn msgid(&self) -> &str {
        match self {
            Message::Plain { msgid }
            | Message::Contextual { msgid, .. }
            | Message::Plural { msgid, .. }
            | Message::ContextualPlural { msgid, .. } => msgid,
        }
    }

    /// Identity of this message, independent of where it was found.
    pub fn key(&self) -> MessageKey {
        match self {
            Message::Plain { msgid } => MessageKey::new(None, msgid.clone(), None),
            Message::Contextual { context, msgid } => {
                MessageKey::new(Some(context.clone()), msgid.clone(), None)
            }
            Message::Plural { msgid, plural } => {
                MessageKey::new(None, msgid.clone(), Some(plural.clone()))
            }
            Message::ContextualPlural {
                context,
                msgid,
                plural,
            } => MessageKey::new(Some(context.clone()), msgid.clone(), Some(plural.clone())),
        }
    }
}

/// Message identity: `(context, msgid, plural_id)`.
///
/// An empty context or plural id is normalized to `None`, so
/// `pgettext("", "x")` and `gettext("x")` are the same message.
///
/// The derived ordering is the canonical output order: context (`None`
/// first), then msgid, then plural id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageKey {
    pub context: Option<String>,
    pub msgid: String,
    pub plural_id: Option<String>,
}

impl MessageKey {
    pub fn new(context: Option<String>, msgid: String, plural_id: Option<String>) -> Self {
        Self {
            context: context.filter(|c| !c.is_empty()),
            msgid,
            plural_id: plural_id.filter(|p| !p.is_empty()),
        }
    }

    /// Context bucket name; the empty string stands for "no context".
    pub fn context_str(&self) -> &str {
        self.context.as_deref().unwrap_or_default()
    }

    pub fn is_plural(&self) -> bool {
        self.plural_id.is_some()
    }

    /// Narrow the key back to its call shape.
    pub fn shape(&self) -> Message {
        let msgid = self.msgid.clone();
        match (self.context.clone(), self.plural_id.clone()) {
            (None, None) => Message::Plain { msgid },
            (Some(context), None) => Message::Contextual { context, msgid },
            (None, Some(plural)) => Message::Plural { msgid, plural },
            (Some(context), Some(plural)) => Message::ContextualPlural {
                context,
                msgid,
                plural,
            },
        }
    }
}

/// A single call-site found by the scanner, before deduplication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub message: Message,
    pub location: SourceLocation,
}

/// A deduplicated message with every place it is used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedMessage {
    pub key: MessageKey,
    /// `file:line` references, deduplicated and sorted.
    pub references: Vec<String>,
}
