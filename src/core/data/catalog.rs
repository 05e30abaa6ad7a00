use std::collections::BTreeMap;

/// Plural rule used when a catalog doesn't declare one.
pub const DEFAULT_PLURAL_FORMS: &str = "nplurals=2; plural=(n != 1);";

/// Number of plural forms implied by [`DEFAULT_PLURAL_FORMS`].
pub const DEFAULT_NPLURALS: usize = 2;

/// Translated content of a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
    /// `msgstr "..."`
    Single(String),
    /// `msgstr[N] "..."`, one slot per plural form.
    Plural(Vec<String>),
}

impl Translation {
    /// An untranslated value with the given number of slots.
    ///
    /// `None` means a singular entry.
    pub fn empty(plural_slots: Option<usize>) -> Self {
        match plural_slots {
            None => Translation::Single(String::new()),
            Some(n) => Translation::Plural(vec![String::new(); n.max(1)]),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Translation::Single(text) => text.is_empty(),
            Translation::Plural(forms) => forms.iter().all(String::is_empty),
        }
    }
}

/// Flags written on the `#,` comment line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFlags {
    pub fuzzy: bool,
    pub obsolete: bool,
    /// Flags this tool doesn't interpret (e.g. `c-format`), kept as-is.
    pub other: Vec<String>,
}

impl EntryFlags {
    /// Parse a comma-separated flag list.
    pub fn parse(line: &str) -> Self {
        let mut flags = EntryFlags::default();
        flags.extend_from(line);
        flags
    }

    /// Merge another comma-separated flag list into these flags.
    pub fn extend_from(&mut self, line: &str) {
        for flag in line.split(',').map(str::trim).filter(|f| !f.is_empty()) {
            match flag {
                "fuzzy" => self.fuzzy = true,
                "obsolete" => self.obsolete = true,
                other => {
                    if !self.other.iter().any(|f| f == other) {
                        self.other.push(other.to_string());
                    }
                }
            }
        }
    }

    /// Flags in write order: uninterpreted flags first, then `fuzzy`, `obsolete`.
    pub fn to_list(&self) -> Vec<&str> {
        let mut list: Vec<&str> = self.other.iter().map(String::as_str).collect();
        if self.fuzzy {
            list.push("fuzzy");
        }
        if self.obsolete {
            list.push("obsolete");
        }
        list
    }

    pub fn is_empty(&self) -> bool {
        !self.fuzzy && !self.obsolete && self.other.is_empty()
    }
}

/// One translation record of a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub msgid: String,
    pub context: Option<String>,
    pub plural_id: Option<String>,
    pub text: Translation,
    pub flags: EntryFlags,
    /// `file:line` references from the `#:` comment.
    pub references: Vec<String>,
    /// Translator comments (`# ...`), without the leading marker.
    pub comments: Vec<String>,
}

impl CatalogEntry {
    pub fn new(
        context: Option<String>,
        msgid: impl Into<String>,
        plural_id: Option<String>,
        text: Translation,
    ) -> Self {
        Self {
            msgid: msgid.into(),
            context: context.filter(|c| !c.is_empty()),
            plural_id,
            text,
            flags: EntryFlags::default(),
            references: Vec::new(),
            comments: Vec::new(),
        }
    }

    pub fn context_str(&self) -> &str {
        self.context.as_deref().unwrap_or_default()
    }
}

/// Ordered `Key: value` header fields of a catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    fields: Vec<(String, String)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the header record's value (newline-separated `Key: value` lines).
    ///
    /// Lines without a colon are ignored.
    pub fn parse(text: &str) -> Self {
        let mut headers = Headers::new();
        for line in text.lines() {
            if let Some((key, value)) = line.split_once(':') {
                let key = key.trim();
                if !key.is_empty() {
                    headers.set(key, value.trim());
                }
            }
        }
        headers
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Set a header, replacing an existing value in place.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self
            .fields
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(&key))
        {
            Some(field) => field.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Add a header only if it's missing. Returns true if it was added.
    pub fn set_if_missing(&mut self, key: &str, value: impl Into<String>) -> bool {
        if self.contains(key) {
            return false;
        }
        self.fields.push((key.to_string(), value.into()));
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Headers every catalog must carry, in the order they're added.
pub fn mandatory_headers(locale: &str) -> Vec<(&'static str, String)> {
    vec![
        ("Project-Id-Version", "PACKAGE VERSION".to_string()),
        ("Language", locale.to_string()),
        ("MIME-Version", "1.0".to_string()),
        ("Content-Type", "text/plain; charset=UTF-8".to_string()),
        ("Content-Transfer-Encoding", "8bit".to_string()),
        ("Plural-Forms", DEFAULT_PLURAL_FORMS.to_string()),
    ]
}

/// Entries of one context bucket, keyed by msgid.
pub type ContextEntries = BTreeMap<String, CatalogEntry>;

/// A locale's complete translation table.
///
/// Entries live in a two-level map: context (empty string for none) →
/// msgid → entry. Both levels are ordered, so iteration is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub headers: Headers,
    /// Translator comments attached to the header record.
    pub comments: Vec<String>,
    pub entries: BTreeMap<String, ContextEntries>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh catalog seeded with the default headers for `locale`.
    pub fn for_locale(locale: &str) -> Self {
        let mut catalog = Catalog::new();
        for (key, value) in mandatory_headers(locale) {
            catalog.headers.set(key, value);
        }
        catalog
    }

    pub fn get(&self, context: &str, msgid: &str) -> Option<&CatalogEntry> {
        self.entries.get(context)?.get(msgid)
    }

    pub fn get_mut(&mut self, context: &str, msgid: &str) -> Option<&mut CatalogEntry> {
        self.entries.get_mut(context)?.get_mut(msgid)
    }

    pub fn contains(&self, context: &str, msgid: &str) -> bool {
        self.get(context, msgid).is_some()
    }

    /// Insert an entry, returning the one it replaced (if any).
    pub fn insert(&mut self, entry: CatalogEntry) -> Option<CatalogEntry> {
        self.entries
            .entry(entry.context_str().to_string())
            .or_default()
            .insert(entry.msgid.clone(), entry)
    }

    /// All entries of one context bucket, in msgid order.
    pub fn bucket(&self, context: &str) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.get(context).into_iter().flat_map(|b| b.values())
    }

    /// All entries, ordered by context then msgid.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values().flat_map(|bucket| bucket.values())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut CatalogEntry> {
        self.entries
            .values_mut()
            .flat_map(|bucket| bucket.values_mut())
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(|bucket| bucket.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of plural forms declared by the `Plural-Forms` header.
    ///
    /// Falls back to [`DEFAULT_NPLURALS`] when the header is missing or
    /// unparsable.
    pub fn nplurals(&self) -> usize {
        self.headers
            .get("Plural-Forms")
            .and_then(parse_nplurals)
            .unwrap_or(DEFAULT_NPLURALS)
    }
}

fn parse_nplurals(rule: &str) -> Option<usize> {
    rule.split(';').find_map(|part| {
        let (key, value) = part.split_once('=')?;
        if key.trim() == "nplurals" {
            value.trim().parse::<usize>().ok().filter(|n| *n > 0)
        } else {
            None
        }
    })
}
