//! Source scanner: finds translatable call-sites in raw source text.
//!
//! The scanner is language-agnostic. It looks for `name(` where `name` is one
//! of the configured message functions, then reads the argument list with a
//! small cursor that understands string literals, comments and bracket
//! nesting. Arguments that are string literals (or `+`-concatenations of
//! literals) are decoded; everything else is an opaque expression.

use std::collections::HashMap;

use anyhow::{Result, bail};
use regex::Regex;

use super::literal::unescape;
use crate::config::FunctionNames;
use crate::core::{Message, Occurrence, SourceLocation};

/// Call shapes in priority order.
///
/// When a function name is configured for several shapes, the first shape
/// (in this order) whose literal arguments are present wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CallShape {
    ContextualPlural,
    Plural,
    Contextual,
    Plain,
}

/// A parsed call argument.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Argument {
    /// A static string literal, already decoded.
    Literal(String),
    /// Anything else: identifiers, numbers, interpolated templates, ...
    Expression,
}

/// A compiled scanner for a set of message function names.
///
/// Immutable after construction; `scan` keeps all iteration state local, so
/// one scanner can be shared across threads.
#[derive(Debug, Clone)]
pub struct Scanner {
    pattern: Regex,
    shapes: HashMap<String, Vec<CallShape>>,
}

impl Scanner {
    pub fn new(functions: &FunctionNames) -> Result<Self> {
        let mut shapes: HashMap<String, Vec<CallShape>> = HashMap::new();
        let groups = [
            (CallShape::ContextualPlural, &functions.contextual_plural),
            (CallShape::Plural, &functions.plural),
            (CallShape::Contextual, &functions.contextual),
            (CallShape::Plain, &functions.plain),
        ];
        for (shape, names) in groups {
            for name in names {
                let entry = shapes.entry(name.clone()).or_default();
                if !entry.contains(&shape) {
                    entry.push(shape);
                }
            }
        }
        for list in shapes.values_mut() {
            list.sort();
        }

        if shapes.is_empty() {
            bail!("No message functions configured");
        }

        // Longest names first so `_n` is preferred over `_` at the same position.
        let mut names: Vec<&String> = shapes.keys().collect();
        names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        let alternation = names
            .iter()
            .map(|n| regex::escape(n))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(r"({})\s*\(", alternation))?;

        Ok(Self { pattern, shapes })
    }

    /// Scan `source` and return every message call-site in text order.
    ///
    /// `file_path` is the logical source id used in references.
    pub fn scan(&self, source: &str, file_path: &str) -> Vec<Occurrence> {
        let mut occurrences = Vec::new();
        let mut search_from = 0;
        let mut line = 1;
        let mut line_counted_to = 0;

        while let Some(caps) = self.pattern.captures_at(source, search_from) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                break;
            };

            if is_preceded_by_identifier(source, name.start()) {
                let first = name.as_str().chars().next().map_or(1, char::len_utf8);
                search_from = name.start() + first;
                continue;
            }
            // Resume right after `(` so calls nested in arguments are found too.
            search_from = whole.end();

            let mut cursor = Cursor::new(source, whole.end());
            let args = cursor.arguments();

            let Some(message) = self.classify(name.as_str(), &args) else {
                continue;
            };

            line += count_newlines(&source[line_counted_to..name.start()]);
            line_counted_to = name.start();

            occurrences.push(Occurrence {
                message,
                location: SourceLocation::new(file_path, line),
            });
        }

        occurrences
    }

    fn classify(&self, name: &str, args: &[Argument]) -> Option<Message> {
        use Argument::Literal;

        let shapes = self.shapes.get(name)?;
        let message = shapes.iter().find_map(|shape| match (shape, args) {
            (CallShape::ContextualPlural, [Literal(ctx), Literal(msgid), Literal(plural), ..]) => {
                Some(Message::ContextualPlural {
                    context: ctx.clone(),
                    msgid: msgid.clone(),
                    plural: plural.clone(),
                })
            }
            (CallShape::Plural, [Literal(msgid), Literal(plural), ..]) => Some(Message::Plural {
                msgid: msgid.clone(),
                plural: plural.clone(),
            }),
            (CallShape::Contextual, [Literal(context), Literal(msgid), ..]) => {
                Some(Message::Contextual {
                    context: context.clone(),
                    msgid: msgid.clone(),
                })
            }
            (CallShape::Plain, [Literal(msgid), ..]) => Some(Message::Plain {
                msgid: msgid.clone(),
            }),
            _ => None,
        })?;

        // The empty msgid is reserved for the catalog header.
        if message.msgid().is_empty() {
            return None;
        }
        Some(message)
    }
}

fn is_preceded_by_identifier(source: &str, offset: usize) -> bool {
    source[..offset]
        .chars()
        .next_back()
        .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn count_newlines(text: &str) -> usize {
    text.bytes().filter(|b| *b == b'\n').count()
}

/// Byte cursor over source text for reading an argument list.
struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str, pos: usize) -> Self {
        Self { src, pos }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Skip whitespace and `//` / `/* */` comments.
    fn skip_trivia(&mut self) {
        loop {
            let rest = self.rest();
            if rest.starts_with("//") {
                self.pos += rest.find('\n').unwrap_or(rest.len());
            } else if rest.starts_with("/*") {
                self.pos += rest[2..].find("*/").map_or(rest.len(), |end| end + 4);
            } else if self.peek().is_some_and(char::is_whitespace) {
                self.bump();
            } else {
                break;
            }
        }
    }

    /// Read arguments up to and including the closing `)`.
    fn arguments(&mut self) -> Vec<Argument> {
        let mut args = Vec::new();
        loop {
            self.skip_trivia();
            match self.peek() {
                None => break,
                Some(')') => {
                    self.bump();
                    break;
                }
                Some(_) => {}
            }

            args.push(self.argument());

            self.skip_trivia();
            match self.bump() {
                Some(',') => continue,
                _ => break,
            }
        }
        args
    }

    /// Read one argument, stopping before the `,` or `)` that ends it.
    fn argument(&mut self) -> Argument {
        if let Some(text) = self.concatenated_literal() {
            self.skip_trivia();
            if matches!(self.peek(), None | Some(',') | Some(')')) {
                return Argument::Literal(text);
            }
        }
        self.skip_expression();
        Argument::Expression
    }

    /// `"a"` or `"a" + 'b' + `c``; None if any part isn't a static literal.
    fn concatenated_literal(&mut self) -> Option<String> {
        let mut text = String::new();
        loop {
            if !matches!(self.peek(), Some('"' | '\'' | '`')) {
                return None;
            }
            text.push_str(&unescape(&self.quoted()?));

            let before = self.pos;
            self.skip_trivia();
            if self.peek() == Some('+') {
                self.bump();
                self.skip_trivia();
            } else {
                self.pos = before;
                return Some(text);
            }
        }
    }

    /// Consume a quoted literal and return its raw body.
    ///
    /// Returns None for unterminated literals and for template literals with
    /// `${...}` interpolation; the cursor still moves past what it read.
    fn quoted(&mut self) -> Option<String> {
        let quote = self.bump()?;
        let start = self.pos;
        let mut is_static = true;

        loop {
            match self.peek() {
                None => return None,
                Some('\\') => {
                    self.bump();
                    self.bump();
                }
                Some(c) if c == quote => {
                    let raw = &self.src[start..self.pos];
                    self.bump();
                    return is_static.then(|| raw.to_string());
                }
                Some('\n') if quote != '`' => return None,
                Some('$') if quote == '`' && self.rest().starts_with("${") => {
                    is_static = false;
                    self.pos += 2;
                    self.skip_until_close_brace();
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
    }

    /// Skip an expression up to a `,` or unbalanced closer at depth 0.
    fn skip_expression(&mut self) {
        let mut depth = 0usize;
        while let Some(c) = self.peek() {
            match c {
                '(' | '[' | '{' => {
                    depth += 1;
                    self.bump();
                }
                ')' | ']' | '}' => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                    self.bump();
                }
                ',' if depth == 0 => break,
                '"' | '\'' | '`' => {
                    self.quoted();
                }
                '/' if self.rest().starts_with("//") || self.rest().starts_with("/*") => {
                    self.skip_trivia();
                }
                _ => {
                    self.bump();
                }
            }
        }
    }

    /// Skip a `${...}` body, consuming the matching `}`.
    fn skip_until_close_brace(&mut self) {
        let mut depth = 0usize;
        while let Some(c) = self.peek() {
            match c {
                '{' => depth += 1,
                '}' if depth == 0 => {
                    self.bump();
                    return;
                }
                '}' => depth -= 1,
                '"' | '\'' | '`' => {
                    self.quoted();
                    continue;
                }
                _ => {}
            }
            self.bump();
        }
    }
}
