//! Gettext PO catalog reader and writer.
//!
//! The reader accepts the subset of PO this tool writes plus what other
//! gettext tools commonly produce: multi-line strings, translator and
//! extracted comments, `#~` obsolete records and previous-msgid (`#|`) lines.
//! The writer emits one record per entry in `(context, msgid)` order with
//! single-line strings, so output is stable under version control.

use anyhow::{Result, anyhow, bail};

use crate::core::extract::{escape, unescape};
use crate::core::{Catalog, CatalogEntry, EntryFlags, Headers, Translation};

/// Which field a continuation string line appends to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Context,
    Msgid,
    PluralId,
    Msgstr,
    MsgstrPlural(usize),
}

/// A record being assembled line by line.
#[derive(Debug, Default)]
struct Record {
    comments: Vec<String>,
    references: Vec<String>,
    flags: EntryFlags,
    obsolete_marker: bool,
    context: Option<String>,
    msgid: Option<String>,
    plural_id: Option<String>,
    msgstr: Option<String>,
    msgstr_plural: Vec<String>,
    last_field: Option<Field>,
}

impl Record {
    fn has_keywords(&self) -> bool {
        self.context.is_some()
            || self.msgid.is_some()
            || self.plural_id.is_some()
            || self.msgstr.is_some()
            || !self.msgstr_plural.is_empty()
    }

    fn field_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Context => self.context.as_mut(),
            Field::Msgid => self.msgid.as_mut(),
            Field::PluralId => self.plural_id.as_mut(),
            Field::Msgstr => self.msgstr.as_mut(),
            Field::MsgstrPlural(i) => self.msgstr_plural.get_mut(i),
        }
    }
}

struct Parser {
    catalog: Catalog,
    record: Record,
    seen_header: bool,
}

/// Parse PO text into a catalog.
///
/// Errors name the offending line (1-based).
pub fn parse_po(content: &str) -> Result<Catalog> {
    let mut parser = Parser {
        catalog: Catalog::new(),
        record: Record::default(),
        seen_header: false,
    };

    let mut line_no = 0;
    for (i, raw_line) in content.lines().enumerate() {
        line_no = i + 1;
        parser
            .line(raw_line.trim())
            .map_err(|e| anyhow!("line {}: {}", line_no, e))?;
    }
    parser
        .finish_record()
        .map_err(|e| anyhow!("line {}: {}", line_no, e))?;

    Ok(parser.catalog)
}

impl Parser {
    fn line(&mut self, line: &str) -> Result<()> {
        if line.is_empty() {
            return self.finish_record();
        }

        if let Some(rest) = line.strip_prefix("#~") {
            if rest.starts_with('|') {
                return Ok(());
            }
            let rest = rest.trim_start();
            if rest.is_empty() {
                return Ok(());
            }
            if !self.record.obsolete_marker && self.record.msgid.is_some() {
                self.finish_record()?;
            }
            self.keyword_or_continuation(rest)?;
            self.record.obsolete_marker = true;
            return Ok(());
        }

        if let Some(comment) = line.strip_prefix('#') {
            // A comment after a complete record starts the next one.
            if self.record.msgid.is_some() {
                self.finish_record()?;
            }
            return self.comment(comment);
        }

        self.keyword_or_continuation(line)
    }

    fn comment(&mut self, comment: &str) -> Result<()> {
        if let Some(refs) = comment.strip_prefix(':') {
            self.record.references.extend(split_references(refs));
        } else if let Some(flags) = comment.strip_prefix(',') {
            self.record.flags.extend_from(flags);
        } else if comment.starts_with('.') || comment.starts_with('|') {
            // Extracted comments and previous msgids are regenerated by tools.
        } else {
            let text = comment.strip_prefix(' ').unwrap_or(comment);
            self.record.comments.push(text.to_string());
        }
        Ok(())
    }

    fn keyword_or_continuation(&mut self, line: &str) -> Result<()> {
        if line.starts_with('"') {
            let text = parse_quoted(line)?;
            let field = self
                .record
                .last_field
                .ok_or_else(|| anyhow!("string continuation without a preceding keyword"))?;
            if let Some(value) = self.record.field_mut(field) {
                value.push_str(&text);
            }
            return Ok(());
        }

        let (keyword, rest) = line
            .split_once(|c: char| c.is_whitespace())
            .ok_or_else(|| anyhow!("expected a keyword followed by a string: {}", line))?;
        let value = parse_quoted(rest)?;

        match keyword {
            "msgctxt" => {
                if self.record.msgid.is_some() {
                    self.finish_record()?;
                }
                self.record.context = Some(value);
                self.record.last_field = Some(Field::Context);
            }
            "msgid" => {
                if self.record.msgid.is_some() {
                    self.finish_record()?;
                }
                self.record.msgid = Some(value);
                self.record.last_field = Some(Field::Msgid);
            }
            "msgid_plural" => {
                self.require_msgid(keyword)?;
                self.record.plural_id = Some(value);
                self.record.last_field = Some(Field::PluralId);
            }
            "msgstr" => {
                self.require_msgid(keyword)?;
                if self.record.msgstr.is_some() || !self.record.msgstr_plural.is_empty() {
                    bail!("duplicate msgstr");
                }
                self.record.msgstr = Some(value);
                self.record.last_field = Some(Field::Msgstr);
            }
            _ => {
                let index = plural_index(keyword)
                    .ok_or_else(|| anyhow!("unknown keyword: {}", keyword))?;
                self.require_msgid(keyword)?;
                if self.record.msgstr.is_some() {
                    bail!("{} mixed with msgstr", keyword);
                }
                if index != self.record.msgstr_plural.len() {
                    bail!(
                        "expected msgstr[{}], found {}",
                        self.record.msgstr_plural.len(),
                        keyword
                    );
                }
                self.record.msgstr_plural.push(value);
                self.record.last_field = Some(Field::MsgstrPlural(index));
            }
        }
        Ok(())
    }

    fn require_msgid(&self, keyword: &str) -> Result<()> {
        if self.record.msgid.is_none() {
            bail!("{} before msgid", keyword);
        }
        Ok(())
    }

    fn finish_record(&mut self) -> Result<()> {
        let mut record = std::mem::take(&mut self.record);

        let Some(msgid) = record.msgid.take() else {
            if record.has_keywords() {
                bail!("record without msgid");
            }
            // A stray comment block; nothing to keep.
            return Ok(());
        };

        let text = match (record.msgstr, record.msgstr_plural.is_empty()) {
            (Some(text), true) => Translation::Single(text),
            (None, false) => Translation::Plural(record.msgstr_plural),
            (None, true) => bail!("missing msgstr for msgid \"{}\"", escape(&msgid)),
            (Some(_), false) => bail!("msgstr mixed with msgstr[N]"),
        };

        if msgid.is_empty() && record.context.is_none() {
            if self.seen_header {
                bail!("duplicate header record");
            }
            self.seen_header = true;
            if let Translation::Single(value) = &text {
                self.catalog.headers = Headers::parse(value);
            }
            self.catalog.comments = record.comments;
            return Ok(());
        }

        let mut entry = CatalogEntry::new(record.context, msgid, record.plural_id, text);
        entry.flags = record.flags;
        if record.obsolete_marker {
            entry.flags.obsolete = true;
        }
        entry.references = record.references;
        entry.comments = record.comments;

        if self.catalog.contains(entry.context_str(), &entry.msgid) {
            bail!(
                "duplicate entry for msgid \"{}\"{}",
                escape(&entry.msgid),
                entry
                    .context
                    .as_ref()
                    .map(|c| format!(" in context \"{}\"", escape(c)))
                    .unwrap_or_default()
            );
        }
        self.catalog.insert(entry);
        Ok(())
    }
}

/// `msgstr[3]` → `Some(3)`.
fn plural_index(keyword: &str) -> Option<usize> {
    keyword
        .strip_prefix("msgstr[")?
        .strip_suffix(']')?
        .parse()
        .ok()
}

/// Decode a complete `"..."` PO string.
fn parse_quoted(text: &str) -> Result<String> {
    let text = text.trim();
    let inner = text
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .filter(|_| text.len() >= 2)
        .ok_or_else(|| anyhow!("expected a quoted string: {}", text))?;

    let mut escaped = false;
    for c in inner.chars() {
        match (escaped, c) {
            (true, _) => escaped = false,
            (false, '\\') => escaped = true,
            (false, '"') => bail!("unescaped quote in string: {}", text),
            (false, _) => {}
        }
    }
    if escaped {
        bail!("unterminated string: {}", text);
    }

    Ok(unescape(inner))
}

/// Serialize a catalog to PO text.
pub fn write_po(catalog: &Catalog) -> String {
    let mut records: Vec<String> = Vec::new();

    if !catalog.headers.is_empty() || !catalog.comments.is_empty() {
        let mut out = String::new();
        push_comments(&mut out, &catalog.comments);
        out.push_str("msgid \"\"\nmsgstr \"\"\n");
        for (key, value) in catalog.headers.iter() {
            out.push_str(&format!("\"{}\"\n", escape(&format!("{}: {}\n", key, value))));
        }
        records.push(out);
    }

    for entry in catalog.iter() {
        records.push(write_entry(entry));
    }

    records.join("\n")
}

fn write_entry(entry: &CatalogEntry) -> String {
    let mut out = String::new();
    push_comments(&mut out, &entry.comments);
    if !entry.references.is_empty() {
        let references: Vec<String> = entry
            .references
            .iter()
            .map(|r| format_reference(r))
            .collect();
        out.push_str(&format!("#: {}\n", references.join(" ")));
    }
    if !entry.flags.is_empty() {
        out.push_str(&format!("#, {}\n", entry.flags.to_list().join(", ")));
    }
    if let Some(context) = &entry.context {
        push_field(&mut out, "msgctxt", context);
    }
    push_field(&mut out, "msgid", &entry.msgid);
    if let Some(plural_id) = &entry.plural_id {
        push_field(&mut out, "msgid_plural", plural_id);
    }
    match &entry.text {
        Translation::Single(text) => push_field(&mut out, "msgstr", text),
        Translation::Plural(forms) if forms.is_empty() => push_field(&mut out, "msgstr[0]", ""),
        Translation::Plural(forms) => {
            for (i, form) in forms.iter().enumerate() {
                push_field(&mut out, &format!("msgstr[{}]", i), form);
            }
        }
    }
    out
}

/// First-strong-isolate and pop-directional-isolate: GNU gettext wraps file
/// names containing whitespace in these on `#:` lines.
const ISOLATE_START: char = '\u{2068}';
const ISOLATE_END: char = '\u{2069}';

fn format_reference(reference: &str) -> String {
    if !reference.contains(char::is_whitespace) {
        return reference.to_string();
    }
    match reference.rsplit_once(':') {
        Some((path, line)) if !line.is_empty() && line.bytes().all(|b| b.is_ascii_digit()) => {
            format!("{ISOLATE_START}{path}{ISOLATE_END}:{line}")
        }
        _ => format!("{ISOLATE_START}{reference}{ISOLATE_END}"),
    }
}

/// Split a `#:` line into references. Whitespace inside isolates is part of
/// the file name.
fn split_references(line: &str) -> Vec<String> {
    let mut references = Vec::new();
    let mut current = String::new();
    let mut isolated = false;

    for c in line.chars() {
        match c {
            ISOLATE_START => isolated = true,
            ISOLATE_END => isolated = false,
            c if c.is_whitespace() && !isolated => {
                if !current.is_empty() {
                    references.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        references.push(current);
    }
    references
}

fn push_comments(out: &mut String, comments: &[String]) {
    for comment in comments {
        if comment.is_empty() {
            out.push_str("#\n");
        } else {
            out.push_str(&format!("# {}\n", comment));
        }
    }
}

fn push_field(out: &mut String, keyword: &str, value: &str) {
    out.push_str(&format!("{} \"{}\"\n", keyword, escape(value)));
}
