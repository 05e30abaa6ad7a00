//! POT template rendering.
//!
//! A template is a catalog with every translation left empty. It's built as
//! a [`Catalog`] and written with the PO writer, so template and locale
//! catalogs share one serializer.

use crate::core::aggregate::collapse_by_entry;
use crate::core::parsers::write_po;
use crate::core::{
    Catalog, CatalogEntry, DEFAULT_NPLURALS, DEFAULT_PLURAL_FORMS, ExtractedMessage, Translation,
};

const TEMPLATE_HEADERS: &[(&str, &str)] = &[
    ("Project-Id-Version", "PACKAGE VERSION"),
    ("MIME-Version", "1.0"),
    ("Content-Type", "text/plain; charset=UTF-8"),
    ("Content-Transfer-Encoding", "8bit"),
    ("Plural-Forms", DEFAULT_PLURAL_FORMS),
];

/// Build the template catalog for `messages`.
///
/// Messages sharing `(context, msgid)` collapse into one record that keeps
/// the plural id, if any of them has one.
pub fn template_catalog(messages: &[ExtractedMessage]) -> Catalog {
    let mut catalog = Catalog::new();
    for (key, value) in TEMPLATE_HEADERS {
        catalog.headers.set(*key, *value);
    }

    for message in collapse_by_entry(messages) {
        let key = message.key;
        let slots = key.is_plural().then_some(DEFAULT_NPLURALS);
        let mut entry = CatalogEntry::new(
            key.context,
            key.msgid,
            key.plural_id,
            Translation::empty(slots),
        );
        entry.references = message.references;
        catalog.insert(entry);
    }

    catalog
}

/// Render the POT document for `messages`.
///
/// Output depends only on the message set: no timestamps, no environment.
pub fn render_template(messages: &[ExtractedMessage]) -> String {
    write_po(&template_catalog(messages))
}
