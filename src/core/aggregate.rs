//! Message aggregation: occurrences → deduplicated, ordered message set.
//!
//! The output order (context, then msgid, then plural id) is what makes
//! templates and catalogs byte-stable regardless of file scan order.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::core::extract::{Scanner, SourceUnit, scan_units};
use crate::core::{ExtractedMessage, MessageKey, Occurrence};

/// Scan `units` and aggregate the result: the full extraction pipeline.
pub fn extract_messages(scanner: &Scanner, units: &[SourceUnit]) -> Vec<ExtractedMessage> {
    aggregate(scan_units(scanner, units))
}

/// Group occurrences by message key and merge their references.
///
/// References are deduplicated and sorted lexicographically.
pub fn aggregate(occurrences: impl IntoIterator<Item = Occurrence>) -> Vec<ExtractedMessage> {
    let mut grouped: BTreeMap<MessageKey, BTreeSet<String>> = BTreeMap::new();
    for occurrence in occurrences {
        grouped
            .entry(occurrence.message.key())
            .or_default()
            .insert(occurrence.location.reference());
    }

    grouped
        .into_iter()
        .map(|(key, references)| ExtractedMessage {
            key,
            references: references.into_iter().collect(),
        })
        .collect()
}

/// Collapse messages that share a catalog entry, i.e. the same
/// `(context, msgid)`.
///
/// A plural id wins over none (the first one in order if several differ) and
/// references are merged. Order of first appearance is kept.
pub fn collapse_by_entry(messages: &[ExtractedMessage]) -> Vec<ExtractedMessage> {
    let mut collapsed: Vec<ExtractedMessage> = Vec::with_capacity(messages.len());
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();

    for message in messages {
        let id = (message.key.context_str(), message.key.msgid.as_str());
        let Some(&i) = index.get(&id) else {
            index.insert(id, collapsed.len());
            collapsed.push(message.clone());
            continue;
        };

        let record = &mut collapsed[i];
        if record.key.plural_id.is_none() {
            record.key.plural_id = message.key.plural_id.clone();
        }
        record.references.extend(message.references.iter().cloned());
        record.references.sort();
        record.references.dedup();
    }

    collapsed
}
