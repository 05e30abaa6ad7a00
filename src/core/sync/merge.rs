//! Merging an aggregated message set into one locale's catalog.
//!
//! This is the in-memory half of synchronization: no I/O happens here.
//! Each aggregated message is resolved in order by exact match, then fuzzy
//! match, then creation; afterwards unvisited entries are flagged obsolete
//! and missing headers are filled in.

use std::collections::{HashMap, HashSet};

use super::similarity::similarity;
use crate::core::aggregate::collapse_by_entry;
use crate::core::{
    Catalog, CatalogEntry, ExtractedMessage, Message, MessageKey, Translation, mandatory_headers,
};

/// Default minimum similarity for a fuzzy match.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.6;

/// Fuzzy matching settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyMatching {
    pub enabled: bool,
    /// Minimum similarity (inclusive), in `[0, 1]`.
    pub threshold: f64,
}

impl Default for FuzzyMatching {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: DEFAULT_FUZZY_THRESHOLD,
        }
    }
}

impl FuzzyMatching {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

/// How to merge into one locale's catalog.
#[derive(Debug, Clone)]
pub struct MergePolicy<'a> {
    pub locale: &'a str,
    /// The source locale: new entries are pre-filled with their msgid.
    pub is_default_locale: bool,
    pub fuzzy: FuzzyMatching,
}

/// What a merge did to a catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// New entries, including fuzzy ones.
    pub created: usize,
    /// Pre-existing entries changed by an exact match.
    pub updated: usize,
    /// New entries whose text was copied from a similar msgid.
    pub fuzzy: usize,
    /// Entries newly flagged obsolete.
    pub obsoleted: usize,
    /// Mandatory headers that had to be added.
    pub headers_added: usize,
}

impl MergeStats {
    /// True if the catalog was mutated in any way.
    pub fn changed(&self) -> bool {
        self.created + self.updated + self.obsoleted + self.headers_added > 0
    }
}

/// Set of `(context, msgid)` pairs.
#[derive(Debug, Default)]
struct EntryIds(HashMap<String, HashSet<String>>);

impl EntryIds {
    fn of(catalog: &Catalog) -> Self {
        let mut ids = EntryIds::default();
        for entry in catalog.iter() {
            ids.insert(entry.context_str(), &entry.msgid);
        }
        ids
    }

    /// Returns true if the pair wasn't present yet.
    fn insert(&mut self, context: &str, msgid: &str) -> bool {
        self.0
            .entry(context.to_string())
            .or_default()
            .insert(msgid.to_string())
    }

    fn contains(&self, context: &str, msgid: &str) -> bool {
        self.0.get(context).is_some_and(|ids| ids.contains(msgid))
    }
}

/// Merge `messages` (in aggregator order) into `catalog`.
///
/// Messages sharing `(context, msgid)` are one catalog entry and are
/// resolved together (see [`collapse_by_entry`]).
pub fn merge_catalog(
    catalog: &mut Catalog,
    messages: &[ExtractedMessage],
    policy: &MergePolicy<'_>,
) -> MergeStats {
    let mut stats = MergeStats::default();
    let preexisting = EntryIds::of(catalog);
    let mut visited = EntryIds::default();
    let nplurals = catalog.nplurals();

    for message in collapse_by_entry(messages) {
        let key = &message.key;
        let context = key.context_str();
        visited.insert(context, &key.msgid);

        if let Some(entry) = catalog.get_mut(context, &key.msgid) {
            if apply_exact_match(entry, &message) && preexisting.contains(context, &key.msgid) {
                stats.updated += 1;
            }
            continue;
        }

        let fuzzy_text = if policy.fuzzy.enabled {
            find_fuzzy_match(catalog, context, &key.msgid, policy.fuzzy.threshold)
                .map(|candidate| candidate.text.clone())
        } else {
            None
        };

        let mut entry = match fuzzy_text {
            Some(text) => {
                stats.fuzzy += 1;
                let mut entry = new_entry(key, text);
                entry.flags.fuzzy = true;
                entry
            }
            None => new_entry(key, fresh_translation(key, nplurals, policy.is_default_locale)),
        };
        entry.references = message.references.clone();
        catalog.insert(entry);
        stats.created += 1;
    }

    for entry in catalog.iter_mut() {
        if !visited.contains(entry.context_str(), &entry.msgid) && !entry.flags.obsolete {
            entry.flags.obsolete = true;
            stats.obsoleted += 1;
        }
    }

    for (key, value) in mandatory_headers(policy.locale) {
        if catalog.headers.set_if_missing(key, value) {
            stats.headers_added += 1;
        }
    }

    stats
}

/// Refresh an entry that matches a message exactly. Returns true if mutated.
///
/// Text is never touched.
fn apply_exact_match(entry: &mut CatalogEntry, message: &ExtractedMessage) -> bool {
    let mut changed = false;

    if entry.references != message.references {
        entry.references = message.references.clone();
        changed = true;
    }
    if entry.flags.fuzzy {
        entry.flags.fuzzy = false;
        changed = true;
    }
    if entry.flags.obsolete {
        entry.flags.obsolete = false;
        changed = true;
    }
    if entry.plural_id != message.key.plural_id {
        entry.plural_id = message.key.plural_id.clone();
        changed = true;
    }

    changed
}

/// Best same-context candidate scoring at least `threshold`.
///
/// Entries flagged fuzzy or obsolete never qualify; entries created earlier
/// in this merge do. Ties keep the first candidate in msgid order.
fn find_fuzzy_match<'c>(
    catalog: &'c Catalog,
    context: &str,
    msgid: &str,
    threshold: f64,
) -> Option<&'c CatalogEntry> {
    let mut best: Option<(&CatalogEntry, f64)> = None;

    for candidate in catalog.bucket(context) {
        if candidate.flags.fuzzy || candidate.flags.obsolete {
            continue;
        }
        let score = similarity(msgid, &candidate.msgid);
        if score >= threshold && best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((candidate, score));
        }
    }

    best.map(|(candidate, _)| candidate)
}

fn new_entry(key: &MessageKey, text: Translation) -> CatalogEntry {
    CatalogEntry::new(
        key.context.clone(),
        key.msgid.clone(),
        key.plural_id.clone(),
        text,
    )
}

/// Text for a brand-new entry.
///
/// Plural entries get one slot per plural form. For the default locale the
/// msgid fills slot 0 and the plural id every other slot.
fn fresh_translation(key: &MessageKey, nplurals: usize, prefill: bool) -> Translation {
    match key.shape() {
        Message::Plain { msgid } | Message::Contextual { msgid, .. } => {
            if prefill {
                Translation::Single(msgid)
            } else {
                Translation::empty(None)
            }
        }
        Message::Plural { msgid, plural } | Message::ContextualPlural { msgid, plural, .. } => {
            if !prefill {
                return Translation::empty(Some(nplurals));
            }
            Translation::Plural(
                (0..nplurals.max(1))
                    .map(|i| if i == 0 { msgid.clone() } else { plural.clone() })
                    .collect(),
            )
        }
    }
}
