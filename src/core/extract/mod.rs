//! Extraction: turning raw source text into message occurrences.
//!
//! Scanning is a pure function per source unit, so units are scanned in
//! parallel and merged back in source-id order.

pub mod literal;
pub mod scanner;

use rayon::prelude::*;

pub use literal::{escape, unescape};
pub use scanner::{CallShape, Scanner};

use crate::core::Occurrence;

/// One piece of source text to scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    /// Logical source id used in references (e.g., "src/app.js").
    pub id: String,
    pub text: String,
}

impl SourceUnit {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Scan every unit and return all occurrences.
///
/// Output is ordered by source id, then by position within the unit, no
/// matter what order the units were given in.
pub fn scan_units(scanner: &Scanner, units: &[SourceUnit]) -> Vec<Occurrence> {
    let mut per_unit: Vec<(&str, Vec<Occurrence>)> = units
        .par_iter()
        .map(|unit| (unit.id.as_str(), scanner.scan(&unit.text, &unit.id)))
        .collect();
    per_unit.sort_by(|a, b| a.0.cmp(b.0));

    per_unit
        .into_iter()
        .flat_map(|(_, occurrences)| occurrences)
        .collect()
}
