//! Catalog file parsers.
//!
//! - `po`: gettext PO reader and writer used by the catalog store

pub mod po;

pub use po::{parse_po, write_po};
