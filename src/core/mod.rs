//! Core engine: extraction, aggregation and catalog synchronization.
//!
//! ## Module Structure
//!
//! - `data`: Messages and catalogs
//! - `extract`: Source scanner (call-sites → occurrences)
//! - `aggregate`: Occurrences → deduplicated, ordered message set
//! - `sync`: Fuzzy merge of the message set into locale catalogs
//! - `template`: POT rendering
//! - `parsers`: PO reader/writer
//! - `store`: Catalog persistence
//! - `context`: Project setup (config, source files, locales)

pub mod aggregate;
pub mod context;
pub mod data;
pub mod extract;
pub mod file_scanner;
pub mod parsers;
pub mod store;
pub mod sync;
pub mod template;

pub use context::ProjectContext;
pub use data::*;
