//! Core data types shared by every stage of the pipeline.
//!
//! ## Module Structure
//!
//! - `message`: Messages found in source code (Message, MessageKey, ExtractedMessage)
//! - `catalog`: Per-locale translation tables (Catalog, CatalogEntry, Headers)

pub mod catalog;
pub mod message;

pub use catalog::{
    Catalog, CatalogEntry, ContextEntries, DEFAULT_NPLURALS, DEFAULT_PLURAL_FORMS, EntryFlags,
    Headers, Translation, mandatory_headers,
};
pub use message::{ExtractedMessage, Message, MessageKey, Occurrence, SourceLocation};
