//! msgsync - gettext message extraction and catalog synchronization
//!
//! msgsync scans source files for gettext-style calls (`gettext`, `pgettext`,
//! `ngettext`, `npgettext`), writes a POT template and keeps each locale's PO
//! catalog in step with the source: new messages are added, vanished ones are
//! marked obsolete and renamed ones inherit a fuzzy translation.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Extraction, aggregation and synchronization engine

pub mod cli;
pub mod config;
pub mod core;
