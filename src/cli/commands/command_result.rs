use std::path::PathBuf;

use crate::core::sync::SyncReport;

#[derive(Debug)]
pub enum CommandSummary {
    Extract(ExtractSummary),
    Sync(SyncSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct ExtractSummary {
    pub message_count: usize,
    pub reference_count: usize,
    /// Where the template was written; `None` with `--stdout`.
    pub output: Option<PathBuf>,
    /// The rendered template, kept for `--stdout`.
    pub template: String,
}

#[derive(Debug)]
pub struct SyncSummary {
    pub report: SyncReport,
    pub dry_run: bool,
}

#[derive(Debug)]
pub struct InitSummary {
    pub path: PathBuf,
}

/// Result of running msgsync commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    /// Failed units of work (locales for `sync`).
    pub error_count: usize,
    /// Number of source files that were scanned.
    pub source_files_checked: usize,
    /// Source files that could not be read.
    pub unreadable_count: usize,
}
