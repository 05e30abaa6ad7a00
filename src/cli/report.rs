//! Report formatting and printing utilities.
//!
//! Separate from core logic so the engine can be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{CommandResult, CommandSummary, ExtractSummary, InitSummary, SyncSummary};
use crate::core::sync::{LocaleReport, LocaleStats};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

const COLUMNS: [&str; 6] = ["created", "updated", "fuzzy", "obsolete", "total", "status"];

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}

pub fn print(result: &CommandResult, verbose: bool) {
    let mut stdout = io::stdout().lock();
    match &result.summary {
        CommandSummary::Extract(summary) => {
            print_extract_to(summary, result.source_files_checked, &mut stdout)
        }
        CommandSummary::Sync(summary) => print_sync_to(summary, verbose, &mut stdout),
        CommandSummary::Init(summary) => print_init_to(summary, &mut stdout),
    }

    print_unreadable_warning_to(result.unreadable_count, verbose, &mut io::stderr().lock());
}

/// Print the outcome of `extract`.
///
/// With `--stdout` the template itself is the output, so nothing else is
/// written to stdout.
pub fn print_extract_to<W: Write>(summary: &ExtractSummary, source_files: usize, writer: &mut W) {
    let Some(path) = &summary.output else {
        let _ = write!(writer, "{}", summary.template);
        return;
    };

    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Extracted {} {} ({} {}) from {} source {}",
            summary.message_count,
            plural(summary.message_count, "message", "messages"),
            summary.reference_count,
            plural(summary.reference_count, "reference", "references"),
            source_files,
            plural(source_files, "file", "files"),
        )
        .green()
    );
    let _ = writeln!(writer, "  {} {}", "-->".blue(), path.display());
}

/// Print the per-locale table and the run summary of `sync`.
pub fn print_sync_to<W: Write>(summary: &SyncSummary, verbose: bool, writer: &mut W) {
    let report = &summary.report;

    let locale_width = report
        .locales
        .iter()
        .map(|r| UnicodeWidthStr::width(r.locale.as_str()))
        .chain(std::iter::once("locale".len()))
        .max()
        .unwrap_or(0);

    let mut header = pad("locale", locale_width);
    for column in COLUMNS {
        header.push_str(&format!("  {:>8}", column));
    }
    let _ = writeln!(writer, "{}", header.trim_end().bold());

    for locale_report in &report.locales {
        print_locale_row(locale_report, locale_width, summary.dry_run, writer);
    }

    let failed: Vec<&LocaleReport> = report
        .locales
        .iter()
        .filter(|r| r.outcome.is_err())
        .collect();

    if !failed.is_empty() {
        let _ = writeln!(writer);
        for locale_report in &failed {
            if let Err(err) = &locale_report.outcome {
                let message = if verbose {
                    format!("{:#}", err)
                } else {
                    err.to_string()
                };
                let _ = writeln!(
                    writer,
                    "{}: {}",
                    "error".bold().red(),
                    message
                );
            }
        }
    }

    let _ = writeln!(writer);
    let total = report.locales.len();
    let messages = report.messages.len();
    if failed.is_empty() {
        let verb = if summary.dry_run {
            "Checked"
        } else {
            "Synchronized"
        };
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "{} {} {} with {} {}",
                verb,
                total,
                plural(total, "locale", "locales"),
                messages,
                plural(messages, "message", "messages"),
            )
            .green()
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {}",
            FAILURE_MARK.red(),
            format!("{} of {} {} failed", failed.len(), total, plural(total, "locale", "locales"))
                .red()
        );
    }

    if summary.dry_run && report.locales.iter().any(|r| matches!(r.outcome, Ok(s) if s.changed)) {
        let _ = writeln!(writer, "Run without {} to write these catalogs.", "--dry-run".cyan());
    }
}

fn print_locale_row<W: Write>(
    locale_report: &LocaleReport,
    locale_width: usize,
    dry_run: bool,
    writer: &mut W,
) {
    let mut row = pad(&locale_report.locale, locale_width);
    match &locale_report.outcome {
        Ok(stats) => {
            for value in [
                stats.created,
                stats.updated,
                stats.fuzzy,
                stats.obsoleted,
                stats.total,
            ] {
                row.push_str(&format!("  {:>8}", value));
            }
            let _ = writeln!(writer, "{}  {}", row, status_label(stats, dry_run));
        }
        Err(_) => {
            for _ in 0..COLUMNS.len() - 1 {
                row.push_str(&format!("  {:>8}", "-"));
            }
            let _ = writeln!(writer, "{}  {}", row, format!("{} failed", FAILURE_MARK).red());
        }
    }
}

fn status_label(stats: &LocaleStats, dry_run: bool) -> String {
    let label = match (stats.changed, stats.is_new, dry_run) {
        (false, _, _) => return "unchanged".dimmed().to_string(),
        (true, true, true) => "would create".yellow(),
        (true, false, true) => "would update".yellow(),
        (true, true, false) => "created".green(),
        (true, false, false) => "updated".green(),
    };
    label.to_string()
}

/// Left-align `text` to `width` display columns.
fn pad(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(UnicodeWidthStr::width(text));
    format!("{}{}", text, " ".repeat(padding))
}

pub fn print_init_to<W: Write>(summary: &InitSummary, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", summary.path.display()).green()
    );
}

/// Print a warning about source files that could not be read.
pub fn print_unreadable_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} source file(s) could not be read (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

// ============================================================
// Tests
// ============================================================
