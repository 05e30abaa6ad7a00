//! Catalog synchronization.
//!
//! `synchronize` reconciles the aggregated message set with every locale's
//! catalog. Locales are independent: each one is read, merged and written on
//! its own (in parallel), and a failure is recorded in that locale's report
//! instead of aborting the run.

pub mod merge;
pub mod similarity;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use rayon::prelude::*;

pub use merge::{DEFAULT_FUZZY_THRESHOLD, FuzzyMatching, MergePolicy, MergeStats, merge_catalog};
pub use similarity::{edit_distance, similarity};

use crate::core::store::CatalogStore;
use crate::core::{Catalog, ExtractedMessage};

/// Settings for one synchronization run.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Directory holding one subdirectory per locale.
    pub messages_root: PathBuf,
    pub locales: Vec<String>,
    /// Locale whose new entries are pre-filled with the source text.
    pub default_locale: Option<String>,
    pub fuzzy: FuzzyMatching,
    /// Compute everything but don't write catalogs.
    pub dry_run: bool,
}

impl SyncOptions {
    /// Reject settings that would make the run meaningless.
    pub fn validate(&self) -> Result<()> {
        validate_threshold(self.fuzzy.threshold)?;
        for locale in &self.locales {
            validate_locale_name(locale)?;
        }
        if let Some(locale) = &self.default_locale {
            validate_locale_name(locale)?;
        }
        Ok(())
    }
}

/// A fuzzy threshold must lie in `[0, 1]`.
pub fn validate_threshold(threshold: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&threshold) {
        bail!(
            "Invalid fuzzy threshold {}: must be between 0 and 1",
            threshold
        );
    }
    Ok(())
}

fn validate_locale_name(locale: &str) -> Result<()> {
    if locale.is_empty() || locale == "." || locale == ".." || locale.contains(['/', '\\']) {
        bail!("Invalid locale name: \"{}\"", locale);
    }
    Ok(())
}

/// Outcome of a successful locale synchronization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocaleStats {
    pub created: usize,
    pub updated: usize,
    pub fuzzy: usize,
    pub obsoleted: usize,
    /// Entries in the catalog after merging.
    pub total: usize,
    /// No catalog existed before this run.
    pub is_new: bool,
    /// The catalog differs from what was on disk.
    pub changed: bool,
    /// The catalog was written (false for unchanged catalogs and dry runs).
    pub written: bool,
}

/// Result for one locale.
#[derive(Debug)]
pub struct LocaleReport {
    pub locale: String,
    pub outcome: Result<LocaleStats>,
}

/// Result of a whole synchronization run.
#[derive(Debug)]
pub struct SyncReport {
    /// Per-locale results, in the order the locales were given.
    pub locales: Vec<LocaleReport>,
    /// The aggregated message set the catalogs were synchronized against.
    pub messages: Vec<ExtractedMessage>,
}

impl SyncReport {
    pub fn failed_count(&self) -> usize {
        self.locales.iter().filter(|r| r.outcome.is_err()).count()
    }
}

/// Synchronize `messages` into the catalog of every locale in `options`.
///
/// Returns `Err` only for invalid options, before any catalog is touched.
/// Read, parse and write failures are reported per locale.
pub fn synchronize<S: CatalogStore>(
    messages: &[ExtractedMessage],
    options: &SyncOptions,
    store: &S,
) -> Result<SyncReport> {
    options.validate()?;

    let locales = options
        .locales
        .par_iter()
        .map(|locale| LocaleReport {
            locale: locale.clone(),
            outcome: sync_locale(locale, messages, options, store),
        })
        .collect();

    Ok(SyncReport {
        locales,
        messages: messages.to_vec(),
    })
}

fn sync_locale<S: CatalogStore>(
    locale: &str,
    messages: &[ExtractedMessage],
    options: &SyncOptions,
    store: &S,
) -> Result<LocaleStats> {
    let locale_dir = options.messages_root.join(locale);

    let existing = store
        .read(&locale_dir)
        .with_context(|| format!("Failed to load catalog for locale '{}'", locale))?;
    let is_new = existing.is_none();
    let mut catalog = existing.unwrap_or_else(|| Catalog::for_locale(locale));

    let policy = MergePolicy {
        locale,
        is_default_locale: options.default_locale.as_deref() == Some(locale),
        fuzzy: options.fuzzy,
    };
    let stats = merge_catalog(&mut catalog, messages, &policy);

    let changed = is_new || stats.changed();
    let written = changed && !options.dry_run;
    if written {
        store
            .write(&locale_dir, &catalog)
            .with_context(|| format!("Failed to save catalog for locale '{}'", locale))?;
    }

    Ok(LocaleStats {
        created: stats.created,
        updated: stats.updated,
        fuzzy: stats.fuzzy,
        obsoleted: stats.obsoleted,
        total: catalog.len(),
        is_new,
        changed,
        written,
    })
}
