//! Catalog storage.
//!
//! The synchronizer only sees [`CatalogStore`]; the on-disk format lives
//! behind it. [`PoStore`] keeps one gettext PO file per locale directory.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::core::Catalog;
use crate::core::parsers::{parse_po, write_po};

/// Reads and writes a locale's catalog.
pub trait CatalogStore: Sync {
    /// Load the catalog in `locale_dir`.
    ///
    /// Returns `Ok(None)` when there is no catalog yet (including when the
    /// directory itself doesn't exist).
    fn read(&self, locale_dir: &Path) -> Result<Option<Catalog>>;

    /// Persist `catalog` into `locale_dir`, creating the directory if needed.
    fn write(&self, locale_dir: &Path, catalog: &Catalog) -> Result<()>;
}

/// Default catalog file name (without extension).
pub const DEFAULT_DOMAIN: &str = "messages";

/// PO-file store: `<locale_dir>/<domain>.po`.
#[derive(Debug, Clone)]
pub struct PoStore {
    domain: String,
}

impl PoStore {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
        }
    }

    pub fn catalog_path(&self, locale_dir: &Path) -> PathBuf {
        locale_dir.join(format!("{}.po", self.domain))
    }
}

impl Default for PoStore {
    fn default() -> Self {
        Self::new(DEFAULT_DOMAIN)
    }
}

impl CatalogStore for PoStore {
    fn read(&self, locale_dir: &Path) -> Result<Option<Catalog>> {
        let path = self.catalog_path(locale_dir);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Failed to read catalog: {}", path.display()));
            }
        };

        let catalog = parse_po(&content)
            .with_context(|| format!("Failed to parse catalog: {}", path.display()))?;
        Ok(Some(catalog))
    }

    fn write(&self, locale_dir: &Path, catalog: &Catalog) -> Result<()> {
        fs::create_dir_all(locale_dir)
            .with_context(|| format!("Failed to create directory: {}", locale_dir.display()))?;

        let path = self.catalog_path(locale_dir);
        fs::write(&path, write_po(catalog))
            .with_context(|| format!("Failed to write catalog: {}", path.display()))
    }
}
