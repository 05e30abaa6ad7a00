use std::{
    cell::OnceCell,
    collections::BTreeSet,
    fs,
    path::{Component, Path, PathBuf},
};

use anyhow::{Context as _, Result};
use colored::Colorize;
use rayon::prelude::*;

use crate::{
    cli::args::CommonArgs,
    config::{CONFIG_FILE_NAME, Config, load_config},
    core::{
        ExtractedMessage,
        aggregate,
        extract::{Scanner, SourceUnit},
        file_scanner::{ScanSettings, scan_files, source_id},
        store::PoStore,
    },
};

/// A source file that could not be read.
#[derive(Debug, Clone)]
pub struct UnreadableFile {
    pub file_path: String,
    pub error: String,
}

struct LoadedSources {
    units: Vec<SourceUnit>,
    unreadable: Vec<UnreadableFile>,
}

/// Project setup shared by every command.
///
/// # Configuration Priority
///
/// 1. CLI arguments (e.g., `--messages-root locales`)
/// 2. `.msgsyncrc.json` config file
/// 3. Built-in defaults
///
/// Source files are listed eagerly; their contents are read on first use.
pub struct ProjectContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,

    /// Project root directory; source ids are relative to it.
    pub root_dir: PathBuf,

    /// Directory holding one subdirectory per locale.
    pub messages_dir: PathBuf,

    /// All source files to scan, sorted.
    pub files: BTreeSet<PathBuf>,

    /// Paths the directory walk could not access.
    pub skipped_count: usize,

    pub verbose: bool,

    sources: OnceCell<LoadedSources>,
}

impl ProjectContext {
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let verbose = common_args.verbose;
        let root_dir = common_args
            .source_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        let config_result = load_config(&root_dir)?;
        if verbose && !config_result.from_file {
            eprintln!(
                "Note: No {} found, using default configuration",
                CONFIG_FILE_NAME
            );
        }

        let mut config = config_result.config;
        if let Some(ref messages_root) = common_args.messages_root {
            config.messages_root = messages_root.to_string_lossy().to_string();
        }
        if let Some(ref default_locale) = common_args.default_locale {
            config.default_locale = Some(default_locale.clone());
        }

        let messages_dir = resolve_against(&root_dir, &config.messages_root);

        let scan_result = scan_files(
            &root_dir,
            &ScanSettings {
                includes: &config.includes,
                ignores: &config.ignores,
                extensions: &config.extensions,
                ignore_test_files: config.ignore_test_files,
                verbose,
            },
        );

        if scan_result.skipped_count > 0 {
            eprintln!(
                "{} {} path(s) skipped due to access errors{}",
                "warning:".bold().yellow(),
                scan_result.skipped_count,
                if verbose { "" } else { " (use -v for details)" }
            );
        }

        Ok(Self {
            config,
            root_dir,
            messages_dir,
            files: scan_result.files,
            skipped_count: scan_result.skipped_count,
            verbose,
            sources: OnceCell::new(),
        })
    }

    fn sources(&self) -> &LoadedSources {
        self.sources.get_or_init(|| {
            let root_dir = &self.root_dir;
            let results: Vec<_> = self
                .files
                .par_iter()
                .map(|path| {
                    let id = source_id(root_dir, path);
                    let text = fs::read_to_string(path);
                    (id, text)
                })
                .collect();

            let mut units = Vec::new();
            let mut unreadable = Vec::new();
            for (id, text) in results {
                match text {
                    Ok(text) => units.push(SourceUnit::new(id, text)),
                    Err(e) => {
                        if self.verbose {
                            eprintln!("{} {} - {}", "warning:".bold().yellow(), id, e);
                        }
                        unreadable.push(UnreadableFile {
                            file_path: id,
                            error: e.to_string(),
                        });
                    }
                }
            }

            LoadedSources { units, unreadable }
        })
    }

    /// Readable source files, in path order.
    pub fn source_units(&self) -> &[SourceUnit] {
        &self.sources().units
    }

    /// Source files that were listed but could not be read.
    pub fn unreadable_files(&self) -> &[UnreadableFile] {
        &self.sources().unreadable
    }

    /// Scan every source file and aggregate the call-sites.
    pub fn extract_messages(&self) -> Result<Vec<ExtractedMessage>> {
        let scanner = Scanner::new(&self.config.functions)?;
        Ok(aggregate::extract_messages(&scanner, self.source_units()))
    }

    /// Locales to synchronize.
    ///
    /// `requested` (from `--locale`) wins, then `locales` from the config,
    /// then the subdirectories of the messages directory. The default locale
    /// is always part of the result.
    pub fn locales(&self, requested: &[String]) -> Result<Vec<String>> {
        let mut locales: Vec<String> = if !requested.is_empty() {
            requested.to_vec()
        } else if !self.config.locales.is_empty() {
            self.config.locales.clone()
        } else {
            discover_locales(&self.messages_dir)?
        };

        if let Some(default_locale) = &self.config.default_locale
            && !locales.contains(default_locale)
        {
            locales.push(default_locale.clone());
        }

        let mut seen = BTreeSet::new();
        locales.retain(|locale| seen.insert(locale.clone()));
        Ok(locales)
    }

    pub fn store(&self) -> PoStore {
        PoStore::new(self.config.domain.clone())
    }

    /// Default location of the POT template.
    pub fn template_path(&self) -> PathBuf {
        self.messages_dir.join(format!("{}.pot", self.config.domain))
    }
}

/// Resolve a config path against the project root.
fn resolve_against(root_dir: &Path, value: &str) -> PathBuf {
    let p = Path::new(value);
    if p.is_absolute() {
        return p.to_path_buf();
    }
    let is_cur_dir = root_dir
        .components()
        .all(|c| matches!(c, Component::CurDir));
    if is_cur_dir {
        p.to_path_buf()
    } else {
        let rel = p.strip_prefix(Path::new(".")).unwrap_or(p);
        root_dir.join(rel)
    }
}

/// Subdirectories of `messages_dir`, sorted. Hidden directories are skipped.
fn discover_locales(messages_dir: &Path) -> Result<Vec<String>> {
    if !messages_dir.is_dir() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(messages_dir).with_context(|| {
        format!(
            "Failed to read messages directory: {}",
            messages_dir.display()
        )
    })?;

    let mut locales = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if !name.starts_with('.') {
            locales.push(name);
        }
    }
    locales.sort();
    Ok(locales)
}
