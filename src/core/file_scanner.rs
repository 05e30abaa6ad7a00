use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use colored::Colorize;
use glob::{Pattern, glob};
use walkdir::WalkDir;

use crate::config::TEST_FILE_PATTERNS;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal directory paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// What to walk and what to keep.
pub struct ScanSettings<'a> {
    pub includes: &'a [String],
    pub ignores: &'a [String],
    /// File extensions to keep, without the leading dot.
    pub extensions: &'a [String],
    pub ignore_test_files: bool,
    pub verbose: bool,
}

/// Result of scanning files.
pub struct ScanResult {
    /// Matching files, sorted.
    pub files: BTreeSet<PathBuf>,
    pub skipped_count: usize,
}

fn warn(verbose: bool, message: String) {
    if verbose {
        eprintln!("{} {}", "warning:".bold().yellow(), message);
    }
}

pub fn scan_files(base_dir: &Path, settings: &ScanSettings) -> ScanResult {
    let mut files = BTreeSet::new();
    let mut skipped_count = 0;

    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();

    for p in settings.ignores {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => warn(
                    settings.verbose,
                    format!("Invalid ignore pattern '{}': {}", p, e),
                ),
            }
        } else {
            literal_ignore_paths.push(base_dir.join(p));
        }
    }

    if settings.ignore_test_files {
        glob_patterns.extend(TEST_FILE_PATTERNS.iter().filter_map(|p| Pattern::new(p).ok()));
    }

    let dirs_to_scan: Vec<PathBuf> = if settings.includes.is_empty() {
        vec![base_dir.to_path_buf()]
    } else {
        let mut paths = Vec::new();
        for inc in settings.includes {
            if is_glob_pattern(inc) {
                let full_pattern = base_dir.join(inc);
                match glob(&full_pattern.to_string_lossy()) {
                    Ok(entries) => paths.extend(entries.flatten().filter(|e| e.is_dir())),
                    Err(e) => warn(
                        settings.verbose,
                        format!("Invalid glob pattern '{}': {}", inc, e),
                    ),
                }
            } else {
                let path = base_dir.join(inc);
                if path.exists() {
                    paths.push(path);
                } else {
                    warn(
                        settings.verbose,
                        format!("Include path does not exist: {}", path.display()),
                    );
                }
            }
        }
        paths
    };

    for dir in dirs_to_scan {
        for entry in WalkDir::new(dir) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    skipped_count += 1;
                    warn(settings.verbose, format!("Cannot access path: {}", e));
                    continue;
                }
            };
            let path = entry.path();

            if literal_ignore_paths
                .iter()
                .any(|ignore_path| path.starts_with(ignore_path))
            {
                continue;
            }

            // Globs match either the full path or the path below base_dir.
            let full = path.to_string_lossy();
            let relative = source_id(base_dir, path);
            if glob_patterns
                .iter()
                .any(|p| p.matches(&full) || p.matches(&relative))
            {
                continue;
            }

            if entry.file_type().is_file() && has_extension(path, settings.extensions) {
                files.insert(path.to_path_buf());
            }
        }
    }

    ScanResult {
        files,
        skipped_count,
    }
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|allowed| allowed == ext))
}

/// Logical source id of `path`: relative to `base_dir`, `/`-separated.
pub fn source_id(base_dir: &Path, path: &Path) -> String {
    match path.strip_prefix(base_dir) {
        Ok(relative) => relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/"),
        Err(_) => path.to_string_lossy().into_owned(),
    }
}
