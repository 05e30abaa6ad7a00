use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::sync::{DEFAULT_FUZZY_THRESHOLD, validate_threshold};

pub const CONFIG_FILE_NAME: &str = ".msgsyncrc.json";

pub const TEST_FILE_PATTERNS: &[&str] = &["**/*.test.*", "**/*.spec.*", "**/__tests__/**"];

/// Names of the message functions, grouped by call shape.
///
/// - `plain`: `name(msgid)`
/// - `contextual`: `name(context, msgid)`
/// - `plural`: `name(msgid, msgid_plural, count)`
/// - `contextualPlural`: `name(context, msgid, msgid_plural, count)`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionNames {
    #[serde(default = "default_plain_functions")]
    pub plain: Vec<String>,
    #[serde(default = "default_contextual_functions")]
    pub contextual: Vec<String>,
    #[serde(default = "default_plural_functions")]
    pub plural: Vec<String>,
    #[serde(default = "default_contextual_plural_functions")]
    pub contextual_plural: Vec<String>,
}

fn default_plain_functions() -> Vec<String> {
    ["gettext", "_"].map(String::from).to_vec()
}

fn default_contextual_functions() -> Vec<String> {
    vec!["pgettext".to_string()]
}

fn default_plural_functions() -> Vec<String> {
    vec!["ngettext".to_string()]
}

fn default_contextual_plural_functions() -> Vec<String> {
    vec!["npgettext".to_string()]
}

impl Default for FunctionNames {
    fn default() -> Self {
        Self {
            plain: default_plain_functions(),
            contextual: default_contextual_functions(),
            plural: default_plural_functions(),
            contextual_plural: default_contextual_plural_functions(),
        }
    }
}

impl FunctionNames {
    fn groups(&self) -> [(&'static str, &[String]); 4] {
        [
            ("plain", &self.plain),
            ("contextual", &self.contextual),
            ("plural", &self.plural),
            ("contextualPlural", &self.contextual_plural),
        ]
    }

    pub fn validate(&self) -> Result<()> {
        let mut total = 0;
        for (group, names) in self.groups() {
            for name in names {
                if !is_identifier(name) {
                    bail!(
                        "Invalid function name in 'functions.{}': \"{}\"",
                        group,
                        name
                    );
                }
            }
            total += names.len();
        }
        if total == 0 {
            bail!("'functions' must name at least one message function");
        }
        Ok(())
    }
}

/// ASCII identifier: `[A-Za-z_$][A-Za-z0-9_$]*`.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default = "default_ignore_test_files")]
    pub ignore_test_files: bool,
    #[serde(default = "default_messages_root", alias = "messagesDir")]
    pub messages_root: String,
    #[serde(default = "default_domain")]
    pub domain: String,
    /// Locales to synchronize. Empty means every subdirectory of `messagesRoot`.
    #[serde(default)]
    pub locales: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_locale: Option<String>,
    #[serde(default = "default_fuzzy")]
    pub fuzzy: bool,
    #[serde(default = "default_fuzzy_threshold")]
    pub fuzzy_threshold: f64,
    #[serde(default)]
    pub functions: FunctionNames,
}

fn default_includes() -> Vec<String> {
    vec!["src".to_string()]
}

fn default_extensions() -> Vec<String> {
    ["js", "jsx", "ts", "tsx", "mjs", "cjs", "vue", "svelte"]
        .map(String::from)
        .to_vec()
}

fn default_ignore_test_files() -> bool {
    true
}

fn default_messages_root() -> String {
    "./locales".to_string()
}

fn default_domain() -> String {
    crate::core::store::DEFAULT_DOMAIN.to_string()
}

fn default_fuzzy() -> bool {
    true
}

fn default_fuzzy_threshold() -> f64 {
    DEFAULT_FUZZY_THRESHOLD
}

impl Default for Config {
    fn default() -> Self {
        Self {
            includes: default_includes(),
            ignores: Vec::new(),
            extensions: default_extensions(),
            ignore_test_files: default_ignore_test_files(),
            messages_root: default_messages_root(),
            domain: default_domain(),
            locales: Vec::new(),
            default_locale: None,
            fuzzy: default_fuzzy(),
            fuzzy_threshold: default_fuzzy_threshold(),
            functions: FunctionNames::default(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Rejects invalid glob patterns, malformed function names, an empty
    /// domain and fuzzy thresholds outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Patterns without * or ? are literal directory paths, so brackets
        // in them need no escaping.
        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        if self.domain.is_empty() || self.domain.contains(['/', '\\']) {
            bail!("Invalid 'domain': \"{}\"", self.domain);
        }

        validate_threshold(self.fuzzy_threshold).context("Invalid 'fuzzyThreshold'")?;
        self.functions.validate()?;

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
