//!
//! This module defines the configuration structures and loading logic for mdstrip.
//! Configuration lives in `.mdstrip.toml` (or `mdstrip.toml`) under a `[global]` table.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::ranges::{CodePointRange, RangeSet};

/// Config file names searched for in the working directory, in priority order.
pub const CONFIG_FILES: &[&str] = &[".mdstrip.toml", "mdstrip.toml"];

/// Source directory used when neither the CLI nor the config names one.
pub const DEFAULT_SOURCE_DIR: &str = "docs";

const KNOWN_GLOBAL_KEYS: &[&str] = &[
    "source-dir",
    "extensions",
    "exclude",
    "on-error",
    "backup",
    "backup-suffix",
    "extra-ranges",
];

/// Normalizes configuration keys to lowercase kebab-case.
pub fn normalize_key(key: &str) -> String {
    key.replace('_', "-").to_ascii_lowercase()
}

/// What to do when a single file cannot be read or written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Stop the run at the first failure
    #[default]
    Abort,
    /// Log the failure, skip the file, and keep going
    Skip,
}

impl FromStr for ErrorPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "abort" => Ok(ErrorPolicy::Abort),
            "skip" => Ok(ErrorPolicy::Skip),
            _ => Err(ConfigError::ParseError(format!(
                "Unknown on-error policy '{s}' (expected 'abort' or 'skip')"
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for ErrorPolicy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value
            .parse()
            .map_err(|_| serde::de::Error::unknown_variant(&value, &["abort", "skip"]))
    }
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorPolicy::Abort => write!(f, "abort"),
            ErrorPolicy::Skip => write!(f, "skip"),
        }
    }
}

/// Represents the complete configuration loaded from .mdstrip.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Global configuration options
    #[serde(default)]
    pub global: GlobalConfig,
}

/// Global configuration options
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct GlobalConfig {
    /// Directory holding the documents to clean
    pub source_dir: Option<PathBuf>,

    /// File extensions treated as Markdown (without the leading dot)
    pub extensions: Vec<String>,

    /// Glob patterns matched against file names; matching files are left alone
    pub exclude: Vec<String>,

    /// Per-file failure handling
    pub on_error: ErrorPolicy,

    /// Keep a copy of each changed file before overwriting it
    pub backup: bool,

    /// Suffix appended to the file name of backups
    pub backup_suffix: String,

    /// Additional code-point ranges to remove, e.g. "U+1F004" or "U+2B00-2B2F"
    pub extra_ranges: Vec<String>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            source_dir: None,
            extensions: vec!["md".to_string()],
            exclude: Vec::new(),
            on_error: ErrorPolicy::Abort,
            backup: false,
            backup_suffix: ".bak".to_string(),
            extra_ranges: Vec::new(),
        }
    }
}

impl Config {
    /// The configured source directory, or [`DEFAULT_SOURCE_DIR`].
    pub fn source_dir(&self) -> PathBuf {
        self.global
            .source_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SOURCE_DIR))
    }

    /// Extensions without a leading dot.
    pub fn extensions(&self) -> Vec<String> {
        self.global
            .extensions
            .iter()
            .map(|ext| ext.trim().trim_start_matches('.').to_string())
            .filter(|ext| !ext.is_empty())
            .collect()
    }

    /// The emoji table plus any `extra-ranges`.
    pub fn range_set(&self) -> Result<RangeSet, ConfigError> {
        let mut set = RangeSet::emoji();
        if !self.global.extra_ranges.is_empty() {
            let extra = self
                .global
                .extra_ranges
                .iter()
                .map(|s| s.parse::<CodePointRange>())
                .collect::<Result<Vec<_>, _>>()?;
            set.extend(extra);
        }
        Ok(set)
    }
}

/// Errors that can occur when loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read config file at {path}")]
    IoError { source: io::Error, path: String },

    /// Failed to parse the configuration content
    #[error("Failed to parse config: {0}")]
    ParseError(String),

    /// A code-point range could not be parsed
    #[error("Invalid code-point range '{0}' (expected U+XXXX or U+XXXX-YYYY)")]
    InvalidRange(String),

    /// An exclude pattern is not a valid glob
    #[error("Invalid exclude pattern: {0}")]
    InvalidPattern(String),

    /// Backups with this suffix would overwrite or be mistaken for the documents
    #[error("Invalid backup suffix '{0}': {1}")]
    InvalidBackupSuffix(String, &'static str),

    /// Configuration file already exists
    #[error("Configuration file already exists at {path}")]
    FileExists { path: String },
}

/// Parse configuration from TOML text. `path` is only used in messages.
pub fn parse_config(content: &str, path: &str) -> Result<Config, ConfigError> {
    let doc: toml::Table = toml::from_str(content).map_err(|e| ConfigError::ParseError(format!("{path}: {e}")))?;

    let mut global = toml::Table::new();
    for (section, value) in doc {
        if section != "global" {
            log::warn!("[WARN] Unknown section in {path}: [{section}]");
            continue;
        }
        let toml::Value::Table(table) = value else {
            return Err(ConfigError::ParseError(format!("{path}: [global] must be a table")));
        };
        for (key, value) in table {
            let norm = normalize_key(&key);
            if KNOWN_GLOBAL_KEYS.contains(&norm.as_str()) {
                global.insert(norm, value);
            } else {
                log::warn!("[WARN] Unknown key in [global] section of {path}: {key}");
            }
        }
    }

    let global = GlobalConfig::deserialize(toml::Value::Table(global))
        .map_err(|e| ConfigError::ParseError(format!("{path}: {e}")))?;
    Ok(Config { global })
}

/// Find the first config file from [`CONFIG_FILES`] inside `dir`.
pub fn discover_config(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILES.iter().map(|name| dir.join(name)).find(|p| p.is_file())
}

/// Load configuration.
///
/// An explicit path must exist and parse. Without one, the first of [`CONFIG_FILES`] in `dir`
/// is used, falling back to defaults. Returns the config and the file it came from.
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<(Config, Option<PathBuf>), ConfigError> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => match discover_config(dir) {
            Some(p) => p,
            None => {
                log::debug!("No config file found in {}, using defaults", dir.display());
                return Ok((Config::default(), None));
            }
        },
    };

    let path_str = path.display().to_string();
    let content = fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
        source: e,
        path: path_str.clone(),
    })?;
    let config = parse_config(&content, &path_str)?;
    log::debug!("Loaded config from {path_str}");
    Ok((config, Some(path)))
}

const DEFAULT_CONFIG: &str = r#"# mdstrip configuration file

[global]
# Directory containing the Markdown documents to clean
source-dir = "docs"

# Extensions treated as Markdown (case-sensitive, without the dot)
extensions = ["md"]

# File name glob patterns to leave untouched
# exclude = ["CHANGELOG.md", "draft-*.md"]

# What to do when a file cannot be read or written: "abort" or "skip"
on-error = "abort"

# Keep a copy of every changed file as <name><backup-suffix>
backup = false
backup-suffix = ".bak"

# Additional code points to strip, on top of the built-in emoji table
# extra-ranges = ["U+1F004", "U+2B00-2B2F"]
"#;

/// Create a default configuration file at the specified path
pub fn create_default_config(path: &Path, force: bool) -> Result<(), ConfigError> {
    if path.exists() && !force {
        return Err(ConfigError::FileExists {
            path: path.display().to_string(),
        });
    }

    fs::write(path, DEFAULT_CONFIG).map_err(|err| ConfigError::IoError {
        source: err,
        path: path.display().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.source_dir(), PathBuf::from("docs"));
        assert_eq!(config.extensions(), vec!["md".to_string()]);
        assert_eq!(config.global.on_error, ErrorPolicy::Abort);
        assert!(!config.global.backup);
        assert_eq!(config.global.backup_suffix, ".bak");
        assert_eq!(config.range_set().unwrap(), RangeSet::emoji());
    }

    #[test]
    fn test_parse_kebab_and_snake_case_keys() {
        let content = r#"
[global]
source-dir = "content"
extensions = [".md", "markdown"]
on_error = "skip"
backup_suffix = ".orig"
"#;
        let config = parse_config(content, "test.toml").unwrap();
        assert_eq!(config.source_dir(), PathBuf::from("content"));
        assert_eq!(config.extensions(), vec!["md".to_string(), "markdown".to_string()]);
        assert_eq!(config.global.on_error, ErrorPolicy::Skip);
        assert_eq!(config.global.backup_suffix, ".orig");
        assert!(!config.global.backup);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let content = r#"
[global]
backup = true
colour = "blue"

[theme]
dark = true
"#;
        let config = parse_config(content, "test.toml").unwrap();
        assert!(config.global.backup);
        assert_eq!(config.global.extensions, vec!["md".to_string()]);
    }

    #[test]
    fn test_invalid_toml_is_a_parse_error() {
        let err = parse_config("[global\nbackup = ", "broken.toml").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(ref msg) if msg.contains("broken.toml")));
    }

    #[test]
    fn test_wrong_value_type_is_a_parse_error() {
        let err = parse_config("[global]\nbackup = \"yes\"\n", "t.toml").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        assert!(parse_config("[global]\non-error = \"retry\"\n", "t.toml").is_err());
        assert!("retry".parse::<ErrorPolicy>().is_err());
        assert_eq!("SKIP".parse::<ErrorPolicy>().unwrap(), ErrorPolicy::Skip);
    }

    #[test]
    fn test_policy_is_case_insensitive_in_config() {
        let config = parse_config("[global]\non-error = \"Skip\"\n", "t.toml").unwrap();
        assert_eq!(config.global.on_error, ErrorPolicy::Skip);

        let err = parse_config("[global]\non-error = \"retry\"\n", "t.toml").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(ref msg) if msg.contains("retry")));
    }

    #[test]
    fn test_extra_ranges_extend_the_set() {
        let config = parse_config("[global]\nextra-ranges = [\"U+1F004\", \"U+2190-2193\"]\n", "t.toml").unwrap();
        let set = config.range_set().unwrap();
        assert!(set.contains('\u{1F004}'));
        assert!(set.contains('\u{2192}'));
        assert!(set.contains('\u{1F680}'));
    }

    #[test]
    fn test_bad_extra_range_is_reported() {
        let config = parse_config("[global]\nextra-ranges = [\"nope\"]\n", "t.toml").unwrap();
        let err = config.range_set().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRange(ref s) if s == "nope"));
    }

    #[test]
    fn test_load_config_discovers_dotfile_first() {
        let temp_dir = tempdir().unwrap();
        fs::write(temp_dir.path().join("mdstrip.toml"), "[global]\nsource-dir = \"plain\"\n").unwrap();
        fs::write(temp_dir.path().join(".mdstrip.toml"), "[global]\nsource-dir = \"dot\"\n").unwrap();

        let (config, path) = load_config(None, temp_dir.path()).unwrap();
        assert_eq!(config.source_dir(), PathBuf::from("dot"));
        assert_eq!(path, Some(temp_dir.path().join(".mdstrip.toml")));
    }

    #[test]
    fn test_load_config_without_file_uses_defaults() {
        let temp_dir = tempdir().unwrap();
        let (config, path) = load_config(None, temp_dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.is_none());
    }

    #[test]
    fn test_load_config_missing_explicit_file_fails() {
        let temp_dir = tempdir().unwrap();
        let missing = temp_dir.path().join("nope.toml");
        let err = load_config(Some(&missing), temp_dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::IoError { .. }));
    }

    #[test]
    fn test_create_default_config_round_trips_and_refuses_overwrite() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join(".mdstrip.toml");

        create_default_config(&path, false).unwrap();
        let (config, _) = load_config(Some(&path), temp_dir.path()).unwrap();
        assert_eq!(config.source_dir(), PathBuf::from("docs"));
        assert_eq!(config.global.on_error, ErrorPolicy::Abort);

        let err = create_default_config(&path, false).unwrap_err();
        assert!(matches!(err, ConfigError::FileExists { .. }));

        fs::write(&path, "# custom").unwrap();
        create_default_config(&path, true).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("source-dir"));
    }
}
