//! Qualifying-file discovery.
//!
//! Only the immediate children of the source directory are considered. Directory walking goes
//! through `ignore::WalkBuilder` with every ignore-file filter turned off, so hidden files and
//! gitignored files are treated like anything else.

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

use crate::config::{Config, ConfigError};
use crate::error::{Result, StripError};

/// Which files in the source directory are processed.
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    extensions: Vec<String>,
    exclude: Option<GlobSet>,
}

impl DiscoveryOptions {
    pub fn new(extensions: Vec<String>, exclude_patterns: &[String]) -> std::result::Result<Self, ConfigError> {
        let exclude = if exclude_patterns.is_empty() {
            None
        } else {
            let mut builder = GlobSetBuilder::new();
            for pattern in exclude_patterns {
                let glob = Glob::new(pattern).map_err(|e| ConfigError::InvalidPattern(format!("'{pattern}': {e}")))?;
                builder.add(glob);
            }
            Some(
                builder
                    .build()
                    .map_err(|e| ConfigError::InvalidPattern(e.to_string()))?,
            )
        };
        Ok(Self { extensions, exclude })
    }

    pub fn from_config(config: &Config) -> std::result::Result<Self, ConfigError> {
        Self::new(config.extensions(), &config.global.exclude)
    }

    /// True if a file with this name qualifies for processing.
    pub fn is_qualifying_name(&self, file_name: &str) -> bool {
        let has_extension = self.extensions.iter().any(|ext| {
            file_name
                .strip_suffix(ext.as_str())
                .and_then(|stem| stem.strip_suffix('.'))
                .is_some()
        });
        if !has_extension {
            return false;
        }
        !self.exclude.as_ref().is_some_and(|set| set.is_match(file_name))
    }

    /// True if appending `suffix` to some qualifying name yields another qualifying name.
    pub fn qualifies_with_suffix(&self, suffix: &str) -> bool {
        self.extensions
            .iter()
            .any(|ext| self.is_qualifying_name(&format!("document.{ext}{suffix}")))
    }
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            extensions: vec!["md".to_string()],
            exclude: None,
        }
    }
}

/// List the qualifying files directly inside `dir`, sorted by path.
///
/// Fails with [`StripError::MissingSourceDir`] if `dir` is not an existing directory.
pub fn find_markdown_files(dir: &Path, options: &DiscoveryOptions) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(StripError::MissingSourceDir { path: dir.to_path_buf() });
    }

    let mut walk_builder = WalkBuilder::new(dir);
    walk_builder.standard_filters(false);
    walk_builder.max_depth(Some(1));

    let mut file_paths = Vec::new();
    for result in walk_builder.build() {
        let entry = result.map_err(|source| StripError::Discovery {
            path: dir.to_path_buf(),
            source,
        })?;
        if entry.depth() == 0 {
            continue;
        }

        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            log::warn!("Skipping file with non UTF-8 name: {}", path.display());
            continue;
        };
        if options.is_qualifying_name(name) {
            file_paths.push(path.to_path_buf());
        } else {
            log::debug!("Ignoring {}", path.display());
        }
    }

    file_paths.sort();
    Ok(file_paths)
}
