//! The emoji stripper: validate the source directory, enumerate its documents, and rewrite each
//! one with matching code points removed.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{Config, ConfigError, ErrorPolicy};
use crate::discovery::{DiscoveryOptions, find_markdown_files};
use crate::error::{Result, StripError};
use crate::ranges::RangeSet;
use crate::report::{FileReport, RunSummary, SkippedFile};
use crate::stripper::strip;

/// How stripped content is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Overwrite the document
    #[default]
    InPlace,
    /// Compute reports without writing anything
    DryRun,
    /// Copy the original to `<name><suffix>` before overwriting
    Backup { suffix: String },
}

/// One processed document, with enough content to render a diff.
#[derive(Debug, Clone)]
pub struct ProcessedFile {
    pub report: FileReport,
    pub original: String,
    /// Stripped content, `None` when nothing was removed
    pub stripped: Option<String>,
}

pub struct Processor {
    source_dir: PathBuf,
    ranges: RangeSet,
    discovery: DiscoveryOptions,
    mode: WriteMode,
    on_error: ErrorPolicy,
}

impl Processor {
    /// Build a processor from configuration. Fails on invalid ranges, exclude patterns, or a
    /// backup suffix that would clobber the documents.
    pub fn new(config: &Config) -> Result<Self> {
        let discovery = DiscoveryOptions::from_config(config)?;
        let mode = if config.global.backup {
            check_backup_suffix(&config.global.backup_suffix, &discovery)?;
            WriteMode::Backup {
                suffix: config.global.backup_suffix.clone(),
            }
        } else {
            WriteMode::InPlace
        };

        Ok(Self {
            source_dir: config.source_dir(),
            ranges: config.range_set()?,
            discovery,
            mode,
            on_error: config.global.on_error,
        })
    }

    pub fn with_source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_dir = dir.into();
        self
    }

    pub fn with_mode(mut self, mode: WriteMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.on_error = policy;
        self
    }

    pub fn mode(&self) -> &WriteMode {
        &self.mode
    }

    /// Strip a single document according to the write mode.
    ///
    /// Files with nothing to remove are never rewritten.
    pub fn process_file(&self, path: &Path) -> Result<ProcessedFile> {
        let content = fs::read_to_string(path).map_err(|source| StripError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let stripped = strip(&content, &self.ranges);
        let removed = stripped.removed;
        let bytes_removed = stripped.bytes_removed;
        let changed = stripped.changed();
        let stripped = changed.then(|| stripped.into_owned());

        let mut backup = None;
        if let Some(new_content) = &stripped {
            match &self.mode {
                WriteMode::DryRun => {}
                WriteMode::InPlace => write_document(path, new_content)?,
                WriteMode::Backup { suffix } => {
                    check_backup_suffix(suffix, &self.discovery)?;
                    let backup_path = backup_path(path, suffix);
                    fs::copy(path, &backup_path).map_err(|source| StripError::Backup {
                        path: path.to_path_buf(),
                        source,
                    })?;
                    write_document(path, new_content)?;
                    backup = Some(backup_path);
                }
            }
        }

        log::debug!("{}: {removed} code points ({bytes_removed} bytes) removed", path.display());

        let report = FileReport {
            file: path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string()),
            path: path.to_path_buf(),
            removed,
            bytes_removed,
            changed,
            backup,
        };

        Ok(ProcessedFile {
            report,
            original: content,
            stripped,
        })
    }

    /// Process every qualifying document in the source directory.
    ///
    /// `on_file` is called after each document, in processing order. A missing source directory
    /// fails before any file is touched. Per-file failures follow the error policy.
    pub fn run<F>(&self, mut on_file: F) -> Result<RunSummary>
    where
        F: FnMut(&ProcessedFile),
    {
        if let WriteMode::Backup { suffix } = &self.mode {
            check_backup_suffix(suffix, &self.discovery)?;
        }
        let files = find_markdown_files(&self.source_dir, &self.discovery)?;
        log::debug!("Found {} documents in {}", files.len(), self.source_dir.display());

        let mut summary = RunSummary::new(&self.source_dir, self.mode == WriteMode::DryRun);
        for path in files {
            match self.process_file(&path) {
                Ok(processed) => {
                    on_file(&processed);
                    summary.files.push(processed.report);
                }
                Err(err) => match self.on_error {
                    ErrorPolicy::Abort => return Err(err),
                    ErrorPolicy::Skip => {
                        let reason = std::error::Error::source(&err)
                            .map(|s| s.to_string())
                            .unwrap_or_else(|| err.to_string());
                        log::warn!("Skipping {}: {reason}", path.display());
                        summary.skipped.push(SkippedFile { path, reason });
                    }
                },
            }
        }

        Ok(summary)
    }
}

fn write_document(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|source| StripError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// A backup must land next to its document under a name that discovery never picks up.
fn check_backup_suffix(suffix: &str, discovery: &DiscoveryOptions) -> std::result::Result<(), ConfigError> {
    let problem = if suffix.is_empty() {
        "must not be empty"
    } else if suffix.contains(['/', '\\']) {
        "must not contain a path separator"
    } else if discovery.qualifies_with_suffix(suffix) {
        "backups would be processed as documents"
    } else {
        return Ok(());
    };
    Err(ConfigError::InvalidBackupSuffix(suffix.to_string(), problem))
}

/// `docs/a.md` with suffix `.bak` becomes `docs/a.md.bak`.
pub fn backup_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}
