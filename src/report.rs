//! Removal reports and their renderings.

use colored::*;
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};

/// Outcome of stripping one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    /// File name without directory
    pub file: String,
    pub path: PathBuf,
    /// Code points removed
    pub removed: usize,
    pub bytes_removed: usize,
    /// Whether the content differs after stripping
    pub changed: bool,
    /// Backup written before overwriting, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup: Option<PathBuf>,
}

/// A file that failed while running with the skip policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Totals for one run over a source directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub source_dir: PathBuf,
    pub dry_run: bool,
    pub files: Vec<FileReport>,
    pub skipped: Vec<SkippedFile>,
}

impl RunSummary {
    pub fn new(source_dir: &Path, dry_run: bool) -> Self {
        Self {
            source_dir: source_dir.to_path_buf(),
            dry_run,
            ..Default::default()
        }
    }

    pub fn files_processed(&self) -> usize {
        self.files.len()
    }

    pub fn files_changed(&self) -> usize {
        self.files.iter().filter(|f| f.changed).count()
    }

    pub fn total_removed(&self) -> usize {
        self.files.iter().map(|f| f.removed).sum()
    }

    pub fn has_failures(&self) -> bool {
        !self.skipped.is_empty()
    }
}

/// Available report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// One human-readable line per file plus a summary line
    #[default]
    Text,
    /// A single JSON document printed when the run completes
    Json,
}

impl ReportFormat {
    /// Parse report format from string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }

    pub fn create_formatter(&self) -> Box<dyn ReportFormatter> {
        match self {
            ReportFormat::Text => Box::new(TextFormatter),
            ReportFormat::Json => Box::new(JsonFormatter),
        }
    }
}

/// Trait for report formatters
pub trait ReportFormatter {
    /// Line printed as soon as a file has been processed, if the format streams
    fn format_file(&self, report: &FileReport) -> Option<String>;

    /// Output printed once the run has completed
    fn format_summary(&self, summary: &RunSummary) -> String;
}

pub struct TextFormatter;

impl ReportFormatter for TextFormatter {
    fn format_file(&self, report: &FileReport) -> Option<String> {
        let noun = if report.removed == 1 { "character" } else { "characters" };
        Some(format!(
            "{} {} ({} {noun} removed)",
            "Processed:".green(),
            report.file,
            report.removed
        ))
    }

    fn format_summary(&self, summary: &RunSummary) -> String {
        let mut out = format!(
            "\n{} Removed {} characters from {}/{} files in {}",
            "Done!".green().bold(),
            summary.total_removed(),
            summary.files_changed(),
            summary.files_processed(),
            summary.source_dir.display()
        );
        if summary.dry_run {
            out.push_str(" (dry run, no files written)");
        }
        for skipped in &summary.skipped {
            out.push_str(&format!(
                "\n{} {}: {}",
                "Skipped:".yellow().bold(),
                skipped.path.display(),
                skipped.reason
            ));
        }
        out
    }
}

pub struct JsonFormatter;

impl ReportFormatter for JsonFormatter {
    fn format_file(&self, _report: &FileReport) -> Option<String> {
        None
    }

    fn format_summary(&self, summary: &RunSummary) -> String {
        let value = json!({
            "source_dir": summary.source_dir,
            "dry_run": summary.dry_run,
            "files": summary.files,
            "skipped": summary.skipped,
            "summary": {
                "files_processed": summary.files_processed(),
                "files_changed": summary.files_changed(),
                "characters_removed": summary.total_removed(),
            }
        });
        serde_json::to_string_pretty(&value).unwrap_or_default()
    }
}
