use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct StripArgs {
    /// Directory containing the Markdown documents to clean (default: source-dir in config, or "docs")
    #[arg(required = false)]
    pub dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Ignore configuration files and use defaults
    #[arg(long, conflicts_with = "config")]
    pub no_config: bool,

    /// Report what would be removed without writing any file
    #[arg(long, help = "Report what would be removed without writing any file")]
    pub dry_run: bool,

    /// Show a diff of every file that would change (implies --dry-run)
    #[arg(long, help = "Show a diff of every file that would change (implies --dry-run)")]
    pub diff: bool,

    /// Copy each changed file to <name><backup-suffix> before overwriting it
    #[arg(long, conflicts_with_all = ["dry_run", "diff"])]
    pub backup: bool,

    /// Per-file failure handling: abort the run (default) or skip the file and continue
    #[arg(long, value_parser = ["abort", "skip"])]
    pub on_error: Option<String>,

    /// Output format for reports
    #[arg(long, value_parser = ["text", "json"], default_value = "text")]
    pub output_format: String,

    /// Read from stdin and write the stripped text to stdout
    #[arg(long, conflicts_with_all = ["dir", "dry_run", "diff", "backup"])]
    pub stdin: bool,

    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Show debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl StripArgs {
    pub fn is_dry_run(&self) -> bool {
        self.dry_run || self.diff
    }
}
