use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::*;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use mdstrip_lib::config::{self, Config, ErrorPolicy};
use mdstrip_lib::diff::generate_diff;
use mdstrip_lib::exit_codes::{self, exit};
use mdstrip_lib::output::OutputWriter;
use mdstrip_lib::report::{FileReport, ReportFormat, ReportFormatter, TextFormatter};
use mdstrip_lib::{Processor, RangeSet, WriteMode, strip};

mod cli_types;

use cli_types::StripArgs;

#[derive(Parser)]
#[command(author, version, about, long_about = None, args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(flatten)]
    args: StripArgs,

    /// Command to run
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a default configuration file
    Init {
        /// Where to write the file
        #[arg(default_value = ".mdstrip.toml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// List the code-point ranges that will be removed
    Ranges {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "warn,mdstrip=debug,mdstrip_lib=debug"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("MDSTRIP_LOG", default_filter))
        .format_timestamp(None)
        .init();
}

fn load_config(explicit: Option<&Path>, no_config: bool) -> anyhow::Result<Config> {
    if no_config {
        return Ok(Config::default());
    }
    let cwd = std::env::current_dir().context("Failed to determine the working directory")?;
    let (config, _) = config::load_config(explicit, &cwd).context("Failed to load configuration")?;
    Ok(config)
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.args.verbose);

    let result = match cli.command {
        Some(Commands::Init { path, force }) => run_init(&path, force, cli.args.quiet),
        Some(Commands::Ranges { config }) => run_ranges(config.as_deref()),
        None => run_strip(&cli.args),
    };

    match result {
        Ok(code) if code == exit_codes::SUCCESS => exit::success(),
        Ok(_) => exit::tool_error(),
        Err(err) => {
            eprintln!("{}: {err:#}", "Error".red().bold());
            exit::tool_error();
        }
    }
}

fn run_init(path: &Path, force: bool, quiet: bool) -> anyhow::Result<i32> {
    config::create_default_config(path, force)?;
    if !quiet {
        println!("Created default configuration file: {}", path.display());
    }
    Ok(exit_codes::SUCCESS)
}

fn run_ranges(config_path: Option<&Path>) -> anyhow::Result<i32> {
    let config = load_config(config_path, false)?;
    let ranges = config.range_set()?;
    let mut stdout = io::stdout().lock();
    for range in ranges.intervals() {
        writeln!(stdout, "{range}")?;
    }
    writeln!(
        stdout,
        "\n{} ranges covering {} code points",
        ranges.intervals().len(),
        ranges.len()
    )?;
    Ok(exit_codes::SUCCESS)
}

fn run_strip(args: &StripArgs) -> anyhow::Result<i32> {
    let config = load_config(args.config.as_deref(), args.no_config)?;

    if args.stdin {
        return process_stdin(&config.range_set()?, args.quiet);
    }

    let mut processor = Processor::new(&config)?;
    if let Some(dir) = &args.dir {
        processor = processor.with_source_dir(dir);
    }
    if args.is_dry_run() {
        processor = processor.with_mode(WriteMode::DryRun);
    } else if args.backup {
        processor = processor.with_mode(WriteMode::Backup {
            suffix: config.global.backup_suffix.clone(),
        });
    }
    if let Some(policy) = args.on_error.as_deref() {
        processor = processor.with_error_policy(policy.parse::<ErrorPolicy>()?);
    }

    let format = ReportFormat::from_str(&args.output_format).map_err(anyhow::Error::msg)?;
    let formatter = format.create_formatter();
    let show_diff = args.diff && format == ReportFormat::Text;
    let output_writer = OutputWriter::new(false, args.quiet);

    let summary = processor.run(|processed| {
        if let Some(line) = formatter.format_file(&processed.report) {
            output_writer.writeln(&line).unwrap_or_else(|e| {
                eprintln!("Error writing output: {e}");
            });
        }
        if show_diff && let Some(stripped) = &processed.stripped {
            let diff = generate_diff(&processed.original, stripped, &processed.report.file);
            output_writer.writeln(&diff).unwrap_or_else(|e| {
                eprintln!("Error writing diff output: {e}");
            });
        }
    })?;

    output_writer
        .writeln(&formatter.format_summary(&summary))
        .unwrap_or_else(|e| {
            eprintln!("Error writing output: {e}");
        });

    if summary.has_failures() {
        output_writer.write_error(&format!(
            "{}: {} file(s) could not be processed",
            "Error".red().bold(),
            summary.skipped.len()
        ))?;
        return Ok(exit_codes::TOOL_ERROR);
    }
    Ok(exit_codes::SUCCESS)
}

/// Strip stdin to stdout; the report line goes to stderr
fn process_stdin(ranges: &RangeSet, quiet: bool) -> anyhow::Result<i32> {
    let mut content = String::new();
    io::stdin()
        .read_to_string(&mut content)
        .context("Failed to read from stdin")?;

    let stripped = strip(&content, ranges);
    let mut stdout = io::stdout().lock();
    stdout.write_all(stripped.content.as_bytes())?;
    stdout.flush()?;

    let report = FileReport {
        file: "<stdin>".to_string(),
        path: PathBuf::from("-"),
        removed: stripped.removed,
        bytes_removed: stripped.bytes_removed,
        changed: stripped.changed(),
        backup: None,
    };
    if let Some(line) = TextFormatter.format_file(&report) {
        OutputWriter::new(true, quiet).writeln(&line)?;
    }
    Ok(exit_codes::SUCCESS)
}
