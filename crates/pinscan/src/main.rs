use clap::{Parser, Subcommand};
use log::{LevelFilter, info, warn};
use pinscan_lib::commands::app::{self, AppError};
use pinscan_lib::config::Settings;
use pinscan_lib::infrastructure::RepoError;
use serde::Serialize;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Top-level error type for the pinscan CLI binary
#[derive(Debug, Error)]
enum PinscanError {
    /// Command orchestration failed.
    #[error(transparent)]
    App(#[from] AppError),

    /// Reports could not be serialized.
    #[error("failed to serialize report")]
    Serialize(#[from] serde_json::Error),

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Some records or workflows could not be analyzed.
    #[error("{failed} item(s) failed")]
    Failures { failed: usize },
}

#[derive(Parser)]
#[command(name = "pinscan")]
#[command(about = "Inventory the actions, containers and runners of GitHub Actions workflows", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a single workflow file
    Analyze {
        /// Path to the workflow file
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },
    /// Analyze every workflow of the current repository
    Scan,
    /// Process a queue batch of workflow events, fetching each workflow from Github
    Process {
        /// Path to the batch JSON, or `-` to read stdin
        #[arg(value_name = "EVENTS", default_value = "-")]
        events: PathBuf,
    },
}

fn main() -> Result<(), PinscanError> {
    let cli = Cli::parse();

    init_logging(&cli);

    match cli.command {
        Commands::Analyze { path } => {
            let report = app::analyze(&path)?;
            write_json(&report)?;
        }
        Commands::Scan => {
            let cwd = std::env::current_dir()?;
            let summary = match app::scan(&cwd) {
                Ok(summary) => summary,
                Err(AppError::Repo(RepoError::NoGithubFolder { root })) => {
                    info!("No .github folder in {}. Nothing to scan.", root.display());
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            };
            write_json(&summary.reports)?;
            fail_if_any(summary.failed)?;
        }
        Commands::Process { events } => {
            let batch_json = read_input(&events)?;
            let summary = app::process(&batch_json, &Settings::from_env())?;
            write_json(&summary.reports)?;
            fail_if_any(summary.failed)?;
        }
    }
    Ok(())
}

/// Read a file, or stdin when the path is `-`
fn read_input(path: &Path) -> io::Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path)
    }
}

/// Print a value as pretty JSON on stdout
fn write_json<T: Serialize>(value: &T) -> Result<(), PinscanError> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

fn fail_if_any(failed: usize) -> Result<(), PinscanError> {
    if failed == 0 {
        Ok(())
    } else {
        warn!("{failed} item(s) could not be analyzed");
        Err(PinscanError::Failures { failed })
    }
}

/// Initialize logging based on the verbosity level specified in the CLI
fn init_logging(cli: &Cli) {
    let mut builder = env_logger::builder();
    builder
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .format(|buf, record| {
            let level = record.level();
            let style = &buf.default_level_style(level);
            writeln!(buf, "[{style}{level}{style:#}] {}", record.args())
        });

    if !cli.verbose {
        builder.format_timestamp(None);
    }

    builder.init();
}
