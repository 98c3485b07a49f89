// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::default_project_path;
use crate::types::CyclePolicy;

/// Command-line arguments for `pertdag`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "pertdag",
    version,
    about = "Critical path, schedule and layout for activity dependency graphs.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the project file (TOML).
    #[arg(long, value_name = "PATH", default_value_os_t = default_project_path())]
    pub project: PathBuf,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, the `PERTDAG_LOG` filter or `info` is used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Override `[analysis].cycle_policy` from the project file.
    #[arg(long, value_name = "POLICY", value_parser = parse_cycle_policy)]
    pub cycle_policy: Option<CyclePolicy>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Load and validate the project file.
    Check,
    /// Total cost, total duration and critical path.
    Summary,
    /// Every activity with its level and cumulative duration.
    Table,
    /// Node coordinates and edges for drawing the diagram.
    Layout,
    /// Activities that would be affected by deleting CODE.
    Impact {
        code: String,
    },
    /// Show the project as it would look after deleting CODE.
    ///
    /// Nothing is written back to the project file.
    Remove {
        code: String,
        /// Proceed even if other activities depend on CODE.
        #[arg(long)]
        confirm: bool,
    },
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

fn parse_cycle_policy(s: &str) -> Result<CyclePolicy, String> {
    s.parse()
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
