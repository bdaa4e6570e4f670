//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Timegate - time-window capture gating components
#[derive(Parser, Debug)]
#[command(
    name = "timegate",
    author,
    version,
    about = "Time-window capture gating module",
    long_about = "Gating components for a robot data-capture runtime.\n\n\
                  Wraps a camera so scheduled captures only produce data inside a \n\
                  configured daily, weekly, or explicit-range time window, and exposes \n\
                  a sensor reporting the window state as a sync-enable signal."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "TIMEGATE_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "TIMEGATE_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Construct the configured components and drive a capture loop
    Run(RunArgs),

    /// Validate configuration file without running
    Validate(ValidateArgs),

    /// Display configuration information
    Info(InfoArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Path to module configuration file (JSON)
    #[arg(short, long, default_value = "config.json", env = "TIMEGATE_CONFIG")]
    pub config: PathBuf,

    /// Seconds between scheduled-capture cycles
    #[arg(long, default_value = "10", env = "TIMEGATE_INTERVAL")]
    pub interval: u64,

    /// Stop after this many seconds (0 = run until ctrl-c)
    #[arg(long, default_value = "0", env = "TIMEGATE_MAX_DURATION")]
    pub max_duration: u64,

    /// Validate configuration and exit without running
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "config.json")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.json")]
    pub config: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}
