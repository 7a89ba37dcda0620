// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

use crate::types::TargetOs;

/// Command-line arguments for `file-monitor`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "file-monitor",
    version,
    about = "Watch directories and send a notification for every change.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (YAML).
    ///
    /// Default: `config.yaml` (or `config.yml`) in the current working
    /// directory.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `FILE_MONITOR_LOG`, then `logging.level`, then `info`.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Path convention to normalize event paths into.
    ///
    /// Overrides `monitor.targetOs`; defaults to the host convention.
    #[arg(long, value_enum, value_name = "OS")]
    pub target_os: Option<TargetOsArg>,

    /// Parse + validate, print the effective settings, but don't watch.
    #[arg(long)]
    pub dry_run: bool,
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

/// Target path convention as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum TargetOsArg {
    Posix,
    Windows,
}

impl From<TargetOsArg> for TargetOs {
    fn from(arg: TargetOsArg) -> Self {
        match arg {
            TargetOsArg::Posix => TargetOs::Posix,
            TargetOsArg::Windows => TargetOs::Windows,
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
