// src/logging.rs

//! Logging setup for `file-monitor` using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the log level:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `FILE_MONITOR_LOG` environment variable (e.g. "info", "debug")
//! 3. `logging.level` from the config file
//! 4. default to `info`
//!
//! Logs always go to STDERR. When `logging.file` is set, every line is also
//! appended (without ANSI colours) to that file, which is rotated by size
//! according to `logging.maxSize`, `maxBackups`, `maxAge` and `compress`.

use std::fs;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use file_rotate::compression::Compression;
use file_rotate::suffix::{AppendTimestamp, FileLimit};
use file_rotate::{ContentLimit, FileRotate};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::cli::LogLevel;
use crate::config::model::LoggingSection;

/// Environment variable consulted when no `--log-level` is given.
pub const LOG_ENV_VAR: &str = "FILE_MONITOR_LOG";

const MEGABYTE: usize = 1024 * 1024;
const DEFAULT_MAX_SIZE_MB: usize = 100;

/// Initialise global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>, section: &LoggingSection) -> Result<()> {
    let level = resolve_level(
        cli_level,
        std::env::var(LOG_ENV_VAR).ok().as_deref(),
        section.level.as_deref(),
    );

    let file_layer = match section.file.as_deref().map(str::trim) {
        Some(path) if !path.is_empty() => {
            let file = open_log_file(Path::new(path), RotationPolicy::from_section(section))?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(true)
                    .with_writer(Mutex::new(file)),
            )
        }
        _ => None,
    };

    tracing_subscriber::registry()
        .with(LevelFilter::from_level(level))
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .try_init()
        .context("installing tracing subscriber")?;

    Ok(())
}

/// Pick the effective level from the three possible sources.
pub fn resolve_level(
    cli_level: Option<LogLevel>,
    env_level: Option<&str>,
    config_level: Option<&str>,
) -> tracing::Level {
    if let Some(lvl) = cli_level {
        return level_from_log_level(lvl);
    }
    env_level
        .and_then(parse_level_str)
        .or_else(|| config_level.and_then(parse_level_str))
        .unwrap_or(tracing::Level::INFO)
}

/// How the log file is rotated.
struct RotationPolicy {
    max_bytes: usize,
    file_limit: FileLimit,
    compress: bool,
}

impl RotationPolicy {
    /// `maxBackups` takes precedence over `maxAge`; with neither set every
    /// rotated file is kept.
    fn from_section(section: &LoggingSection) -> Self {
        let size_mb = match section.max_size {
            0 => DEFAULT_MAX_SIZE_MB,
            mb => mb,
        };
        let file_limit = match (section.max_backups, section.max_age) {
            (0, 0) => FileLimit::MaxFiles(usize::MAX),
            (0, days) => FileLimit::Age(chrono::Duration::days(i64::from(days))),
            (n, _) => FileLimit::MaxFiles(n),
        };
        Self {
            max_bytes: size_mb.saturating_mul(MEGABYTE),
            file_limit,
            compress: section.compress,
        }
    }
}

fn open_log_file(path: &Path, policy: RotationPolicy) -> Result<FileRotate<AppendTimestamp>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating log directory {:?}", parent))?;
        }
    }
    let compression = if policy.compress {
        Compression::OnRotate(0)
    } else {
        Compression::None
    };
    Ok(FileRotate::new(
        path,
        AppendTimestamp::default(policy.file_limit),
        ContentLimit::Bytes(policy.max_bytes),
        compression,
        #[cfg(unix)]
        None,
    ))
}

fn level_from_log_level(lvl: LogLevel) -> tracing::Level {
    match lvl {
        LogLevel::Error => tracing::Level::ERROR,
        LogLevel::Warn => tracing::Level::WARN,
        LogLevel::Info => tracing::Level::INFO,
        LogLevel::Debug => tracing::Level::DEBUG,
        LogLevel::Trace => tracing::Level::TRACE,
    }
}

fn parse_level_str(s: &str) -> Option<tracing::Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(tracing::Level::ERROR),
        "warn" | "warning" => Some(tracing::Level::WARN),
        "info" => Some(tracing::Level::INFO),
        "debug" => Some(tracing::Level::DEBUG),
        "trace" => Some(tracing::Level::TRACE),
        _ => None,
    }
}
