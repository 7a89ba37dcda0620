// src/config/model.rs

use serde::Deserialize;

use crate::types::{Operation, TargetOs, WebhookProvider};

/// Top-level configuration as read from the YAML file.
///
/// ```yaml
/// logging:
///   file: logs/monitor.log
/// monitor:
///   directories: ["/data"]
///   ignore:
///     files: ["*.log"]
///     extensions: [".tmp"]
///     directories: ["*/node_modules/*"]
///   events: ["create", "write"]
/// webhook:
///   enabled: true
///   provider: serverchan
///   sendkey: SCT123
/// email:
///   enabled: false
/// ```
///
/// All sections are optional and have reasonable defaults. Semantic checks
/// happen when converting into [`ConfigFile`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub logging: LoggingSection,

    #[serde(default)]
    pub monitor: MonitorSection,

    #[serde(default)]
    pub webhook: WebhookSection,

    #[serde(default)]
    pub email: EmailSection,
}

/// `logging:` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingSection {
    /// Optional file that receives a copy of every log line.
    #[serde(default)]
    pub file: Option<String>,

    /// Optional level (error, warn, info, debug, trace). CLI flag and
    /// `FILE_MONITOR_LOG` take precedence.
    #[serde(default)]
    pub level: Option<String>,

    /// Rotate once the file reaches this many megabytes; 0 means 100.
    #[serde(default, rename = "maxSize", alias = "maxsize", alias = "max_size")]
    pub max_size: usize,

    /// Rotated files to keep; 0 keeps all of them (subject to `maxAge`).
    #[serde(default, rename = "maxBackups", alias = "maxbackups", alias = "max_backups")]
    pub max_backups: usize,

    /// Days to keep rotated files; only used when `maxBackups` is 0.
    #[serde(default, rename = "maxAge", alias = "maxage", alias = "max_age")]
    pub max_age: u32,

    /// Gzip rotated files.
    #[serde(default)]
    pub compress: bool,
}

/// `monitor:` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MonitorSection {
    /// Directories to watch (non-recursively).
    #[serde(default)]
    pub directories: Vec<String>,

    #[serde(default)]
    pub ignore: IgnoreSection,

    /// Event kinds of interest. Validated and reported, not enforced.
    #[serde(default)]
    pub events: Vec<String>,

    /// `posix` or `windows`; defaults to the host convention.
    #[serde(default, rename = "targetOs", alias = "target_os", alias = "targetos")]
    pub target_os: Option<String>,
}

/// `monitor.ignore:` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IgnoreSection {
    /// Glob patterns matched against a path's base name.
    #[serde(default)]
    pub files: Vec<String>,

    /// Extensions (including the dot) matched verbatim.
    #[serde(default)]
    pub extensions: Vec<String>,

    /// Glob patterns matched against the full normalized path.
    #[serde(default)]
    pub directories: Vec<String>,
}

/// `webhook:` section.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookSection {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub provider: String,

    #[serde(default, alias = "sendKey", alias = "send_key")]
    pub sendkey: String,

    /// Optional body template with `{path}`, `{op}` and `{time}` placeholders.
    #[serde(default)]
    pub template: String,

    #[serde(
        default = "default_timeout_secs",
        rename = "timeoutSecs",
        alias = "timeout_secs"
    )]
    pub timeout_secs: u64,
}

impl Default for WebhookSection {
    fn default() -> Self {
        Self {
            enabled: false,
            provider: String::new(),
            sendkey: String::new(),
            template: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// `email:` section.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailSection {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default, rename = "smtpHost", alias = "smtphost", alias = "smtp_host")]
    pub smtp_host: String,

    #[serde(default, rename = "smtpPort", alias = "smtpport", alias = "smtp_port")]
    pub smtp_port: u16,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,

    #[serde(default)]
    pub from: String,

    #[serde(default)]
    pub to: Vec<String>,

    #[serde(
        default = "default_timeout_secs",
        rename = "timeoutSecs",
        alias = "timeout_secs"
    )]
    pub timeout_secs: u64,
}

impl Default for EmailSection {
    fn default() -> Self {
        Self {
            enabled: false,
            smtp_host: String::new(),
            smtp_port: 0,
            username: String::new(),
            password: String::new(),
            from: String::new(),
            to: Vec::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}

/// Validated, immutable configuration snapshot.
///
/// Only constructed through `TryFrom<RawConfigFile>` (see `validate.rs`), so
/// holders can rely on:
/// - at least one directory to watch,
/// - at most one notification channel enabled,
/// - a known provider whenever the webhook is enabled.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    logging: LoggingSection,
    monitor: MonitorSection,
    webhook: WebhookSection,
    email: EmailSection,
    target_os: TargetOs,
    events: Vec<Operation>,
    provider: Option<WebhookProvider>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        raw: RawConfigFile,
        target_os: TargetOs,
        events: Vec<Operation>,
        provider: Option<WebhookProvider>,
    ) -> Self {
        Self {
            logging: raw.logging,
            monitor: raw.monitor,
            webhook: raw.webhook,
            email: raw.email,
            target_os,
            events,
            provider,
        }
    }

    pub fn logging(&self) -> &LoggingSection {
        &self.logging
    }

    /// Watch directories, already normalized for [`Self::target_os`].
    pub fn directories(&self) -> &[String] {
        &self.monitor.directories
    }

    pub fn ignore(&self) -> &IgnoreSection {
        &self.monitor.ignore
    }

    /// Event kinds listed under `monitor.events`.
    pub fn events(&self) -> &[Operation] {
        &self.events
    }

    pub fn target_os(&self) -> TargetOs {
        self.target_os
    }

    pub fn webhook(&self) -> &WebhookSection {
        &self.webhook
    }

    /// Parsed provider; `Some` whenever the webhook section names a known one.
    pub fn webhook_provider(&self) -> Option<WebhookProvider> {
        self.provider
    }

    pub fn email(&self) -> &EmailSection {
        &self.email
    }
}
