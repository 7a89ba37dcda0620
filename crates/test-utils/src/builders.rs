#![allow(dead_code)]

use file_monitor::config::{ConfigFile, RawConfigFile};
use file_monitor::types::TargetOs;

/// Builder for `ConfigFile` to simplify test setup.
///
/// Starts from an all-default config watching nothing; call
/// [`ConfigBuilder::watch`] at least once before [`ConfigBuilder::build`].
pub struct ConfigBuilder {
    config: RawConfigFile,
    target_os: TargetOs,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
            target_os: TargetOs::Posix,
        }
    }

    pub fn watch(mut self, dir: &str) -> Self {
        self.config.monitor.directories.push(dir.to_string());
        self
    }

    pub fn ignore_extension(mut self, ext: &str) -> Self {
        self.config.monitor.ignore.extensions.push(ext.to_string());
        self
    }

    pub fn ignore_file(mut self, pattern: &str) -> Self {
        self.config.monitor.ignore.files.push(pattern.to_string());
        self
    }

    pub fn ignore_directory(mut self, pattern: &str) -> Self {
        self.config.monitor.ignore.directories.push(pattern.to_string());
        self
    }

    pub fn event(mut self, kind: &str) -> Self {
        self.config.monitor.events.push(kind.to_string());
        self
    }

    pub fn target_os(mut self, os: TargetOs) -> Self {
        self.target_os = os;
        self
    }

    pub fn webhook(mut self, provider: &str, sendkey: &str) -> Self {
        self.config.webhook.enabled = true;
        self.config.webhook.provider = provider.to_string();
        self.config.webhook.sendkey = sendkey.to_string();
        self
    }

    pub fn email(mut self, host: &str, port: u16, from: &str, to: &[&str]) -> Self {
        let email = &mut self.config.email;
        email.enabled = true;
        email.smtp_host = host.to_string();
        email.smtp_port = port;
        email.username = from.to_string();
        email.password = "secret".to_string();
        email.from = from.to_string();
        email.to = to.iter().map(|s| s.to_string()).collect();
        self
    }

    /// The raw config, for tests that exercise validation failures.
    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        file_monitor::config::validate_config(self.config, Some(self.target_os))
            .expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
