// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{MonitorError, Result};
use crate::types::{Operation, TargetOs, WebhookProvider};
use crate::watch::path_utils::normalize;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::MonitorError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_config(raw, None)
    }
}

/// Validate a raw config and freeze it into a [`ConfigFile`].
///
/// `target_override` (e.g. from `--target-os`) wins over `monitor.targetOs`.
/// Watch directories are normalized for the resulting target here, once.
pub fn validate_config(
    mut raw: RawConfigFile,
    target_override: Option<TargetOs>,
) -> Result<ConfigFile> {
    ensure_has_directories(&raw)?;
    ensure_single_channel(&raw)?;
    let provider = validate_webhook(&raw)?;
    validate_email(&raw)?;
    let events = parse_events(&raw)?;
    let target_os = match target_override {
        Some(os) => os,
        None => parse_target_os(&raw)?,
    };

    raw.monitor.directories = raw
        .monitor
        .directories
        .iter()
        .filter(|dir| !dir.trim().is_empty())
        .map(|dir| normalize(dir.trim(), target_os))
        .collect();

    Ok(ConfigFile::new_unchecked(raw, target_os, events, provider))
}

fn ensure_has_directories(cfg: &RawConfigFile) -> Result<()> {
    if cfg.monitor.directories.iter().all(|d| d.trim().is_empty()) {
        return Err(MonitorError::NoDirectories);
    }
    Ok(())
}

fn ensure_single_channel(cfg: &RawConfigFile) -> Result<()> {
    if cfg.webhook.enabled && cfg.email.enabled {
        return Err(MonitorError::ChannelConflict);
    }
    Ok(())
}

fn validate_webhook(cfg: &RawConfigFile) -> Result<Option<WebhookProvider>> {
    let webhook = &cfg.webhook;
    let parsed = webhook.provider.parse::<WebhookProvider>().ok();

    if !webhook.enabled {
        return Ok(parsed);
    }

    let provider = parsed
        .ok_or_else(|| MonitorError::UnsupportedProvider(webhook.provider.clone()))?;

    if webhook.sendkey.trim().is_empty() {
        return Err(MonitorError::ConfigError(
            "webhook.sendkey must be set when webhook is enabled".to_string(),
        ));
    }

    Ok(Some(provider))
}

fn validate_email(cfg: &RawConfigFile) -> Result<()> {
    let email = &cfg.email;
    if !email.enabled {
        return Ok(());
    }

    if email.smtp_host.trim().is_empty() {
        return Err(MonitorError::ConfigError(
            "email.smtpHost must be set when email is enabled".to_string(),
        ));
    }
    if email.smtp_port == 0 {
        return Err(MonitorError::ConfigError(
            "email.smtpPort must be >= 1 (got 0)".to_string(),
        ));
    }
    if email.to.is_empty() {
        return Err(MonitorError::ConfigError(
            "email.to must list at least one recipient".to_string(),
        ));
    }
    Ok(())
}

fn parse_events(cfg: &RawConfigFile) -> Result<Vec<Operation>> {
    cfg.monitor
        .events
        .iter()
        .map(|name| {
            name.parse::<Operation>()
                .map_err(|e| MonitorError::ConfigError(format!("monitor.events: {e}")))
        })
        .collect()
}

fn parse_target_os(cfg: &RawConfigFile) -> Result<TargetOs> {
    match cfg.monitor.target_os.as_deref() {
        None => Ok(TargetOs::host()),
        Some(s) => s
            .parse()
            .map_err(|e| MonitorError::ConfigError(format!("monitor.targetOs: {e}"))),
    }
}
