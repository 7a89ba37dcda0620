// src/channel/mod.rs

//! Outbound notification channels.
//!
//! The dispatcher talks to a single `NotificationChannel` chosen once at
//! startup instead of branching on the configuration per event. This makes
//! it easy to swap in a fake channel in tests while keeping the production
//! implementations here:
//!
//! - [`webhook`]: form post to a push provider (ServerChan).
//! - [`email`]: SMTP delivery.
//! - [`message`]: the text both of them send.

pub mod email;
pub mod message;
pub mod webhook;

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use crate::config::model::ConfigFile;
use crate::errors::Result;
use crate::types::WebhookProvider;
use crate::watch::NormalizedEvent;

pub use email::EmailChannel;
pub use webhook::WebhookChannel;

/// Trait abstracting how a surviving event is announced.
///
/// Production code uses [`WebhookChannel`] or [`EmailChannel`]; tests can
/// provide their own implementation that records events instead.
pub trait NotificationChannel: Send + Sync {
    /// Short name used in log lines.
    fn name(&self) -> &'static str;

    /// Announce `event`. Errors are reported to the caller, never retried.
    fn send<'a>(
        &'a self,
        event: &'a NormalizedEvent,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;
}

impl<C: NotificationChannel + ?Sized> NotificationChannel for Box<C> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn send<'a>(
        &'a self,
        event: &'a NormalizedEvent,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        (**self).send(event)
    }
}

/// Which channel the configuration selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    Webhook(WebhookProvider),
    Email,
    None,
}

impl ChannelKind {
    /// Webhook wins if enabled with a known provider, then email, else none.
    ///
    /// Validation already rejects configs with both enabled.
    pub fn from_config(cfg: &ConfigFile) -> Self {
        match (cfg.webhook().enabled, cfg.webhook_provider()) {
            (true, Some(provider)) => ChannelKind::Webhook(provider),
            _ if cfg.email().enabled => ChannelKind::Email,
            _ => ChannelKind::None,
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelKind::Webhook(provider) => write!(f, "webhook ({provider})"),
            ChannelKind::Email => f.write_str("email"),
            ChannelKind::None => f.write_str("none"),
        }
    }
}

/// Construct the configured channel, or `None` when notifications are off.
pub fn build_channel(cfg: &ConfigFile) -> Result<Option<Box<dyn NotificationChannel>>> {
    let channel: Option<Box<dyn NotificationChannel>> = match ChannelKind::from_config(cfg) {
        ChannelKind::Webhook(provider) => Some(Box::new(WebhookChannel::from_config(
            cfg.webhook(),
            provider,
        )?)),
        ChannelKind::Email => Some(Box::new(EmailChannel::from_config(cfg.email())?)),
        ChannelKind::None => None,
    };
    Ok(channel)
}
