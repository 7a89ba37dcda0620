// src/engine/core.rs

//! Pure per-event decision logic.
//!
//! [`EventPipeline`] turns a [`RawEvent`] into a [`Decision`]: normalize the
//! path, then run the ignore rules. It has **no** channels, no Tokio types,
//! and performs no IO, so it can be unit tested directly. The async shell
//! (`engine::dispatcher::Dispatcher`) acts on the decision.

use crate::config::model::ConfigFile;
use crate::types::TargetOs;
use crate::watch::{IgnoreMatcher, IgnoreRule, IgnoreVerdict, NormalizedEvent, RawEvent};

/// What to do with one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Dropped by an ignore rule; only logged.
    Ignored {
        event: NormalizedEvent,
        rule: IgnoreRule,
    },
    /// Survived filtering; hand to the notification channel.
    Deliver(NormalizedEvent),
}

#[derive(Debug, Clone)]
pub struct EventPipeline {
    target_os: TargetOs,
    matcher: IgnoreMatcher,
}

impl EventPipeline {
    pub fn new(target_os: TargetOs, matcher: IgnoreMatcher) -> Self {
        Self { target_os, matcher }
    }

    pub fn from_config(cfg: &ConfigFile) -> Self {
        Self::new(cfg.target_os(), IgnoreMatcher::from_config(cfg))
    }

    pub fn evaluate(&self, raw: RawEvent) -> Decision {
        let event = raw.normalize(self.target_os);
        match self.matcher.should_ignore(&event.path) {
            IgnoreVerdict::Ignored(rule) => Decision::Ignored { event, rule },
            IgnoreVerdict::Pass => Decision::Deliver(event),
        }
    }
}
