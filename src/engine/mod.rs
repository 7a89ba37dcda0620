// src/engine/mod.rs

//! Event dispatch engine for file-monitor.
//!
//! This module ties together:
//! - the pure per-event pipeline (normalize, then filter) in [`core`]
//! - the async loop that multiplexes the backend's event and error streams
//!   and invokes the selected notification channel, in [`dispatcher`]

pub mod core;
pub mod dispatcher;

pub use self::core::{Decision, EventPipeline};
pub use self::dispatcher::{DispatchOutcome, DispatchSummary, Dispatcher};
