// src/engine/dispatcher.rs

use std::fmt;
use std::future::{self, Future};

use tracing::{debug, error, info, warn};

use crate::channel::NotificationChannel;
use crate::watch::{RawEvent, WatchError, WatchStreams};

use super::core::{Decision, EventPipeline};

/// Result of handing one event to the channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Sent,
    Failed(String),
    /// No channel configured; the event was only logged.
    NoChannel,
}

impl DispatchOutcome {
    pub fn sent(&self) -> bool {
        matches!(self, DispatchOutcome::Sent)
    }
}

/// Counters reported when the dispatcher stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    pub received: usize,
    pub ignored: usize,
    pub passed: usize,
    pub sent: usize,
    pub failed: usize,
    pub backend_errors: usize,
}

/// Drives the pipeline for every backend event and delegates announcements
/// to a [`NotificationChannel`].
///
/// Events are handled strictly one at a time in delivery order; a send
/// blocks the loop until it completes or times out.
pub struct Dispatcher<C: NotificationChannel> {
    pipeline: EventPipeline,
    channel: Option<C>,
    summary: DispatchSummary,
}

impl<C: NotificationChannel> fmt::Debug for Dispatcher<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("pipeline", &self.pipeline)
            .field("channel", &self.channel.as_ref().map(|c| c.name()))
            .field("summary", &self.summary)
            .finish()
    }
}

impl<C: NotificationChannel> Dispatcher<C> {
    pub fn new(pipeline: EventPipeline, channel: Option<C>) -> Self {
        Self {
            pipeline,
            channel,
            summary: DispatchSummary::default(),
        }
    }

    pub fn summary(&self) -> DispatchSummary {
        self.summary
    }

    /// Run until either backend stream closes.
    pub async fn run(self, streams: WatchStreams) -> DispatchSummary {
        self.run_until(streams, future::pending()).await
    }

    /// Main event loop.
    ///
    /// - Consumes `RawEvent`s and `WatchError`s from the backend.
    /// - Stops cleanly when either stream closes or `shutdown` resolves.
    pub async fn run_until<F>(mut self, mut streams: WatchStreams, shutdown: F) -> DispatchSummary
    where
        F: Future<Output = ()>,
    {
        info!("dispatcher started");
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;

                _ = &mut shutdown => {
                    info!("shutdown requested; stopping dispatcher");
                    break;
                }
                maybe_event = streams.events.recv() => match maybe_event {
                    Some(raw) => {
                        self.handle_event(raw).await;
                    }
                    None => {
                        info!("event stream closed; exiting");
                        self.drain_errors(&mut streams);
                        break;
                    }
                },
                maybe_err = streams.errors.recv() => match maybe_err {
                    Some(err) => self.handle_error(err),
                    None => {
                        info!("error stream closed; exiting");
                        break;
                    }
                },
            }
        }

        let s = self.summary;
        info!(
            received = s.received,
            ignored = s.ignored,
            passed = s.passed,
            sent = s.sent,
            failed = s.failed,
            backend_errors = s.backend_errors,
            "dispatcher exiting"
        );
        s
    }

    /// Process one backend event.
    ///
    /// Returns `None` when the event was ignored, otherwise the outcome of
    /// the dispatch attempt. Failures are logged and never propagated.
    pub async fn handle_event(&mut self, raw: RawEvent) -> Option<DispatchOutcome> {
        self.summary.received += 1;
        debug!(path = %raw.path, op = %raw.operation, "received raw event");

        let event = match self.pipeline.evaluate(raw) {
            Decision::Ignored { event, rule } => {
                self.summary.ignored += 1;
                info!(path = %event.path, reason = %rule, "ignoring file event");
                return None;
            }
            Decision::Deliver(event) => event,
        };

        self.summary.passed += 1;
        info!(op = %event.operation, path = %event.path, "processing file event");

        let Some(channel) = self.channel.as_ref() else {
            debug!(path = %event.path, "no notification channel configured");
            return Some(DispatchOutcome::NoChannel);
        };

        let outcome = match channel.send(&event).await {
            Ok(()) => {
                self.summary.sent += 1;
                info!(channel = channel.name(), path = %event.path, "notification sent");
                DispatchOutcome::Sent
            }
            Err(err) => {
                self.summary.failed += 1;
                warn!(
                    channel = channel.name(),
                    path = %event.path,
                    error = %err,
                    "notification failed"
                );
                DispatchOutcome::Failed(err.to_string())
            }
        };
        Some(outcome)
    }

    /// Log an asynchronous backend error; the loop keeps running.
    pub fn handle_error(&mut self, err: WatchError) {
        self.summary.backend_errors += 1;
        error!(error = %err, "watcher error");
    }

    /// Log backend errors still queued after the event stream closed.
    fn drain_errors(&mut self, streams: &mut WatchStreams) {
        while let Ok(err) = streams.errors.try_recv() {
            self.handle_error(err);
        }
    }
}
