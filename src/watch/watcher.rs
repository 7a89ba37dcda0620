// src/watch/watcher.rs

use std::path::Path;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::errors::Result;
use crate::watch::event::{raw_events_from_notify, RawEvent, WatchError};

/// Handle for the filesystem watcher.
///
/// This exists mainly so the underlying `RecommendedWatcher` is kept alive for
/// as long as needed. Dropping this handle stops file watching and closes
/// both [`WatchStreams`].
pub struct WatcherHandle {
    _inner: RecommendedWatcher,
    watched: Vec<String>,
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle")
            .field("watched", &self.watched)
            .finish_non_exhaustive()
    }
}

impl WatcherHandle {
    /// Directories that were registered successfully.
    pub fn watched(&self) -> &[String] {
        &self.watched
    }
}

/// The two streams produced by the backend.
#[derive(Debug)]
pub struct WatchStreams {
    pub events: mpsc::UnboundedReceiver<RawEvent>,
    pub errors: mpsc::UnboundedReceiver<WatchError>,
}

/// Create the platform watcher and register every directory non-recursively.
///
/// Failing to construct the watcher is fatal. Failing to register a single
/// directory is logged and skipped, so the service keeps whatever coverage
/// it could get.
pub fn spawn_watcher(directories: &[String]) -> Result<(WatcherHandle, WatchStreams)> {
    let (event_tx, event_rx) = mpsc::unbounded_channel::<RawEvent>();
    let (error_tx, error_rx) = mpsc::unbounded_channel::<WatchError>();

    // Closure called synchronously by notify whenever an event arrives.
    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                for raw in raw_events_from_notify(&event) {
                    if event_tx.send(raw).is_err() {
                        // Dispatcher is gone; nothing left to deliver to.
                        return;
                    }
                }
            }
            Err(err) => {
                let _ = error_tx.send(WatchError::from(err));
            }
        },
        Config::default(),
    )?;

    let watched = register_directories(&mut watcher, directories);

    if watched.is_empty() {
        warn!("no directory could be watched; waiting for events anyway");
    }

    Ok((
        WatcherHandle {
            _inner: watcher,
            watched,
        },
        WatchStreams {
            events: event_rx,
            errors: error_rx,
        },
    ))
}

/// Register each directory with `watcher`, returning those that succeeded.
pub fn register_directories<W: Watcher>(watcher: &mut W, directories: &[String]) -> Vec<String> {
    let mut watched = Vec::with_capacity(directories.len());
    for dir in directories {
        match watcher.watch(Path::new(dir), RecursiveMode::NonRecursive) {
            Ok(()) => {
                info!(directory = %dir, "watching directory");
                watched.push(dir.clone());
            }
            Err(err) => {
                warn!(directory = %dir, error = %err, "failed to watch directory");
            }
        }
    }
    watched
}
