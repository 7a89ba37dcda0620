// src/watch/event.rs

//! Event types flowing out of the watch backend, and the mapping from
//! `notify` events onto them.

use std::fmt;
use std::path::Path;

use notify::event::{EventKind, ModifyKind, RenameMode};

use crate::types::{Operation, TargetOs};
use crate::watch::path_utils::normalize;

/// One filesystem change as reported by the backend, path not yet normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEvent {
    pub path: String,
    pub operation: Operation,
}

impl RawEvent {
    pub fn new(path: impl Into<String>, operation: Operation) -> Self {
        Self {
            path: path.into(),
            operation,
        }
    }

    /// Rewrite the path into the canonical form for `target`.
    pub fn normalize(self, target: TargetOs) -> NormalizedEvent {
        NormalizedEvent {
            path: normalize(&self.path, target),
            operation: self.operation,
        }
    }
}

/// A [`RawEvent`] whose path is in canonical form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedEvent {
    pub path: String,
    pub operation: Operation,
}

impl fmt::Display for NormalizedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.operation, self.path)
    }
}

/// Error reported asynchronously by the watch backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchError {
    pub message: String,
}

impl WatchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for WatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<notify::Error> for WatchError {
    fn from(err: notify::Error) -> Self {
        WatchError::new(err.to_string())
    }
}

/// Map a `notify` kind onto an [`Operation`]; `None` for kinds we never report
/// (access events, unknown kinds).
pub fn operation_for(kind: &EventKind) -> Option<Operation> {
    match kind {
        EventKind::Create(_) => Some(Operation::Create),
        EventKind::Modify(ModifyKind::Metadata(_)) => Some(Operation::Chmod),
        EventKind::Modify(ModifyKind::Name(RenameMode::To)) => Some(Operation::Create),
        EventKind::Modify(ModifyKind::Name(_)) => Some(Operation::Rename),
        EventKind::Modify(_) => Some(Operation::Write),
        EventKind::Remove(_) => Some(Operation::Remove),
        EventKind::Access(_) | EventKind::Any | EventKind::Other => None,
    }
}

/// Split a `notify` event into one [`RawEvent`] per affected path.
///
/// A rename reported with both paths yields `RENAME` for the old path and
/// `CREATE` for the new one.
pub fn raw_events_from_notify(event: &notify::Event) -> Vec<RawEvent> {
    let Some(operation) = operation_for(&event.kind) else {
        return Vec::new();
    };

    let both = matches!(
        event.kind,
        EventKind::Modify(ModifyKind::Name(RenameMode::Both))
    );

    event
        .paths
        .iter()
        .enumerate()
        .map(|(idx, path)| {
            let op = if both && idx > 0 {
                Operation::Create
            } else {
                operation
            };
            RawEvent::new(path_string(path), op)
        })
        .collect()
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
