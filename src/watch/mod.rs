// src/watch/mod.rs

//! File watching and event filtering.
//!
//! This module is responsible for:
//! - Wiring up a cross-platform filesystem watcher (`notify`) that emits
//!   one [`RawEvent`] per changed path plus a stream of backend errors.
//! - Normalizing paths into the POSIX or Windows convention.
//! - Compiling and evaluating the ignore rules.
//!
//! It does **not** know about notification channels; dispatch lives in
//! [`crate::engine`].

pub mod event;
pub mod ignore;
pub mod path_utils;
pub mod watcher;

pub use event::{NormalizedEvent, RawEvent, WatchError};
pub use ignore::{should_ignore, IgnoreMatcher, IgnoreRule, IgnoreVerdict};
pub use path_utils::normalize;
pub use watcher::{register_directories, spawn_watcher, WatchStreams, WatcherHandle};
