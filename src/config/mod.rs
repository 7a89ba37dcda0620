// src/config/mod.rs

//! Configuration loading and validation for file-monitor.
//!
//! Responsibilities:
//! - Define the YAML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate startup invariants such as channel exclusivity (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{
    default_config_path, load_and_validate, load_and_validate_for, load_from_path,
    load_from_str,
};
pub use model::{
    ConfigFile, EmailSection, IgnoreSection, LoggingSection, MonitorSection, RawConfigFile,
    WebhookSection,
};
pub use validate::validate_config;
