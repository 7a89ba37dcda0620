// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("no directories to monitor")]
    NoDirectories,

    #[error(
        "configuration conflict: email and webhook notifications cannot both be enabled"
    )]
    ChannelConflict,

    #[error("unsupported webhook provider: {0:?} (supported: \"serverchan\")")]
    UnsupportedProvider(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("watch backend error: {0}")]
    WatchError(#[from] notify::Error),

    #[error("failed to send request: {0}")]
    HttpError(String),

    #[error("unexpected status code: {0}")]
    UnexpectedStatus(u16),

    #[error("email delivery failed: {0}")]
    EmailError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<reqwest::Error> for MonitorError {
    fn from(err: reqwest::Error) -> Self {
        MonitorError::HttpError(err.to_string())
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, MonitorError>;
