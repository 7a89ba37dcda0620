// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::config::validate::validate_config;
use crate::errors::Result;
use crate::types::TargetOs;

/// File names probed (in order) when no `--config` is given.
pub const DEFAULT_CONFIG_NAMES: [&str; 2] = ["config.yaml", "config.yml"];

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs YAML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    load_from_str(&contents)
}

/// Parse YAML text into a `RawConfigFile`.
///
/// An empty document deserializes to all-default sections.
pub fn load_from_str(contents: &str) -> Result<RawConfigFile> {
    if contents.trim().is_empty() {
        return Ok(RawConfigFile::default());
    }
    let config: RawConfigFile = serde_yaml::from_str(contents)?;
    Ok(config)
}

/// Load a configuration file from path and validate it.
///
/// - Reads YAML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Checks for:
///   - an empty directory list,
///   - both notification channels enabled,
///   - unknown webhook providers and incomplete channel settings,
///   - unknown event kinds.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    load_and_validate_for(path, None)
}

/// Same as [`load_and_validate`] with an explicit target path convention.
pub fn load_and_validate_for(
    path: impl AsRef<Path>,
    target_override: Option<TargetOs>,
) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    validate_config(raw_config, target_override)
}

/// Resolve the config path used when none is given explicitly.
///
/// Looks for `config.yaml`, then `config.yml`, in `dir`. If neither exists
/// the first name is returned so that the load error names a real path.
pub fn default_config_path(dir: impl AsRef<Path>) -> PathBuf {
    let dir = dir.as_ref();
    DEFAULT_CONFIG_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
        .unwrap_or_else(|| dir.join(DEFAULT_CONFIG_NAMES[0]))
}
