// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{ElmwatchError, Result};

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and run validation.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Load the raw config at `path`, or fall back to built-in defaults.
///
/// A missing file is only acceptable when the user did not name it
/// explicitly (`explicit = false`); an explicitly requested config that does
/// not exist is a configuration error.
pub fn load_or_default(path: impl AsRef<Path>, explicit: bool) -> Result<RawConfigFile> {
    let path = path.as_ref();

    if path.is_file() {
        return load_from_path(path);
    }

    if explicit {
        return Err(ElmwatchError::ConfigError(format!(
            "config file {:?} does not exist",
            path
        )));
    }

    debug!(?path, "no config file found; using built-in defaults");
    Ok(RawConfigFile::default())
}

/// Default config location: `Elmwatch.toml` in the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Elmwatch.toml")
}
