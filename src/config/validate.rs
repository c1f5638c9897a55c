// src/config/validate.rs

use std::path::{Component, Path};

use globset::Glob;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{ElmwatchError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::ElmwatchError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_build_section(cfg)?;
    validate_compiler_section(cfg)?;
    validate_watch_section(cfg)?;
    Ok(())
}

fn validate_build_section(cfg: &RawConfigFile) -> Result<()> {
    if cfg.build.source.trim().is_empty() {
        return Err(ElmwatchError::ConfigError(
            "[build].source must not be empty".to_string(),
        ));
    }

    let output = cfg.build.output.trim();
    if output.is_empty() {
        return Err(ElmwatchError::ConfigError(
            "[build].output must not be empty".to_string(),
        ));
    }
    if output != cfg.build.output {
        return Err(ElmwatchError::ConfigError(format!(
            "[build].output must not have leading or trailing whitespace (got '{}')",
            cfg.build.output
        )));
    }

    // The output is a file *name*; its directory comes from `dest`.
    let mut components = Path::new(output).components();
    let is_bare_name = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if !is_bare_name || output.contains('/') || output.contains('\\') {
        return Err(ElmwatchError::ConfigError(format!(
            "[build].output must be a bare file name (got '{}'); use [build].dest for the directory",
            cfg.build.output
        )));
    }

    Ok(())
}

fn validate_compiler_section(cfg: &RawConfigFile) -> Result<()> {
    let cmd = cfg.compiler.cmd.trim();
    if cmd.is_empty() {
        return Err(ElmwatchError::ConfigError(
            "[compiler].cmd must not be empty".to_string(),
        ));
    }

    for placeholder in ["{source}", "{output}"] {
        if !cmd.contains(placeholder) {
            return Err(ElmwatchError::ConfigError(format!(
                "[compiler].cmd must contain the {placeholder} placeholder (got '{cmd}')"
            )));
        }
    }

    Ok(())
}

fn validate_watch_section(cfg: &RawConfigFile) -> Result<()> {
    if cfg.watch.patterns.is_empty() {
        return Err(ElmwatchError::ConfigError(
            "[watch].patterns must contain at least one glob".to_string(),
        ));
    }

    for pat in cfg.watch.patterns.iter().chain(cfg.watch.exclude.iter()) {
        Glob::new(pat).map_err(|e| {
            ElmwatchError::ConfigError(format!("invalid glob pattern '{pat}': {e}"))
        })?;
    }

    Ok(())
}
