// src/errors.rs

//! Crate-wide error aliases and helpers.
//!
//! Compile failures are *not* represented here: they are
//! [`crate::compiler::Diagnostic`]s, which the build task logs and swallows.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ElmwatchError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Cycle detected in task graph: {0}")]
    DagCycle(String),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// The compiler toolchain could not be prepared. Always fatal.
    #[error("Setup failed: {0}")]
    Setup(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, ElmwatchError>;
