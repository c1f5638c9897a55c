// src/config/mod.rs

//! Configuration loading and validation for elmwatch.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk, falling back to built-in defaults
//!   (`loader.rs`).
//! - Validate basic invariants like file-name and glob sanity (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path, load_or_default};
pub use model::{
    BuildSection, CompilerSection, ConfigFile, ConfigSection, RawConfigFile, WatchSection,
};
