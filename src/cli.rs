// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

use crate::config::RawConfigFile;

/// Command-line arguments for `elmwatch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "elmwatch",
    version,
    about = "Compile an Elm entry module to a fixed output file, and rebuild on change.",
    long_about = None
)]
pub struct CliArgs {
    /// Task to run: `init`, `build` or `default` (build, then watch).
    #[arg(value_name = "TASK", default_value = "default")]
    pub task: String,

    /// Path to the config file (TOML).
    ///
    /// Default: `Elmwatch.toml` in the current working directory, or
    /// built-in defaults if that file does not exist.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Override `[build].source`.
    #[arg(long, value_name = "FILE")]
    pub source: Option<String>,

    /// Override `[build].output` (a file name).
    #[arg(long, value_name = "NAME")]
    pub output: Option<String>,

    /// Override `[build].dest`.
    #[arg(long, value_name = "DIR")]
    pub dest: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `ELMWATCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Print the resolved settings and task plan, but don't run anything.
    #[arg(long)]
    pub dry_run: bool,
}

impl CliArgs {
    /// Apply `--source`, `--output` and `--dest` on top of a loaded config.
    pub fn apply_overrides(&self, raw: &mut RawConfigFile) {
        if let Some(source) = &self.source {
            raw.build.source = source.clone();
        }
        if let Some(output) = &self.output {
            raw.build.output = output.clone();
        }
        if let Some(dest) = &self.dest {
            raw.build.dest = dest.clone();
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
