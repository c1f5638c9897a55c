// src/build/mod.rs

//! The build task: one compile-and-write cycle.
//!
//! Compile failures are swallowed here: they are printed, logged, and
//! reported as [`BuildStatus::CompileFailed`] inside an `Ok`. Only a failure
//! to write the output escapes as an error.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::compiler::{Compiler, Diagnostic};
use crate::errors::{ElmwatchError, Result};
use crate::fs::FileSystem;

/// Resolved input/output locations for the build task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSettings {
    /// Project root; relative paths in the config are resolved against it.
    pub root: PathBuf,
    /// The single source file handed to the compiler.
    pub source: PathBuf,
    /// Fixed output file name.
    pub output: String,
    /// Directory the output is written into.
    pub dest: PathBuf,
}

impl BuildSettings {
    /// Full path of the output file.
    pub fn target(&self) -> PathBuf {
        self.dest.join(&self.output)
    }
}

/// How a single build ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildStatus {
    /// Output written to `path`.
    Written { path: PathBuf, bytes: usize },
    /// The compiler rejected the source; the output was left untouched.
    CompileFailed,
    /// Aborted by the watch loop before the compiler finished.
    Cancelled,
    /// The compile succeeded but the output could not be written.
    WriteFailed,
}

impl BuildStatus {
    pub fn is_written(&self) -> bool {
        matches!(self, BuildStatus::Written { .. })
    }
}

/// Ephemeral record of one build task invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRun {
    pub source: PathBuf,
    pub status: BuildStatus,
    pub diagnostic: Option<String>,
}

/// Compile `settings.source` and write the result to `settings.target()`.
///
/// Returns `Ok` for both successful and failed compiles. An `Err` means the
/// compiled bytes could not be written.
pub async fn run_build(
    compiler: &dyn Compiler,
    fs: &dyn FileSystem,
    settings: &BuildSettings,
) -> Result<BuildRun> {
    let source = settings.source.clone();
    info!(source = %source.display(), "building");

    match compiler.compile(&source).await {
        Ok(bytes) => {
            let target = settings.target();
            fs.write(&target, &bytes).map_err(|e| {
                ElmwatchError::Other(e.context(format!("writing build output {:?}", target)))
            })?;

            info!(
                source = %source.display(),
                output = %target.display(),
                bytes = bytes.len(),
                "build succeeded"
            );

            Ok(BuildRun {
                source,
                status: BuildStatus::Written {
                    path: target,
                    bytes: bytes.len(),
                },
                diagnostic: None,
            })
        }
        Err(diagnostic) => {
            report_diagnostic(&diagnostic);
            Ok(BuildRun {
                source,
                status: BuildStatus::CompileFailed,
                diagnostic: Some(diagnostic.message),
            })
        }
    }
}

/// Console sink for compile failures. The compiler's own text goes to
/// stdout verbatim; the structured record goes to the log.
fn report_diagnostic(diagnostic: &Diagnostic) {
    println!("{}", diagnostic.message);
    warn!(
        source = %diagnostic.file.display(),
        "build failed; keeping previous output"
    );
}
