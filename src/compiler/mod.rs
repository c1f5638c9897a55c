// src/compiler/mod.rs

//! Compiler adapter boundary.
//!
//! elmwatch never interprets source code itself. Everything it knows about
//! compilation goes through the [`Compiler`] trait:
//!
//! - [`Compiler::init`] prepares the toolchain once; failure is fatal.
//! - [`Compiler::compile`] turns one source file into output bytes, or a
//!   [`Diagnostic`] that the build task logs and swallows.
//!
//! [`command::CommandCompiler`] is the production implementation; tests
//! provide fakes.

pub mod command;

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use thiserror::Error;

use crate::errors::Result;

pub use command::CommandCompiler;

/// A recoverable compile failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct Diagnostic {
    /// The source file the compiler was asked to build.
    pub file: PathBuf,
    /// Human-readable compiler output.
    pub message: String,
}

impl Diagnostic {
    pub fn new(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            message: message.into(),
        }
    }
}

pub type CompileResult = std::result::Result<Vec<u8>, Diagnostic>;

/// Trait abstracting the external compiler toolchain.
pub trait Compiler: Send + Sync {
    /// One-time toolchain preparation. Must be idempotent.
    fn init(&self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;

    /// Compile a single source file into output bytes.
    fn compile<'a>(
        &'a self,
        source: &'a Path,
    ) -> Pin<Box<dyn Future<Output = CompileResult> + Send + 'a>>;
}
