// src/exec/mod.rs

//! Build execution layer for the watch loop.
//!
//! - [`backend`] provides the `BuildBackend` trait and the production
//!   `RealBuildBackend`, which tests replace with a fake.
//! - [`build_runner`] runs one build as a cancellable Tokio task and reports
//!   back to the runtime via `RuntimeEvent`s.

pub mod backend;
pub mod build_runner;

pub use backend::{BuildBackend, RealBuildBackend};
