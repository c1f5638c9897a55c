// src/engine/mod.rs

//! Watch-loop engine.
//!
//! This module ties together:
//! - the trigger queue (what happens when changes arrive mid-build)
//! - the pure core state machine ([`core`]) deciding when builds start
//! - the async IO shell ([`runtime`]) that reacts to:
//!   - file-watch triggers
//!   - build completion events
//!   - shutdown signals
//! - the session wiring ([`session`]) used by the `default` task

use std::path::PathBuf;

use crate::build::BuildStatus;

/// Monotonically increasing identifier of a build started by the watch loop.
pub type BuildId = u64;

/// Why a build was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerReason {
    /// Requested programmatically (tests, startup).
    Manual,
    /// A watched file changed.
    FileWatch { path: PathBuf },
}

/// Runtime options used by both the core and the async shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuntimeOptions {
    /// If true, exit the runtime once no build is running and nothing is
    /// queued.
    pub exit_when_idle: bool,
}

/// Events flowing into the runtime from the watcher, backend and signals.
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    /// A rebuild should happen.
    BuildTriggered { reason: TriggerReason },
    /// A build started by the backend ended.
    BuildFinished {
        build_id: BuildId,
        status: BuildStatus,
    },
    /// Graceful shutdown requested (e.g. Ctrl-C).
    ShutdownRequested,
}

pub mod core;
pub mod event_handlers;
pub mod queue;
pub mod runtime;
pub mod session;

pub use self::core::{WatchCore, WatchState};
pub use event_handlers::{CoreCommand, CoreStep};
pub use queue::{PendingBuild, TriggerQueue};
pub use crate::types::TriggerWhileRunningBehaviour;
pub use runtime::Runtime;
