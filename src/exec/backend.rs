// src/exec/backend.rs

//! Pluggable build backend abstraction.
//!
//! The runtime talks to a `BuildBackend` instead of calling the build task
//! directly. Every build started through a backend must eventually produce
//! exactly one `RuntimeEvent::BuildFinished` carrying its id, including
//! builds that were cancelled.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::build::BuildSettings;
use crate::compiler::Compiler;
use crate::engine::{BuildId, RuntimeEvent};
use crate::errors::Result;
use crate::fs::FileSystem;

use super::build_runner::run_build_task;

/// Trait abstracting how builds are executed.
pub trait BuildBackend: Send {
    /// Start the build with the given id.
    fn start_build(
        &mut self,
        build_id: BuildId,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;

    /// Abort the build with the given id, if it is still running.
    fn cancel_build(
        &mut self,
        build_id: BuildId,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

/// Internal handle for the build currently in flight.
struct ActiveBuild {
    build_id: BuildId,
    cancel: Option<oneshot::Sender<()>>,
}

/// Real backend used in production: each build runs in its own Tokio task.
pub struct RealBuildBackend {
    compiler: Arc<dyn Compiler>,
    fs: Arc<dyn FileSystem>,
    settings: Arc<BuildSettings>,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
    active: Option<ActiveBuild>,
}

impl RealBuildBackend {
    pub fn new(
        compiler: Arc<dyn Compiler>,
        fs: Arc<dyn FileSystem>,
        settings: BuildSettings,
        runtime_tx: mpsc::Sender<RuntimeEvent>,
    ) -> Self {
        Self {
            compiler,
            fs,
            settings: Arc::new(settings),
            runtime_tx,
            active: None,
        }
    }
}

impl BuildBackend for RealBuildBackend {
    fn start_build(
        &mut self,
        build_id: BuildId,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move {
            let (cancel_tx, cancel_rx) = oneshot::channel::<()>();

            tokio::spawn(run_build_task(
                build_id,
                Arc::clone(&self.compiler),
                Arc::clone(&self.fs),
                Arc::clone(&self.settings),
                self.runtime_tx.clone(),
                cancel_rx,
            ));

            self.active = Some(ActiveBuild {
                build_id,
                cancel: Some(cancel_tx),
            });
            Ok(())
        })
    }

    fn cancel_build(
        &mut self,
        build_id: BuildId,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move {
            match self.active.as_mut() {
                Some(active) if active.build_id == build_id => {
                    if let Some(cancel) = active.cancel.take() {
                        if cancel.send(()).is_err() {
                            debug!(build_id, "build already finished while cancelling");
                        }
                    }
                }
                _ => debug!(build_id, "cancel for a build that is not active; ignoring"),
            }
            Ok(())
        })
    }
}
