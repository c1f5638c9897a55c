// src/exec/build_runner.rs

//! A single watch-loop build.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info};

use crate::build::{run_build, BuildSettings, BuildStatus};
use crate::compiler::Compiler;
use crate::engine::{BuildId, RuntimeEvent};
use crate::fs::FileSystem;

/// Run one build and report `BuildFinished` to the runtime.
///
/// - Compile failures are already swallowed by [`run_build`].
/// - A write failure is logged and reported as `WriteFailed`; the watch loop
///   keeps going.
/// - If the cancel channel fires while the compiler is running, the compile
///   future is dropped (killing the compiler process) and the build reports
///   `Cancelled` without touching the output.
pub async fn run_build_task(
    build_id: BuildId,
    compiler: Arc<dyn Compiler>,
    fs: Arc<dyn FileSystem>,
    settings: Arc<BuildSettings>,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
    mut cancel_rx: oneshot::Receiver<()>,
) {
    let status = tokio::select! {
        result = run_build(compiler.as_ref(), fs.as_ref(), &settings) => match result {
            Ok(run) => run.status,
            Err(err) => {
                error!(build_id, error = %err, "could not write build output");
                BuildStatus::WriteFailed
            }
        },

        cancel = &mut cancel_rx => {
            match cancel {
                Ok(()) => info!(build_id, "build cancelled"),
                Err(_) => debug!(build_id, "backend dropped; abandoning build"),
            }
            BuildStatus::Cancelled
        }
    };

    if let Err(err) = runtime_tx
        .send(RuntimeEvent::BuildFinished { build_id, status })
        .await
    {
        debug!(build_id, error = %err, "runtime gone; dropping BuildFinished");
    }
}
