use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use elmwatch::build::BuildStatus;
use elmwatch::engine::{BuildId, RuntimeEvent};
use elmwatch::errors::Result;
use elmwatch::exec::BuildBackend;

/// What the runtime asked the backend to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendCall {
    Start(BuildId),
    Cancel(BuildId),
}

/// A fake backend that:
/// - records every start / cancel request
/// - in immediate mode, reports each build as written right away
/// - in deferred mode, leaves completion to the test (cancels still report
///   `Cancelled`, like the real backend).
pub struct FakeBuildBackend {
    runtime_tx: mpsc::Sender<RuntimeEvent>,
    calls: Arc<Mutex<Vec<BackendCall>>>,
    deferred: bool,
}

impl FakeBuildBackend {
    pub fn new(runtime_tx: mpsc::Sender<RuntimeEvent>, calls: Arc<Mutex<Vec<BackendCall>>>) -> Self {
        Self {
            runtime_tx,
            calls,
            deferred: false,
        }
    }

    pub fn deferred(
        runtime_tx: mpsc::Sender<RuntimeEvent>,
        calls: Arc<Mutex<Vec<BackendCall>>>,
    ) -> Self {
        Self {
            runtime_tx,
            calls,
            deferred: true,
        }
    }
}

impl BuildBackend for FakeBuildBackend {
    fn start_build(
        &mut self,
        build_id: BuildId,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move {
            self.calls.lock().unwrap().push(BackendCall::Start(build_id));

            if !self.deferred {
                self.runtime_tx
                    .send(RuntimeEvent::BuildFinished {
                        build_id,
                        status: BuildStatus::Written {
                            path: PathBuf::from("quiz.js"),
                            bytes: 0,
                        },
                    })
                    .await
                    .map_err(anyhow::Error::from)?;
            }
            Ok(())
        })
    }

    fn cancel_build(
        &mut self,
        build_id: BuildId,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move {
            self.calls.lock().unwrap().push(BackendCall::Cancel(build_id));

            if self.deferred {
                self.runtime_tx
                    .send(RuntimeEvent::BuildFinished {
                        build_id,
                        status: BuildStatus::Cancelled,
                    })
                    .await
                    .map_err(anyhow::Error::from)?;
            }
            Ok(())
        })
    }
}
