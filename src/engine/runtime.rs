// src/engine/runtime.rs

use std::fmt;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::errors::Result;
use crate::exec::BuildBackend;

use super::core::WatchCore;
use super::{CoreCommand, RuntimeEvent};

/// Drives the [`WatchCore`] in response to `RuntimeEvent`s and delegates the
/// builds themselves to a [`BuildBackend`].
///
/// All watch-loop semantics live in the core; this struct only moves events
/// from the channel into the core and commands from the core into the
/// backend.
pub struct Runtime<B: BuildBackend> {
    core: WatchCore,
    event_rx: mpsc::Receiver<RuntimeEvent>,
    backend: B,
}

impl<B: BuildBackend> fmt::Debug for Runtime<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("core", &self.core)
            .finish_non_exhaustive()
    }
}

impl<B: BuildBackend> Runtime<B> {
    pub fn new(core: WatchCore, event_rx: mpsc::Receiver<RuntimeEvent>, backend: B) -> Self {
        Self {
            core,
            event_rx,
            backend,
        }
    }

    /// Main event loop. Returns the backend so callers can inspect it.
    pub async fn run(mut self) -> Result<B> {
        info!("watch runtime started");

        loop {
            let event = match self.event_rx.recv().await {
                Some(e) => e,
                None => {
                    info!("runtime event channel closed; exiting");
                    break;
                }
            };

            debug!(?event, "runtime received event");

            let step = self.core.step(event);

            for command in step.commands {
                self.execute_command(command).await?;
            }

            if !step.keep_running {
                info!("core requested exit; stopping runtime");
                break;
            }
        }

        info!("runtime exiting");
        Ok(self.backend)
    }

    async fn execute_command(&mut self, command: CoreCommand) -> Result<()> {
        match command {
            CoreCommand::StartBuild(build_id) => {
                self.backend.start_build(build_id).await?;
            }
            CoreCommand::CancelBuild(build_id) => {
                self.backend.cancel_build(build_id).await?;
            }
            CoreCommand::RequestExit => {
                debug!("core issued RequestExit command");
            }
        }
        Ok(())
    }
}
