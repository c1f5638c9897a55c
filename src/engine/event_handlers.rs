// src/engine/event_handlers.rs

//! Event handling logic for the core runtime.

use tracing::{debug, info, warn};

use crate::build::BuildStatus;
use crate::engine::core::{BuildSlot, WatchState};
use crate::engine::queue::TriggerQueue;
use crate::engine::{BuildId, RuntimeOptions, TriggerReason};
use crate::types::TriggerWhileRunningBehaviour;

/// Command produced by the pure core, to be executed by the outer IO shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreCommand {
    /// Start a build with this id.
    StartBuild(BuildId),
    /// Abort the build with this id; the backend still reports it finished.
    CancelBuild(BuildId),
    /// Request that the runtime exits (used with `exit_when_idle`).
    RequestExit,
}

/// Decision returned by the core after handling a single `RuntimeEvent`.
#[derive(Debug, Clone)]
pub struct CoreStep {
    /// Commands the IO shell should execute, in order.
    pub commands: Vec<CoreCommand>,
    /// Whether the outer runtime loop should keep running.
    pub keep_running: bool,
}

/// Handle a rebuild request.
///
/// - Idle: start a build right away.
/// - Building: fold the trigger into the single pending follow-up build.
///   In cancel mode the running build is also aborted (once).
pub fn handle_build_triggered(
    slot: &mut BuildSlot,
    queue: &mut TriggerQueue,
    reason: TriggerReason,
) -> CoreStep {
    let mut commands = Vec::new();

    match slot.state {
        WatchState::Idle => {
            let build_id = slot.start();
            debug!(build_id, ?reason, "idle; starting build");
            commands.push(CoreCommand::StartBuild(build_id));
        }
        WatchState::Building { build_id } => {
            queue.record_trigger(&reason);

            if queue.behaviour() == TriggerWhileRunningBehaviour::Cancel
                && !slot.cancel_requested
            {
                info!(build_id, "change during build; cancelling current build");
                slot.cancel_requested = true;
                commands.push(CoreCommand::CancelBuild(build_id));
            }
        }
    }

    CoreStep {
        commands,
        keep_running: true,
    }
}

/// Handle the end of a build.
pub fn handle_build_finished(
    slot: &mut BuildSlot,
    queue: &mut TriggerQueue,
    options: &RuntimeOptions,
    build_id: BuildId,
    status: BuildStatus,
) -> CoreStep {
    let mut commands = Vec::new();

    if !slot.finish(build_id) {
        warn!(build_id, state = ?slot.state, "completion for a build that is not running; ignoring");
        return CoreStep {
            commands,
            keep_running: true,
        };
    }

    match &status {
        BuildStatus::Written { path, .. } => {
            debug!(build_id, output = %path.display(), "build finished")
        }
        other => debug!(build_id, status = ?other, "build finished without output"),
    }

    if let Some(pending) = queue.take_pending() {
        let next = slot.start();
        info!(
            build_id = next,
            triggers = pending.triggers,
            files = ?pending.paths,
            "starting queued rebuild"
        );
        commands.push(CoreCommand::StartBuild(next));
    }

    let mut keep_running = true;
    if options.exit_when_idle && slot.state == WatchState::Idle && queue.is_empty() {
        keep_running = false;
        commands.push(CoreCommand::RequestExit);
    }

    CoreStep {
        commands,
        keep_running,
    }
}
