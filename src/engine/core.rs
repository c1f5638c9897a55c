// src/engine/core.rs

//! Pure core runtime state machine.
//!
//! [`WatchCore`] consumes [`RuntimeEvent`]s and produces:
//! - an updated state (`Idle` or `Building`)
//! - a list of commands describing what the IO shell should do next
//!
//! It owns no channels, no Tokio types and performs no IO, so the
//! serialization rules of the watch loop can be tested directly.

use crate::engine::event_handlers::{
    handle_build_finished, handle_build_triggered, CoreStep,
};
use crate::engine::queue::TriggerQueue;
use crate::engine::{BuildId, RuntimeEvent, RuntimeOptions};
use crate::types::TriggerWhileRunningBehaviour;

/// Observable state of the watch loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    Idle,
    Building { build_id: BuildId },
}

/// The single build slot: at most one build is in flight.
#[derive(Debug)]
pub(crate) struct BuildSlot {
    pub(crate) state: WatchState,
    last_build_id: BuildId,
    /// Whether a cancel was already requested for the current build.
    pub(crate) cancel_requested: bool,
}

impl BuildSlot {
    fn new() -> Self {
        Self {
            state: WatchState::Idle,
            last_build_id: 0,
            cancel_requested: false,
        }
    }

    /// Move to `Building` with a fresh id.
    pub(crate) fn start(&mut self) -> BuildId {
        self.last_build_id += 1;
        self.state = WatchState::Building {
            build_id: self.last_build_id,
        };
        self.cancel_requested = false;
        self.last_build_id
    }

    /// Move back to `Idle` if `build_id` is the build in flight.
    pub(crate) fn finish(&mut self, build_id: BuildId) -> bool {
        match self.state {
            WatchState::Building { build_id: current } if current == build_id => {
                self.state = WatchState::Idle;
                self.cancel_requested = false;
                true
            }
            _ => false,
        }
    }
}

/// Pure core runtime state.
#[derive(Debug)]
pub struct WatchCore {
    slot: BuildSlot,
    queue: TriggerQueue,
    options: RuntimeOptions,
}

impl WatchCore {
    pub fn new(behaviour: TriggerWhileRunningBehaviour, options: RuntimeOptions) -> Self {
        Self {
            slot: BuildSlot::new(),
            queue: TriggerQueue::new(behaviour),
            options,
        }
    }

    pub fn state(&self) -> WatchState {
        self.slot.state
    }

    pub fn is_idle(&self) -> bool {
        self.slot.state == WatchState::Idle
    }

    /// Expose queue emptiness (for tests).
    pub fn queue_is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Handle a single runtime event, updating core state and returning the
    /// resulting commands for the IO shell.
    pub fn step(&mut self, event: RuntimeEvent) -> CoreStep {
        match event {
            RuntimeEvent::BuildTriggered { reason } => {
                handle_build_triggered(&mut self.slot, &mut self.queue, reason)
            }
            RuntimeEvent::BuildFinished { build_id, status } => handle_build_finished(
                &mut self.slot,
                &mut self.queue,
                &self.options,
                build_id,
                status,
            ),
            RuntimeEvent::ShutdownRequested => CoreStep {
                commands: Vec::new(),
                keep_running: false,
            },
        }
    }
}
