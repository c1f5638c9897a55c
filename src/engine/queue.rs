// src/engine/queue.rs

use std::collections::BTreeSet;
use std::path::PathBuf;

use tracing::debug;

use crate::types::TriggerWhileRunningBehaviour;

use super::TriggerReason;

/// A follow-up build waiting for the current one to finish.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingBuild {
    /// How many triggers were folded into this build.
    pub triggers: usize,
    /// Changed files reported by those triggers.
    pub paths: BTreeSet<PathBuf>,
}

/// Single-slot queue of triggers that arrive while a build is running.
///
/// Every trigger recorded during one build lands in the same slot, so
/// however many changes arrive, exactly one follow-up build runs after the
/// current one. Both behaviours queue the same way; they differ only in
/// whether the core also cancels the running build.
#[derive(Debug)]
pub struct TriggerQueue {
    behaviour: TriggerWhileRunningBehaviour,
    pending: Option<PendingBuild>,
}

impl TriggerQueue {
    pub fn new(behaviour: TriggerWhileRunningBehaviour) -> Self {
        Self {
            behaviour,
            pending: None,
        }
    }

    /// Returns true if there are no queued triggers.
    pub fn is_empty(&self) -> bool {
        self.pending.is_none()
    }

    /// Returns the configured behaviour.
    pub fn behaviour(&self) -> TriggerWhileRunningBehaviour {
        self.behaviour
    }

    /// Record that a rebuild was requested while a build is in progress.
    pub fn record_trigger(&mut self, reason: &TriggerReason) {
        let slot = self.pending.get_or_insert_with(PendingBuild::default);
        slot.triggers += 1;
        if let TriggerReason::FileWatch { path } = reason {
            slot.paths.insert(path.clone());
        }

        debug!(
            triggers = slot.triggers,
            files = slot.paths.len(),
            behaviour = ?self.behaviour,
            "coalesced trigger into pending follow-up build"
        );
    }

    /// Take the pending follow-up build, leaving the queue empty.
    pub fn take_pending(&mut self) -> Option<PendingBuild> {
        self.pending.take()
    }
}
