use serde::Deserialize;

/// Behaviour when a change arrives while a build is already in progress.
///
/// - `Queue`: remember the trigger and start one follow-up build when the
///   current one finishes (default behaviour).
/// - `Cancel`: abort the running build (its output is never written) and
///   start a fresh build as soon as the abort has been acknowledged.
///
/// In both modes any number of triggers received during a single build
/// collapse into one pending follow-up build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerWhileRunningBehaviour {
    Queue,
    Cancel,
}

impl Default for TriggerWhileRunningBehaviour {
    fn default() -> Self {
        TriggerWhileRunningBehaviour::Queue
    }
}
