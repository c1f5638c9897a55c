// tests/property_watch_core.rs

use std::path::PathBuf;

use proptest::prelude::*;

use elmwatch::build::BuildStatus;
use elmwatch::engine::{
    CoreCommand, RuntimeEvent, RuntimeOptions, TriggerReason, TriggerWhileRunningBehaviour,
    WatchCore, WatchState,
};

#[derive(Debug, Clone, Copy)]
enum Op {
    Change,
    FinishCurrent,
    FinishStale,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Change),
        2 => Just(Op::FinishCurrent),
        1 => Just(Op::FinishStale),
    ]
}

fn behaviour_strategy() -> impl Strategy<Value = TriggerWhileRunningBehaviour> {
    prop_oneof![
        Just(TriggerWhileRunningBehaviour::Queue),
        Just(TriggerWhileRunningBehaviour::Cancel),
    ]
}

fn starts(commands: &[CoreCommand]) -> Vec<u64> {
    commands
        .iter()
        .filter_map(|c| match c {
            CoreCommand::StartBuild(id) => Some(*id),
            _ => None,
        })
        .collect()
}

proptest! {
    /// At most one build is in flight, ids only grow, and no change that
    /// arrives mid-build is lost.
    #[test]
    fn builds_are_serialized_and_no_change_is_lost(
        behaviour in behaviour_strategy(),
        ops in proptest::collection::vec(op_strategy(), 1..64),
    ) {
        let mut core = WatchCore::new(behaviour, RuntimeOptions::default());
        let mut last_id = 0u64;
        let mut pending = false;

        for op in ops {
            let before = core.state();
            match op {
                Op::Change => {
                    let step = core.step(RuntimeEvent::BuildTriggered {
                        reason: TriggerReason::FileWatch { path: PathBuf::from("Quiz.elm") },
                    });
                    match before {
                        WatchState::Idle => {
                            prop_assert_eq!(starts(&step.commands), vec![last_id + 1]);
                            last_id += 1;
                        }
                        WatchState::Building { build_id } => {
                            prop_assert!(starts(&step.commands).is_empty());
                            for cmd in &step.commands {
                                prop_assert_eq!(cmd, &CoreCommand::CancelBuild(build_id));
                            }
                            pending = true;
                        }
                    }
                }
                Op::FinishCurrent => {
                    let WatchState::Building { build_id } = before else { continue };
                    let step = core.step(RuntimeEvent::BuildFinished {
                        build_id,
                        status: BuildStatus::CompileFailed,
                    });
                    if pending {
                        prop_assert_eq!(starts(&step.commands), vec![last_id + 1]);
                        last_id += 1;
                        pending = false;
                    } else {
                        prop_assert!(step.commands.is_empty());
                        prop_assert!(core.is_idle());
                    }
                }
                Op::FinishStale => {
                    let step = core.step(RuntimeEvent::BuildFinished {
                        build_id: last_id + 100,
                        status: BuildStatus::Cancelled,
                    });
                    prop_assert!(step.commands.is_empty());
                    prop_assert_eq!(core.state(), before);
                }
            }

            prop_assert_eq!(core.queue_is_empty(), !pending);
            if let WatchState::Building { build_id } = core.state() {
                prop_assert_eq!(build_id, last_id);
            }
        }
    }
}
