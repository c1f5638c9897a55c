// src/dag/runner.rs

use std::collections::HashSet;
use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::build::{run_build, BuildRun, BuildSettings};
use crate::compiler::{CommandCompiler, Compiler};
use crate::config::{ConfigFile, WatchSection};
use crate::dag::graph::TaskGraph;
use crate::dag::task::TaskKind;
use crate::engine::session::watch_and_rebuild;
use crate::errors::Result;
use crate::fs::{FileSystem, RealFileSystem};
use crate::types::TriggerWhileRunningBehaviour;

/// Everything a task needs to do its work.
#[derive(Clone)]
pub struct TaskContext {
    pub compiler: Arc<dyn Compiler>,
    pub fs: Arc<dyn FileSystem>,
    pub build: BuildSettings,
    pub watch: WatchSection,
    pub behaviour: TriggerWhileRunningBehaviour,
}

impl std::fmt::Debug for TaskContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskContext")
            .field("build", &self.build)
            .field("watch", &self.watch)
            .field("behaviour", &self.behaviour)
            .finish_non_exhaustive()
    }
}

impl TaskContext {
    /// Production context: shell-out compiler and the real filesystem.
    pub fn from_config(cfg: &ConfigFile, root: &Path) -> Self {
        Self {
            compiler: Arc::new(CommandCompiler::from_config(cfg, root)),
            fs: Arc::new(RealFileSystem),
            build: cfg.build_settings(root),
            watch: cfg.watch.clone(),
            behaviour: cfg.config.triggered_while_running_behaviour,
        }
    }
}

/// Executes a task and its dependencies in topological order.
///
/// Each task runs at most once per runner, so asking for `build` twice
/// does not re-run `init`.
#[derive(Debug)]
pub struct TaskRunner {
    graph: TaskGraph,
    ctx: TaskContext,
    completed: HashSet<TaskKind>,
    last_build: Option<BuildRun>,
}

impl TaskRunner {
    pub fn new(graph: TaskGraph, ctx: TaskContext) -> Self {
        Self {
            graph,
            ctx,
            completed: HashSet::new(),
            last_build: None,
        }
    }

    /// Result of the most recent `build` task, if one ran.
    pub fn last_build(&self) -> Option<&BuildRun> {
        self.last_build.as_ref()
    }

    /// Run `target`; the watch task stops on Ctrl-C.
    pub async fn run(&mut self, target: TaskKind) -> Result<()> {
        self.run_until(target, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Run `target`; the watch task stops when `shutdown` resolves.
    pub async fn run_until<S>(&mut self, target: TaskKind, shutdown: S) -> Result<()>
    where
        S: Future<Output = ()> + Send + 'static,
    {
        let plan = self.graph.plan(target)?;
        info!(%target, plan = ?plan, "running task");

        // Only the final task can be the watch task, so the shutdown
        // future is handed to at most one step.
        let mut shutdown = Some(shutdown);

        for task in plan {
            if self.completed.contains(&task) {
                debug!(%task, "already completed; skipping");
                continue;
            }

            match task {
                TaskKind::Init => {
                    self.ctx.compiler.init().await?;
                }
                TaskKind::Build => {
                    let run = run_build(
                        self.ctx.compiler.as_ref(),
                        self.ctx.fs.as_ref(),
                        &self.ctx.build,
                    )
                    .await?;
                    self.last_build = Some(run);
                }
                TaskKind::Default => {
                    let signal = shutdown.take().ok_or_else(|| {
                        anyhow::anyhow!("watch task scheduled more than once in a plan")
                    })?;
                    watch_and_rebuild(&self.ctx, signal).await?;
                }
            }

            debug!(%task, "task completed");
            self.completed.insert(task);
        }

        Ok(())
    }
}
