// src/dag/graph.rs

use std::collections::{HashMap, HashSet};

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::dag::task::{standard_decls, TaskDecl, TaskKind};
use crate::errors::{ElmwatchError, Result};

/// Statically declared task DAG.
///
/// Built once from a list of [`TaskDecl`]s and validated up front: unknown
/// dependencies, self-dependencies and cycles are rejected, so
/// [`TaskGraph::plan`] can never fail on structure.
#[derive(Debug, Clone)]
pub struct TaskGraph {
    deps: HashMap<TaskKind, Vec<TaskKind>>,
    /// Topological order of every declared task.
    order: Vec<TaskKind>,
}

impl TaskGraph {
    /// The built-in `init` → `build` → `default` graph.
    pub fn standard() -> Result<Self> {
        Self::from_decls(&standard_decls())
    }

    pub fn from_decls(decls: &[TaskDecl]) -> Result<Self> {
        let mut deps: HashMap<TaskKind, Vec<TaskKind>> = HashMap::new();

        for decl in decls {
            if deps.insert(decl.kind, decl.after.clone()).is_some() {
                return Err(ElmwatchError::ConfigError(format!(
                    "task '{}' is declared more than once",
                    decl.kind
                )));
            }
        }

        for decl in decls {
            for dep in &decl.after {
                if *dep == decl.kind {
                    return Err(ElmwatchError::ConfigError(format!(
                        "task '{}' cannot depend on itself",
                        decl.kind
                    )));
                }
                if !deps.contains_key(dep) {
                    return Err(ElmwatchError::ConfigError(format!(
                        "task '{}' has unknown dependency '{}'",
                        decl.kind, dep
                    )));
                }
            }
        }

        // Edge direction: dep -> task.
        let mut graph: DiGraphMap<TaskKind, ()> = DiGraphMap::new();
        for decl in decls {
            graph.add_node(decl.kind);
        }
        for decl in decls {
            for dep in &decl.after {
                graph.add_edge(*dep, decl.kind, ());
            }
        }

        let order = toposort(&graph, None).map_err(|cycle| {
            ElmwatchError::DagCycle(format!(
                "cycle detected in task graph involving task '{}'",
                cycle.node_id()
            ))
        })?;

        Ok(Self { deps, order })
    }

    /// Return all declared tasks in execution order.
    pub fn tasks(&self) -> &[TaskKind] {
        &self.order
    }

    /// Immediate dependencies of a task.
    pub fn dependencies_of(&self, task: TaskKind) -> &[TaskKind] {
        self.deps.get(&task).map(|d| d.as_slice()).unwrap_or(&[])
    }

    /// The tasks needed to run `target`, dependencies first, `target` last.
    pub fn plan(&self, target: TaskKind) -> Result<Vec<TaskKind>> {
        if !self.deps.contains_key(&target) {
            return Err(ElmwatchError::TaskNotFound(target.to_string()));
        }

        let mut needed: HashSet<TaskKind> = HashSet::new();
        let mut stack = vec![target];
        while let Some(task) = stack.pop() {
            if needed.insert(task) {
                stack.extend(self.dependencies_of(task).iter().copied());
            }
        }

        Ok(self
            .order
            .iter()
            .copied()
            .filter(|t| needed.contains(t))
            .collect())
    }
}
