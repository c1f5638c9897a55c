// src/dag/mod.rs

//! Task graph and execution.
//!
//! - [`task`] names the tasks elmwatch knows about.
//! - [`graph`] holds the statically declared dependency DAG and resolves an
//!   execution plan for a requested task.
//! - [`runner`] executes a plan in order.

pub mod graph;
pub mod runner;
pub mod task;

pub use graph::TaskGraph;
pub use runner::{TaskContext, TaskRunner};
pub use task::{TaskDecl, TaskKind};
