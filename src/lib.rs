// src/lib.rs

pub mod build;
pub mod cli;
pub mod compiler;
pub mod config;
pub mod dag;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod types;
pub mod watch;

use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{default_config_path, load_or_default, ConfigFile};
use crate::dag::{TaskContext, TaskGraph, TaskKind, TaskRunner};
use crate::errors::Result;

/// High-level entry point used by `main.rs`.
///
/// Loads and validates the config, resolves the requested task, and runs it
/// together with its dependencies.
pub async fn run(args: CliArgs) -> Result<()> {
    let (config_path, explicit) = match &args.config {
        Some(path) => (PathBuf::from(path), true),
        None => (default_config_path(), false),
    };

    let mut raw = load_or_default(&config_path, explicit)?;
    args.apply_overrides(&mut raw);
    let cfg = ConfigFile::try_from(raw)?;

    let target = TaskKind::from_str(&args.task)?;
    let graph = TaskGraph::standard()?;
    let root = config_root_dir(&config_path);

    if args.dry_run {
        print_dry_run(&cfg, &graph, target, &root)?;
        return Ok(());
    }

    info!(task = %target, root = ?root, "running task");
    let ctx = TaskContext::from_config(&cfg, &root);
    TaskRunner::new(graph, ctx).run(target).await
}

/// Figure out the project root.
///
/// - If the config path has a non-empty parent (e.g. "site/Elmwatch.toml"),
///   we use that directory.
/// - If it's just a bare filename like "Elmwatch.toml" (parent = ""),
///   we fall back to the current working directory.
fn config_root_dir(config_path: &Path) -> PathBuf {
    let root = match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };
    root.canonicalize().unwrap_or(root)
}

/// Print the resolved settings and the execution plan for `target`.
fn print_dry_run(cfg: &ConfigFile, graph: &TaskGraph, target: TaskKind, root: &Path) -> Result<()> {
    let settings = cfg.build_settings(root);
    let plan = graph.plan(target)?;

    println!("elmwatch dry-run");
    println!("  root   = {}", settings.root.display());
    println!("  source = {}", settings.source.display());
    println!("  output = {}", settings.target().display());
    match cfg.compiler.init_cmd() {
        Some(init) => println!("  init   = {init}"),
        None => println!("  init   = (disabled)"),
    }
    println!("  cmd    = {}", cfg.compiler.cmd);
    println!("  watch  = {:?}", cfg.watch.patterns);
    if !cfg.watch.exclude.is_empty() {
        println!("  exclude = {:?}", cfg.watch.exclude);
    }
    if cfg.watch.use_hash {
        println!("  use_hash = true");
    }
    println!(
        "  triggered_while_running_behaviour = {:?}",
        cfg.config.triggered_while_running_behaviour
    );
    println!();

    let names: Vec<&str> = plan.iter().map(|t| t.name()).collect();
    println!("plan: {}", names.join(" -> "));

    debug!("dry-run complete (no execution)");
    Ok(())
}
