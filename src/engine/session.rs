// src/engine/session.rs

//! Wiring for the `default` task's watch loop.

use std::future::Future;

use tokio::sync::mpsc;
use tracing::info;

use crate::dag::TaskContext;
use crate::engine::{Runtime, RuntimeEvent, RuntimeOptions, WatchCore};
use crate::errors::Result;
use crate::exec::RealBuildBackend;
use crate::watch::{spawn_watcher, WatchProfile};

/// Watch the project and rebuild on every matching change until `shutdown`
/// resolves.
///
/// The caller is expected to have run the initial build already: nothing is
/// built here until the first change arrives, and the watcher is registered
/// only now.
pub async fn watch_and_rebuild<S>(ctx: &TaskContext, shutdown: S) -> Result<()>
where
    S: Future<Output = ()> + Send + 'static,
{
    let profile = WatchProfile::from_section(&ctx.watch)?;

    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(64);

    let _watcher_handle = spawn_watcher(
        ctx.build.root.clone(),
        profile,
        ctx.fs.clone(),
        rt_tx.clone(),
    )?;

    {
        let tx = rt_tx.clone();
        tokio::spawn(async move {
            shutdown.await;
            let _ = tx.send(RuntimeEvent::ShutdownRequested).await;
        });
    }

    println!(
        "[elmwatch] watching {} for changes (Ctrl-C to stop)",
        ctx.build.root.display()
    );

    let backend = RealBuildBackend::new(
        ctx.compiler.clone(),
        ctx.fs.clone(),
        ctx.build.clone(),
        rt_tx,
    );
    let core = WatchCore::new(ctx.behaviour, RuntimeOptions::default());

    Runtime::new(core, rt_rx, backend).run().await?;

    info!("watch loop stopped");
    Ok(())
}
