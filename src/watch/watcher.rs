// src/watch/watcher.rs

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::engine::{RuntimeEvent, TriggerReason};
use crate::fs::FileSystem;
use crate::watch::event_handler::ChangeFilter;
use crate::watch::patterns::WatchProfile;

/// Handle for the filesystem watcher.
///
/// Keeps the underlying `RecommendedWatcher` alive; dropping the handle stops
/// file watching.
pub struct WatcherHandle {
    _inner: RecommendedWatcher,
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle").finish()
    }
}

/// Watch the files directly inside `root` and send one
/// `RuntimeEvent::BuildTriggered` per qualifying change.
///
/// Subdirectories are not watched.
pub fn spawn_watcher(
    root: impl Into<PathBuf>,
    profile: WatchProfile,
    fs: Arc<dyn FileSystem>,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
) -> Result<WatcherHandle> {
    let root = root.into();
    let root = root.canonicalize().unwrap_or(root);

    // Channel from the blocking notify callback into the async world.
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();

    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if let Err(err) = event_tx.send(event) {
                    eprintln!("elmwatch: failed to forward notify event: {err}");
                }
            }
            Err(err) => eprintln!("elmwatch: file watch error: {err}"),
        },
        Config::default(),
    )?;

    watcher.watch(&root, RecursiveMode::NonRecursive)?;
    info!(root = ?root, patterns = ?profile.patterns(), "file watcher started");

    let filter = Arc::new(Mutex::new(ChangeFilter::new(root, profile, fs)));

    tokio::spawn(async move {
        // Events that arrive while seeding wait in the channel.
        let seeding = Arc::clone(&filter);
        let seeded = tokio::task::spawn_blocking(move || match seeding.lock() {
            Ok(mut f) => f.seed(),
            Err(_) => warn!("change filter mutex poisoned; skipping hash seeding"),
        })
        .await;
        if let Err(err) = seeded {
            warn!(error = %err, "hash seeding task failed");
        }

        while let Some(event) = event_rx.recv().await {
            debug!(?event, "received notify event");

            let filter = Arc::clone(&filter);
            let qualifying = tokio::task::spawn_blocking(move || match filter.lock() {
                Ok(mut f) => f.evaluate(&event),
                Err(_) => {
                    warn!("change filter mutex poisoned; dropping event");
                    Vec::new()
                }
            })
            .await
            .unwrap_or_default();

            for path in qualifying {
                debug!(path = ?path, "watched file changed; requesting rebuild");
                let trigger = RuntimeEvent::BuildTriggered {
                    reason: TriggerReason::FileWatch { path },
                };
                if runtime_tx.send(trigger).await.is_err() {
                    debug!("runtime channel closed; stopping watcher loop");
                    return;
                }
            }
        }
        debug!("watcher event loop finished");
    });

    Ok(WatcherHandle { _inner: watcher })
}
