// src/watch/event_handler.rs

//! Turns raw notify events into the list of files that warrant a rebuild.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use notify::{Event, EventKind};
use tracing::{debug, info, warn};

use crate::fs::FileSystem;
use crate::watch::hash::{compute_file_hash, ContentHashes};
use crate::watch::patterns::{collect_matching_files, relative_str, WatchProfile};

/// Stateful filter between the notify callback and the runtime.
///
/// A path qualifies when it sits directly in the watched root, matches the
/// profile, and (with `use_hash`) its content differs from the last time it
/// was seen. Removals always qualify.
#[derive(Debug)]
pub struct ChangeFilter {
    root: PathBuf,
    profile: WatchProfile,
    fs: Arc<dyn FileSystem>,
    hashes: ContentHashes,
}

impl ChangeFilter {
    pub fn new(root: PathBuf, profile: WatchProfile, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            root,
            profile,
            fs,
            hashes: ContentHashes::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Record the current content of every watched file, so that a save
    /// without changes does not trigger the first rebuild.
    pub fn seed(&mut self) {
        if !self.profile.use_hash() {
            return;
        }

        let files = match collect_matching_files(self.fs.as_ref(), &self.root, &self.profile) {
            Ok(f) => f,
            Err(err) => {
                warn!(error = %err, "failed to list watched files; starting with no hashes");
                return;
            }
        };

        for file in files {
            match compute_file_hash(self.fs.as_ref(), &file) {
                Ok(hash) => {
                    self.hashes.update(&file, hash);
                }
                Err(err) => warn!(file = ?file, error = %err, "failed to hash watched file"),
            }
        }
        debug!(files = self.hashes.len(), "seeded content hashes");
    }

    /// Paths (relative to the root) in `event` that should trigger a rebuild.
    pub fn evaluate(&mut self, event: &Event) -> Vec<PathBuf> {
        if matches!(event.kind, EventKind::Access(_)) {
            return Vec::new();
        }
        let removed = matches!(event.kind, EventKind::Remove(_));

        let mut qualifying = Vec::new();
        for path in &event.paths {
            let Some(rel) = relative_str(&self.root, path) else {
                debug!(?path, root = ?self.root, "event outside of watched root");
                continue;
            };

            if rel.is_empty() || rel.contains('/') || !self.profile.matches(&rel) {
                continue;
            }

            if self.profile.use_hash() && !self.content_changed(path, removed, &rel) {
                continue;
            }

            let rel = PathBuf::from(rel);
            if !qualifying.contains(&rel) {
                qualifying.push(rel);
            }
        }
        qualifying
    }

    fn content_changed(&mut self, path: &Path, removed: bool, rel: &str) -> bool {
        if removed || !self.fs.exists(path) {
            self.hashes.forget(path);
            return true;
        }

        match compute_file_hash(self.fs.as_ref(), path) {
            Ok(hash) => {
                let changed = self.hashes.update(path, hash);
                if !changed {
                    info!(path = %rel, "content unchanged; skipping rebuild");
                }
                changed
            }
            Err(err) => {
                warn!(path = %rel, error = %err, "failed to hash changed file; rebuilding anyway");
                true
            }
        }
    }
}
