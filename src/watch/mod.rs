// src/watch/mod.rs

//! File watching and change detection for the `default` task.
//!
//! - Compiling the `[watch]` patterns and excludes.
//! - Wiring up a non-recursive `notify` watcher on the project root.
//! - Optionally skipping rebuilds when a saved file's content did not change.

pub mod event_handler;
pub mod hash;
pub mod patterns;
pub mod watcher;

pub use event_handler::ChangeFilter;
pub use hash::{compute_file_hash, ContentHashes};
pub use patterns::{collect_matching_files, relative_str, WatchProfile};
pub use watcher::{spawn_watcher, WatcherHandle};
