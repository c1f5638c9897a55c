// src/watch/patterns.rs

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use crate::config::WatchSection;
use crate::fs::FileSystem;

/// Compiled `[watch]` patterns.
///
/// Patterns are evaluated against paths relative to the project root with
/// forward slashes (e.g. `"Quiz.elm"`). `*` never crosses a `/`, so the
/// default `*.elm` only matches files directly in the root.
#[derive(Clone)]
pub struct WatchProfile {
    patterns: Vec<String>,
    watch_set: GlobSet,
    exclude_set: Option<GlobSet>,
    use_hash: bool,
}

impl fmt::Debug for WatchProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchProfile")
            .field("patterns", &self.patterns)
            .field("use_hash", &self.use_hash)
            .finish_non_exhaustive()
    }
}

impl WatchProfile {
    pub fn from_section(section: &WatchSection) -> Result<Self> {
        let watch_set = build_globset(&section.patterns).context("building watch globset")?;

        let exclude_set = if section.exclude.is_empty() {
            None
        } else {
            Some(build_globset(&section.exclude).context("building exclude globset")?)
        };

        Ok(Self {
            patterns: section.patterns.clone(),
            watch_set,
            exclude_set,
            use_hash: section.use_hash,
        })
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Whether rebuilds are gated on a content change (`use_hash = true`).
    pub fn use_hash(&self) -> bool {
        self.use_hash
    }

    /// Returns true if a change to `rel_path` should trigger a rebuild.
    pub fn matches(&self, rel_path: &str) -> bool {
        if !self.watch_set.is_match(rel_path) {
            return false;
        }
        if let Some(exclude) = &self.exclude_set {
            if exclude.is_match(rel_path) {
                return false;
            }
        }
        true
    }
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = GlobBuilder::new(pat)
            .literal_separator(true)
            .build()
            .with_context(|| format!("invalid glob pattern: {pat}"))?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}

/// Convert a path into a string relative to `root`, with forward slashes.
///
/// Falls back to canonicalized paths, since some platforms report events
/// under a different absolute prefix (e.g. `/private/var` on macOS).
pub fn relative_str(root: &Path, path: &Path) -> Option<String> {
    if let Ok(rel) = path.strip_prefix(root) {
        return Some(rel.to_string_lossy().replace('\\', "/"));
    }

    if let (Ok(root_canon), Ok(path_canon)) = (root.canonicalize(), path.canonicalize()) {
        if let Ok(rel) = path_canon.strip_prefix(&root_canon) {
            return Some(rel.to_string_lossy().replace('\\', "/"));
        }
    }

    None
}

/// Files directly inside `root` that the profile matches. Subdirectories are
/// not descended into.
pub fn collect_matching_files(
    fs: &dyn FileSystem,
    root: &Path,
    profile: &WatchProfile,
) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in fs.read_dir(root)? {
        if !fs.is_file(&path) {
            continue;
        }
        if let Some(rel) = relative_str(root, &path) {
            if profile.matches(&rel) {
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(patterns: &[&str], exclude: &[&str]) -> WatchProfile {
        WatchProfile::from_section(&WatchSection {
            patterns: patterns.iter().map(|s| s.to_string()).collect(),
            exclude: exclude.iter().map(|s| s.to_string()).collect(),
            use_hash: false,
        })
        .unwrap()
    }

    #[test]
    fn star_does_not_cross_directories() {
        let p = profile(&["*.elm"], &[]);
        assert!(p.matches("Quiz.elm"));
        assert!(!p.matches("src/Quiz.elm"));
        assert!(!p.matches("quiz.js"));
    }

    #[test]
    fn exclude_wins_over_watch() {
        let p = profile(&["*.elm"], &["Scratch*.elm"]);
        assert!(p.matches("Quiz.elm"));
        assert!(!p.matches("Scratch1.elm"));
    }

    #[test]
    fn invalid_glob_is_rejected() {
        let err = WatchProfile::from_section(&WatchSection {
            patterns: vec!["[".to_string()],
            exclude: Vec::new(),
            use_hash: false,
        })
        .unwrap_err();
        assert!(format!("{err:#}").contains("invalid glob pattern"));
    }
}
