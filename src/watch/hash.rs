use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use blake3::Hasher;
use tracing::debug;

use crate::fs::FileSystem;

/// Compute the blake3 hash of a single file.
pub fn compute_file_hash(fs: &dyn FileSystem, path: &Path) -> Result<String> {
    let mut hasher = Hasher::new();
    let mut file = fs
        .open_read(path)
        .with_context(|| format!("opening file for hashing: {:?}", path))?;
    let mut buf = [0u8; 8192];
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finalize().to_hex().to_string())
}

/// Last seen content hash of every watched file, kept in memory for the
/// lifetime of the watch loop.
#[derive(Debug, Default)]
pub struct ContentHashes {
    map: HashMap<PathBuf, String>,
}

impl ContentHashes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn get(&self, path: &Path) -> Option<&str> {
        self.map.get(path).map(String::as_str)
    }

    /// Store `hash` for `path`; returns true if it differs from what was
    /// stored before (or nothing was).
    pub fn update(&mut self, path: &Path, hash: String) -> bool {
        match self.map.get(path) {
            Some(old) if *old == hash => {
                debug!(?path, "content hash unchanged");
                false
            }
            _ => {
                self.map.insert(path.to_path_buf(), hash);
                true
            }
        }
    }

    pub fn forget(&mut self, path: &Path) {
        self.map.remove(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFileSystem;

    #[test]
    fn identical_content_hashes_equal() {
        let fs = MockFileSystem::new();
        fs.add_file("/p/A.elm", "module A exposing (..)");
        fs.add_file("/p/B.elm", "module A exposing (..)");

        let a = compute_file_hash(&fs, Path::new("/p/A.elm")).unwrap();
        let b = compute_file_hash(&fs, Path::new("/p/B.elm")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn update_reports_only_real_changes() {
        let mut hashes = ContentHashes::new();
        let path = Path::new("/p/Quiz.elm");

        assert!(hashes.update(path, "aaa".into()));
        assert!(!hashes.update(path, "aaa".into()));
        assert!(hashes.update(path, "bbb".into()));
        assert_eq!(hashes.get(path), Some("bbb"));

        hashes.forget(path);
        assert!(hashes.is_empty());
    }
}
