//! Artifact persistence.
//!
//! The object store itself is an external collaborator; [`ArtifactStore`] is
//! the seam. [`DirectoryStore`] writes each artifact as a file named after its
//! key, [`MemoryStore`] keeps them in memory.

use crate::export::ExportError;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;

/// Destination for rendered artifacts.
pub trait ArtifactStore {
    /// Store `contents` under `key` and return where it landed.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn put(&self, key: &str, contents: &[u8]) -> Result<String, ExportError>;
}

/// Writes artifacts into a local directory.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    /// Create a store rooted at `root`, creating the directory if needed.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, ExportError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ArtifactStore for DirectoryStore {
    fn put(&self, key: &str, contents: &[u8]) -> Result<String, ExportError> {
        if key.is_empty() || key.contains(['/', '\\']) {
            return Err(ExportError::InvalidFormat(format!("invalid artifact key: {key:?}")));
        }
        let path = self.root.join(key);
        fs::write(&path, contents)?;
        info!(path = %path.display(), bytes = contents.len(), "wrote artifact");
        Ok(path.display().to_string())
    }
}

/// Keeps artifacts in memory, keyed by name.
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        self.objects
            .lock()
            .map(|o| o.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Contents stored under `key`.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.lock().ok()?.get(key).cloned()
    }
}

impl ArtifactStore for MemoryStore {
    fn put(&self, key: &str, contents: &[u8]) -> Result<String, ExportError> {
        let mut objects = self
            .objects
            .lock()
            .map_err(|e| ExportError::InvalidFormat(format!("store poisoned: {e}")))?;
        objects.insert(key.to_string(), contents.to_vec());
        Ok(key.to_string())
    }
}
