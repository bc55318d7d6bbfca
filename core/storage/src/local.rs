//! Local filesystem key-value store.
//!
//! Stores one file per key under a root directory. Writes land in a
//! temporary file first and are renamed into place, so an individual
//! entry update is atomic even if the process dies mid-write.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::store::KeyValueStore;
use keepsake_common::{Error, Result};

/// Local filesystem key-value store.
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    /// Create a new local store rooted at the given directory.
    ///
    /// # Postconditions
    /// - Root directory exists after construction
    ///
    /// # Errors
    /// - Invalid path, permission denied
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        // Create root if it doesn't exist (sync for constructor)
        if !root.exists() {
            std::fs::create_dir_all(&root)?;
        }

        Ok(Self { root })
    }

    /// Map a key to its file path, rejecting anything that could escape
    /// the root directory.
    fn key_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty()
            || !key
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-' || b == b'.')
            || key.starts_with('.')
        {
            return Err(Error::InvalidInput(format!("Invalid storage key: {}", key)));
        }
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl KeyValueStore for LocalStore {
    fn name(&self) -> &str {
        "local"
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;

        match fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::Storage(format!("Read failed for {}: {}", key, e))),
        }
    }

    async fn put(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key)?;
        let tmp = self.root.join(format!("{}.tmp", key));

        fs::write(&tmp, value)
            .await
            .map_err(|e| Error::Storage(format!("Write failed for {}: {}", key, e)))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|e| Error::Storage(format!("Rename failed for {}: {}", key, e)))?;

        debug!(key, bytes = value.len(), "Entry written");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.key_path(key)?;

        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(key, "Entry removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Storage(format!("Remove failed for {}: {}", key, e))),
        }
    }

    async fn contains(&self, key: &str) -> Result<bool> {
        let path = self.key_path(key)?;
        Ok(fs::try_exists(&path)
            .await
            .map_err(|e| Error::Storage(format!("Probe failed for {}: {}", key, e)))?)
    }
}
