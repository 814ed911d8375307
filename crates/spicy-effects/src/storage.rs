//! Storage effect handler backed by the filesystem.
//!
//! Stores each key as a single JSON file under a base directory. The
//! ledger and governance services persist whole collections per key, so a
//! flat one-file-per-key layout matches the upstream key-value substrate
//! exactly.

use async_trait::async_trait;
use spicy_core::{StorageEffects, StorageError};
use std::path::PathBuf;
use tokio::fs;

/// Filesystem-based storage handler for production use.
///
/// Stateless; every operation delegates to the filesystem. Keys map to
/// `<base>/<key>.json`, so keys must be flat names without path
/// separators.
#[derive(Debug, Clone)]
pub struct FilesystemStorageHandler {
    /// Base directory for storage files.
    base_path: PathBuf,
}

impl FilesystemStorageHandler {
    /// Create a new filesystem storage handler.
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Create a new filesystem storage handler with the default path.
    pub fn with_default_path() -> Self {
        Self::new(PathBuf::from("./spicy-data"))
    }

    fn validate_key(key: &str) -> Result<(), StorageError> {
        if key.is_empty() {
            return Err(StorageError::InvalidKey {
                reason: "Key cannot be empty".to_string(),
            });
        }
        if key.contains('/') || key.contains('\\') || key.contains("..") {
            return Err(StorageError::InvalidKey {
                reason: format!("Key must be a flat name: {key}"),
            });
        }
        Ok(())
    }

    fn file_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{key}.json"))
    }
}

#[async_trait]
impl StorageEffects for FilesystemStorageHandler {
    async fn store(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        Self::validate_key(key)?;

        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| StorageError::WriteFailed(format!("Failed to create directory: {e}")))?;

        fs::write(self.file_path(key), value)
            .await
            .map_err(|e| StorageError::WriteFailed(format!("Failed to write file: {e}")))?;

        Ok(())
    }

    async fn retrieve(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Self::validate_key(key)?;

        match fs::read(self.file_path(key)).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::ReadFailed(format!("Failed to read file: {e}"))),
        }
    }

    async fn remove(&self, key: &str) -> Result<bool, StorageError> {
        Self::validate_key(key)?;

        match fs::remove_file(self.file_path(key)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::DeleteFailed(format!("Failed to remove file: {e}"))),
        }
    }

    async fn clear_all(&self) -> Result<(), StorageError> {
        let mut entries = match fs::read_dir(&self.base_path).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => {
                return Err(StorageError::ReadFailed(format!(
                    "Failed to read directory: {e}"
                )))
            }
        };

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StorageError::ReadFailed(format!("Failed to read directory entry: {e}")))?
        {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                fs::remove_file(&path).await.map_err(|e| {
                    StorageError::DeleteFailed(format!("Failed to remove file: {e}"))
                })?;
            }
        }

        Ok(())
    }
}
