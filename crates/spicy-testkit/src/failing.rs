//! Storage double that refuses every operation.

use async_trait::async_trait;
use spicy_core::{StorageEffects, StorageError};

/// Storage handler whose every operation fails.
///
/// The ledger and governance services treat persistence failures as
/// non-fatal; tests inject this handler to prove the in-memory outcome of
/// an operation is unaffected by a broken backend.
#[derive(Debug, Clone, Default)]
pub struct FailingStorageHandler;

impl FailingStorageHandler {
    /// Create a new failing storage handler.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl StorageEffects for FailingStorageHandler {
    async fn store(&self, _key: &str, _value: Vec<u8>) -> Result<(), StorageError> {
        Err(StorageError::WriteFailed("backend unavailable".to_string()))
    }

    async fn retrieve(&self, _key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Err(StorageError::ReadFailed("backend unavailable".to_string()))
    }

    async fn remove(&self, _key: &str) -> Result<bool, StorageError> {
        Err(StorageError::DeleteFailed("backend unavailable".to_string()))
    }

    async fn clear_all(&self) -> Result<(), StorageError> {
        Err(StorageError::DeleteFailed("backend unavailable".to_string()))
    }
}
