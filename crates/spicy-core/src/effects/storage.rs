//! Storage effect trait.
//!
//! A string-keyed byte store mirroring the four operations of the upstream
//! persistence substrate: store, retrieve, remove, and clear. Values are
//! opaque bytes; the domain crates serialize their state with `serde_json`
//! before handing it to the port.

use async_trait::async_trait;
use thiserror::Error;

/// Error type for storage operations.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// The key was rejected before any I/O was attempted.
    #[error("Invalid key: {reason}")]
    InvalidKey {
        /// Why the key was rejected.
        reason: String,
    },

    /// A read from the backing store failed.
    #[error("Read failed: {0}")]
    ReadFailed(String),

    /// A write to the backing store failed.
    #[error("Write failed: {0}")]
    WriteFailed(String),

    /// A removal from the backing store failed.
    #[error("Delete failed: {0}")]
    DeleteFailed(String),
}

/// Key-value storage operations.
///
/// Implementations must be safe to share across tasks. Callers treat every
/// failure as non-fatal: domain services log storage errors and keep their
/// in-memory state, so a flaky backend degrades durability, not behavior.
#[async_trait]
pub trait StorageEffects: Send + Sync {
    /// Store a value under the given key, replacing any previous value.
    async fn store(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError>;

    /// Retrieve the value stored under the given key, if any.
    async fn retrieve(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Remove the value stored under the given key.
    ///
    /// Returns `true` if a value was present and removed.
    async fn remove(&self, key: &str) -> Result<bool, StorageError>;

    /// Remove every key-value pair in the store.
    async fn clear_all(&self) -> Result<(), StorageError>;
}
