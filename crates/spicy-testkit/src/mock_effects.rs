//! Mock effects implementation for deterministic testing.
//!
//! Implements every `spicy-core` port over one shared state:
//!
//! - seeded ChaCha20 RNG, so identifier suffixes are reproducible
//! - in-memory `HashMap` storage with seeding and inspection helpers
//! - a clock that starts at a fixed epoch and moves only on request
//!
//! # Blocking lock usage
//!
//! Uses `std::sync::Mutex` because this is test infrastructure: tests run
//! in controlled contexts, contention is not a concern, and the simpler
//! synchronous API keeps test code clear.

#![allow(clippy::unwrap_used)]

use async_trait::async_trait;
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use spicy_core::{RandomEffects, StorageEffects, StorageError, TimeEffects};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Fixed mock epoch: 2022-01-01 00:00:00 UTC.
pub const MOCK_EPOCH_MS: u64 = 1_640_995_200_000;

/// Mock effects implementation for deterministic testing.
///
/// Clones share state, so a single value can serve as the storage, time,
/// and randomness port of one service while the test keeps a handle for
/// inspection.
#[derive(Debug, Clone)]
pub struct MockEffects {
    state: Arc<Mutex<MockState>>,
}

#[derive(Debug)]
struct MockState {
    /// Deterministic RNG for reproducible tests.
    rng: ChaCha20Rng,
    /// Mock storage backend.
    storage: HashMap<String, Vec<u8>>,
    /// Physical time counter in milliseconds.
    now_ms: u64,
}

impl MockEffects {
    /// Create deterministic mock effects with a fixed seed.
    pub fn deterministic() -> Self {
        Self::with_seed([42; 32])
    }

    /// Create mock effects with a specific seed for reproducible tests.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                rng: ChaCha20Rng::from_seed(seed),
                storage: HashMap::new(),
                now_ms: MOCK_EPOCH_MS,
            })),
        }
    }

    /// Advance the mock clock.
    pub fn advance_time(&self, ms: u64) {
        let mut state = self.state.lock().unwrap();
        state.now_ms += ms;
    }

    /// Set the mock clock to an absolute timestamp.
    pub fn set_time(&self, now_ms: u64) {
        let mut state = self.state.lock().unwrap();
        state.now_ms = now_ms;
    }

    /// Current reading of the mock clock.
    pub fn current_time(&self) -> u64 {
        let state = self.state.lock().unwrap();
        state.now_ms
    }

    /// Keys currently present in the mock storage.
    pub fn storage_keys(&self) -> Vec<String> {
        let state = self.state.lock().unwrap();
        let mut keys: Vec<String> = state.storage.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Raw bytes stored under a key, if any.
    pub fn stored_value(&self, key: &str) -> Option<Vec<u8>> {
        let state = self.state.lock().unwrap();
        state.storage.get(key).cloned()
    }

    /// Place raw bytes under a key, as if a previous run had persisted them.
    pub fn seed_storage(&self, key: &str, value: Vec<u8>) {
        let mut state = self.state.lock().unwrap();
        state.storage.insert(key.to_string(), value);
    }

    /// Clear storage and reset the clock while preserving the RNG stream.
    pub fn reset(&self) {
        let mut state = self.state.lock().unwrap();
        state.storage.clear();
        state.now_ms = MOCK_EPOCH_MS;
    }
}

#[async_trait]
impl StorageEffects for MockEffects {
    async fn store(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        if key.is_empty() {
            return Err(StorageError::InvalidKey {
                reason: "Key cannot be empty".to_string(),
            });
        }
        let mut state = self.state.lock().unwrap();
        state.storage.insert(key.to_string(), value);
        Ok(())
    }

    async fn retrieve(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let state = self.state.lock().unwrap();
        Ok(state.storage.get(key).cloned())
    }

    async fn remove(&self, key: &str) -> Result<bool, StorageError> {
        let mut state = self.state.lock().unwrap();
        Ok(state.storage.remove(key).is_some())
    }

    async fn clear_all(&self) -> Result<(), StorageError> {
        let mut state = self.state.lock().unwrap();
        state.storage.clear();
        Ok(())
    }
}

#[async_trait]
impl TimeEffects for MockEffects {
    async fn now_ms(&self) -> u64 {
        let state = self.state.lock().unwrap();
        state.now_ms
    }
}

#[async_trait]
impl RandomEffects for MockEffects {
    async fn random_bytes(&self, len: usize) -> Vec<u8> {
        let mut state = self.state.lock().unwrap();
        let mut bytes = vec![0u8; len];
        state.rng.fill_bytes(&mut bytes);
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn clock_starts_at_mock_epoch_and_advances_on_request() {
        let effects = MockEffects::deterministic();
        assert_eq!(effects.now_ms().await, MOCK_EPOCH_MS);

        effects.advance_time(86_400_000);
        assert_eq!(effects.now_ms().await, MOCK_EPOCH_MS + 86_400_000);

        effects.set_time(1_700_000_000_000);
        assert_eq!(effects.now_ms().await, 1_700_000_000_000);
    }

    #[tokio::test]
    async fn same_seed_produces_same_bytes() {
        let a = MockEffects::with_seed([7; 32]);
        let b = MockEffects::with_seed([7; 32]);
        assert_eq!(a.random_bytes(16).await, b.random_bytes(16).await);
    }

    #[tokio::test]
    async fn storage_round_trips_and_resets() {
        let effects = MockEffects::deterministic();
        effects.store("key", b"value".to_vec()).await.unwrap();
        assert_eq!(effects.retrieve("key").await.unwrap(), Some(b"value".to_vec()));
        assert_eq!(effects.storage_keys(), vec!["key".to_string()]);

        effects.reset();
        assert_eq!(effects.retrieve("key").await.unwrap(), None);
        assert_eq!(effects.now_ms().await, MOCK_EPOCH_MS);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let effects = MockEffects::deterministic();
        let clone = effects.clone();
        clone.store("shared", b"1".to_vec()).await.unwrap();
        assert_eq!(effects.stored_value("shared"), Some(b"1".to_vec()));
    }
}
