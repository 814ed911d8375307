//! Randomness effect handler backed by the operating system.

use async_trait::async_trait;
use rand::rngs::OsRng;
use rand::RngCore;
use spicy_core::RandomEffects;

/// OS entropy handler for production use.
#[derive(Debug, Clone, Default)]
pub struct OsRandomHandler;

impl OsRandomHandler {
    /// Create a new OS randomness handler.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RandomEffects for OsRandomHandler {
    async fn random_bytes(&self, len: usize) -> Vec<u8> {
        let mut bytes = vec![0u8; len];
        OsRng.fill_bytes(&mut bytes);
        bytes
    }
}
