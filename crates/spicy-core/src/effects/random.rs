//! Randomness effect trait.

use async_trait::async_trait;

/// Entropy source for identifier suffixes.
///
/// Proposal and vote identifiers carry a short random suffix alongside
/// their timestamp. Routing the entropy through a port keeps identifier
/// generation deterministic under the seeded test handler.
#[async_trait]
pub trait RandomEffects: Send + Sync {
    /// Generate `len` random bytes.
    async fn random_bytes(&self, len: usize) -> Vec<u8>;
}
