//! Time effect trait.

use async_trait::async_trait;

/// Wall-clock time for timestamps, expiration, and cooldowns.
///
/// Every timestamp in the system is epoch milliseconds, the unit the
/// upstream records carry, so the port exposes exactly that. Handlers for
/// which the clock can fail report the epoch (0) rather than erroring;
/// domain arithmetic saturates, so a zero clock never panics.
#[async_trait]
pub trait TimeEffects: Send + Sync {
    /// Current wall-clock time in milliseconds since the Unix epoch.
    async fn now_ms(&self) -> u64;
}
