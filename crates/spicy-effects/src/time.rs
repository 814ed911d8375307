//! Time effect handler backed by the system clock.

use async_trait::async_trait;
use spicy_core::TimeEffects;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Real time handler for production use.
///
/// Stateless; delegates to the operating system clock. A clock set before
/// the Unix epoch reads as 0 rather than failing.
#[derive(Debug, Clone, Default)]
pub struct SystemTimeHandler;

impl SystemTimeHandler {
    /// Create a new system time handler.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TimeEffects for SystemTimeHandler {
    async fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_millis() as u64
    }
}
