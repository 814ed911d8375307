//! Deterministic test doubles for the Spicy effect ports.
//!
//! [`MockEffects`] implements all three ports over shared in-memory state:
//! seeded ChaCha20 randomness, a `HashMap` storage backend, and a
//! controllable clock that only moves when a test advances it. One value
//! can be cloned and injected as storage, clock, and entropy at once, so a
//! test observes and steers every side effect of the service under test.
//!
//! [`FailingStorageHandler`] refuses every operation; services are expected
//! to log and carry on, and tests use it to prove they do.

pub mod failing;
pub mod mock_effects;

pub use failing::FailingStorageHandler;
pub use mock_effects::MockEffects;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber for test output.
///
/// Honors `RUST_LOG`; safe to call from every test, only the first call
/// installs.
pub fn init_test_tracing() {
    TRACING_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
