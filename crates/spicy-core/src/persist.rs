//! JSON persistence helpers over the storage port.
//!
//! The ledger and governance services treat the store as a best-effort
//! mirror of their in-memory state: a value that is missing, unreadable,
//! or unparseable loads as the default, and a failed write is logged and
//! swallowed. These helpers implement that policy in one place.

use crate::effects::StorageEffects;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

/// Load and parse the JSON value under `key`, or fall back to the default.
///
/// Read and parse failures are logged at `warn`; they never propagate.
pub async fn load_or_default<T>(storage: &dyn StorageEffects, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    match storage.retrieve(key).await {
        Ok(Some(bytes)) => match serde_json::from_slice(&bytes) {
            Ok(value) => value,
            Err(error) => {
                warn!(key, %error, "stored value did not parse, starting from default");
                T::default()
            }
        },
        Ok(None) => T::default(),
        Err(error) => {
            warn!(key, %error, "failed to read stored value, starting from default");
            T::default()
        }
    }
}

/// Serialize `value` as JSON and store it under `key`.
///
/// Failures are logged at `warn` and swallowed; the caller's in-memory
/// state remains authoritative.
pub async fn store_logged<T>(storage: &dyn StorageEffects, key: &str, value: &T)
where
    T: Serialize,
{
    let bytes = match serde_json::to_vec(value) {
        Ok(bytes) => bytes,
        Err(error) => {
            warn!(key, %error, "failed to serialize state for persistence");
            return;
        }
    };
    if let Err(error) = storage.store(key, bytes).await {
        warn!(key, %error, "failed to persist state");
    }
}
