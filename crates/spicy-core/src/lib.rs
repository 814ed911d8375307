//! Effect-port traits and shared vocabulary for the Spicy crates.
//!
//! This crate defines **what** side effects the ledger and governance
//! services may perform; handlers define **how**. Production handlers live
//! in `spicy-effects`, deterministic test doubles in `spicy-testkit`.
//!
//! Three ports cover everything the domain crates touch:
//!
//! - [`StorageEffects`]: a string-keyed byte store with the same four
//!   operations the upstream persistence substrate exposed
//! - [`TimeEffects`]: wall-clock milliseconds for record timestamps,
//!   expiry, and cooldown arithmetic
//! - [`RandomEffects`]: entropy for identifier suffixes
//!
//! Domain services receive these as injected trait objects so tests can
//! drive them with controlled time, seeded randomness, and failing stores.

pub mod effects;
pub mod id;
pub mod persist;
pub mod types;

pub use effects::{RandomEffects, StorageEffects, StorageError, TimeEffects};
pub use types::Metadata;
