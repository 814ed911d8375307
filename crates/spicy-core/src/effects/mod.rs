//! Core effect trait definitions.
//!
//! Pure trait definitions for the side-effect operations used by the
//! ledger and governance services. Production handlers live in
//! `spicy-effects`; deterministic mocks live in `spicy-testkit`.

pub mod random;
pub mod storage;
pub mod time;

pub use random::RandomEffects;
pub use storage::{StorageEffects, StorageError};
pub use time::TimeEffects;
