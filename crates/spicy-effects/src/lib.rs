//! Production effect handlers.
//!
//! Stateless implementations of the `spicy-core` ports that delegate to the
//! filesystem, the system clock, and the operating system's entropy source.
//!
//! No mock handlers live here; deterministic test doubles belong in
//! `spicy-testkit`.

pub mod random;
pub mod storage;
pub mod time;

pub use random::OsRandomHandler;
pub use storage::FilesystemStorageHandler;
pub use time::SystemTimeHandler;
