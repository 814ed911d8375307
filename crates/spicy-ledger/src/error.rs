//! Ledger error types.

use thiserror::Error;

/// Errors surfaced by ledger record operations.
///
/// Persistence failures are deliberately absent: the ledger logs them and
/// keeps its in-memory state, so they never reach callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// A required field was empty.
    #[error("missing required field: {field}")]
    MissingField {
        /// Wire name of the offending field.
        field: &'static str,
    },

    /// The ledger refused service.
    ///
    /// Produced by [`VotingSink`](crate::VotingSink) doubles and remote
    /// backends; the in-process ledger itself never returns it.
    #[error("ledger unavailable: {reason}")]
    Unavailable {
        /// Why the ledger refused.
        reason: String,
    },
}
