//! Governance error types.

use thiserror::Error;

/// Reasons a vote attempt is refused.
///
/// These are ordinary data, not failures: `vote_on_proposal` hands them back
/// in its `Err` arm and the engine state is untouched. The display strings
/// are stable and are what callers surface to users, so they must not change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GovernanceError {
    /// The proposal id is unknown or the proposal is no longer open.
    #[error("Proposal not active or not found")]
    ProposalNotActive,

    /// The proposal's expiry timestamp is in the past.
    #[error("Proposal has expired")]
    ProposalExpired,

    /// None of the supplied NFTs meet the minimum stake duration.
    #[error("No NFTs staked long enough to vote")]
    StakeTooRecent,

    /// The user voted too recently, on any proposal.
    #[error("Voting cooldown period active")]
    CooldownActive,
}
