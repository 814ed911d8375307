//! NFT-weighted proposal voting.
//!
//! [`VotingEngine`] manages governance proposals and power-weighted votes.
//! Power derives from the rarity text of the caller's staked NFTs, clamped
//! by a [`ComplianceConfig`]; eligibility enforces proposal liveness, a
//! minimum stake age, and a global per-user cooldown. A repeat vote on the
//! same proposal changes the existing vote in place rather than being
//! rejected.
//!
//! Accepted votes are mirrored to the transaction ledger through the
//! [`VotingSink`](spicy_ledger::VotingSink) seam, best effort: a failing
//! ledger is logged and the vote stands. All state persists through the
//! injected storage port under the upstream fixed keys, so existing
//! snapshots load unchanged.

pub mod audit;
pub mod config;
pub mod engine;
pub mod error;
pub mod nft;
pub mod proposal;
pub mod vote;

pub use audit::{ComplianceAudit, ComplianceViolation, Severity, ViolationKind};
pub use config::{ComplianceConfig, VoteWeighting};
pub use engine::{
    VotingEngine, VotingStatistics, ACTIVE_PROPOSALS_KEY, NFT_VOTING_RIGHTS_KEY, USER_VOTES_KEY,
};
pub use error::GovernanceError;
pub use nft::{NftContent, NftDescriptor, NftDisplay, NftFields, NftVotingRight, Rarity, StakedNft};
pub use proposal::{
    ChoiceBreakdown, Proposal, ProposalDraft, ProposalResults, ProposalStatus, VoteTally,
    DEFAULT_CATEGORY, DEFAULT_OPTIONS,
};
pub use vote::{Vote, VoteChoice, VoteReceipt};
