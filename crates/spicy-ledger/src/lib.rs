//! Multi-chain transaction ledger.
//!
//! [`TransactionLedger`] keeps one append-only activity log per supported
//! chain, a cumulative voting-history log, a staking-activity log, and a
//! running virtual SPICY balance. Records are immutable once appended;
//! every mutation persists the full state through an injected storage port
//! under the same fixed keys the upstream system used, so existing
//! snapshots load unchanged.
//!
//! Reads are pure: [`TransactionLedger::multi_chain_analytics`] and friends
//! fold over the in-memory logs without touching the ports.
//!
//! The [`VotingSink`] trait is the seam the governance engine writes
//! through: one-way, best-effort, so a failing ledger never breaks a vote.

pub mod analytics;
pub mod error;
pub mod service;
pub mod types;

pub use analytics::{
    ActivityCounts, AnalyticsOverview, ChainActivity, ChainBreakdown, ChainCounts,
    MultiChainAnalytics, StakedNftTotals, StakingAggregate, UserAnalytics, VotingAggregate,
};
pub use error::LedgerError;
pub use service::{
    TransactionLedger, VotingSink, IC_TRANSACTIONS_KEY, SOLANA_TRANSACTIONS_KEY,
    STAKING_HISTORY_KEY, SUI_TRANSACTIONS_KEY, VIRTUAL_BALANCE_KEY, VOTING_HISTORY_KEY,
};
pub use types::{
    Chain, NftStakeEvent, RewardClaimEvent, StakeAction, StakingActivity, StakingEvent,
    TransactionRecord, VoteActivity, VotingEvent, VIRTUAL_SPICY_CURRENCY,
};
