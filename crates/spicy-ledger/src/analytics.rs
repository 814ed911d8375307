//! Analytics read models.
//!
//! Derived views folded from the in-memory logs. Field names mirror the
//! upstream aggregate shapes.

use crate::types::Chain;
use serde::Serialize;

/// Full analytics snapshot across all chains.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiChainAnalytics {
    pub overview: AnalyticsOverview,
    pub by_chain: ChainBreakdown,
    pub voting: VotingAggregate,
    pub staking: StakingAggregate,
}

/// Headline totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsOverview {
    /// Records across all three chain logs.
    pub total_transactions: usize,
    /// Sum of voting power over the voting history.
    pub total_voting_power: u64,
    /// Entries in the staking history.
    pub total_staking_transactions: usize,
    pub virtual_spicy_balance: u64,
}

/// Per-chain activity counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainBreakdown {
    pub sui: ChainActivity,
    pub solana: ChainActivity,
    pub ic: ChainActivity,
}

impl ChainBreakdown {
    /// Activity counts for one chain.
    pub fn for_chain(&self, chain: Chain) -> &ChainActivity {
        match chain {
            Chain::Sui => &self.sui,
            Chain::Solana => &self.solana,
            Chain::Ic => &self.ic,
        }
    }
}

/// Activity counts for a single chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainActivity {
    /// All records in this chain's log.
    pub transactions: usize,
    /// Records typed `{chain}_nft_staking`.
    pub staking: usize,
    /// Records typed `{chain}_reward_claim`, counted not summed.
    pub rewards: usize,
}

/// Voting aggregate over the cumulative history.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VotingAggregate {
    pub total_votes: usize,
    pub total_voting_power: u64,
    /// Mean power per vote; 0 when the history is empty.
    pub average_voting_power: f64,
}

/// Staking aggregate over the staking history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StakingAggregate {
    pub total_stakes: usize,
    /// Entries whose `status` reads `"active"`. The recorder never writes
    /// a status, so this stays 0 unless a snapshot populated elsewhere is
    /// loaded.
    pub active_stakes: usize,
}

/// Per-user activity summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAnalytics {
    pub total_transactions: usize,
    pub total_voting_power: u64,
    pub total_votes: usize,
    pub chains: ChainCounts,
    pub activities: ActivityCounts,
}

/// One count per chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainCounts {
    pub sui: usize,
    pub solana: usize,
    pub ic: usize,
}

impl ChainCounts {
    /// Count for one chain.
    pub fn for_chain(&self, chain: Chain) -> usize {
        match chain {
            Chain::Sui => self.sui,
            Chain::Solana => self.solana,
            Chain::Ic => self.ic,
        }
    }
}

/// Activity class counts for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityCounts {
    /// Records whose type contains `"staking"`.
    pub staking: usize,
    pub voting: usize,
    /// Records whose type contains `"claim"`.
    pub rewards: usize,
}

/// NFT-staking record counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StakedNftTotals {
    pub total: usize,
    pub by_chain: ChainCounts,
}
