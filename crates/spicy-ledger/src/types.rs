//! Ledger record types and recorder inputs.
//!
//! Persisted shapes serialize with the upstream camelCase field names so
//! snapshots written by the original system round-trip byte-compatibly.

use serde::{Deserialize, Serialize};
use spicy_core::Metadata;
use std::fmt;

/// Currency label carried by reward-claim records.
pub const VIRTUAL_SPICY_CURRENCY: &str = "VIRTUAL_SPICY";

/// The three chains the ledger tracks, each with an independent log.
///
/// Wire spelling is uppercase; aliases absorb the mixed-case spellings
/// present in older snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Chain {
    /// SUI chain.
    #[serde(rename = "SUI", alias = "Sui", alias = "sui")]
    Sui,
    /// Solana chain.
    #[serde(rename = "SOLANA", alias = "Solana", alias = "solana")]
    Solana,
    /// Internet Computer chain.
    #[serde(rename = "IC", alias = "Ic", alias = "ic")]
    Ic,
}

impl Chain {
    /// Every chain, in the order the analytics breakdown reports them.
    pub const ALL: [Chain; 3] = [Chain::Sui, Chain::Solana, Chain::Ic];

    /// Uppercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Chain::Sui => "SUI",
            Chain::Solana => "SOLANA",
            Chain::Ic => "IC",
        }
    }

    /// Record type for NFT staking on this chain.
    pub fn staking_type(&self) -> &'static str {
        match self {
            Chain::Sui => "sui_nft_staking",
            Chain::Solana => "solana_nft_staking",
            Chain::Ic => "ic_nft_staking",
        }
    }

    /// Record type for reward claims on this chain.
    pub fn claim_type(&self) -> &'static str {
        match self {
            Chain::Sui => "sui_reward_claim",
            Chain::Solana => "solana_reward_claim",
            Chain::Ic => "ic_reward_claim",
        }
    }

    /// Identifier prefix for staking records.
    pub fn stake_id_prefix(&self) -> &'static str {
        match self {
            Chain::Sui => "sui_stake",
            Chain::Solana => "solana_stake",
            Chain::Ic => "ic_stake",
        }
    }

    /// Identifier prefix for reward-claim records.
    pub fn claim_id_prefix(&self) -> &'static str {
        match self {
            Chain::Sui => "sui_claim",
            Chain::Solana => "solana_claim",
            Chain::Ic => "ic_claim",
        }
    }

    /// Currency label for NFT staking records on this chain.
    pub fn nft_currency(&self) -> &'static str {
        match self {
            Chain::Sui => "SUI_NFT",
            Chain::Solana => "SOL_NFT",
            Chain::Ic => "ICP_NFT",
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry in a per-chain transaction log.
///
/// Immutable once appended; the ledger only ever appends and, on explicit
/// clear, discards wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    /// `"{prefix}_{timestamp_ms}"`; collides under rapid calls, accepted.
    pub id: String,
    pub user_principal: String,
    /// Record type, e.g. `"sui_nft_staking"` or `"ic_reward_claim"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// 0 for staking records, the claimed rewards for claim records.
    pub amount: u64,
    pub currency: String,
    pub transaction_hash: String,
    pub chain: Chain,
    /// Creation time in epoch milliseconds.
    pub timestamp: u64,
    #[serde(default)]
    pub metadata: Metadata,
}

/// One entry in the cumulative voting-history log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteActivity {
    /// `"vote_{timestamp_ms}"`.
    pub id: String,
    pub user_principal: String,
    pub proposal_id: String,
    /// Whether the vote was in favor.
    pub vote_for: bool,
    pub voting_power: u64,
    pub transaction_hash: String,
    pub timestamp: u64,
    #[serde(default)]
    pub metadata: Metadata,
}

/// Kind of staking activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StakeAction {
    Stake,
    Unstake,
    Claim,
}

/// One entry in the staking-history log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakingActivity {
    /// `"staking_{timestamp_ms}"`.
    pub id: String,
    pub user_principal: String,
    #[serde(rename = "type")]
    pub action: StakeAction,
    pub amount: u64,
    pub currency: String,
    pub chain: Chain,
    pub transaction_hash: String,
    pub timestamp: u64,
    #[serde(default)]
    pub metadata: Metadata,
    /// Never written by the recorder; only snapshots populated elsewhere
    /// carry it, which is why the active-stake count stays at zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Input for [`record_nft_staking`](crate::TransactionLedger::record_nft_staking).
#[derive(Debug, Clone)]
pub struct NftStakeEvent {
    pub user_principal: String,
    pub nft_id: String,
    /// Caller-supplied lock duration, carried opaquely in metadata.
    pub lock_duration: u64,
    pub transaction_hash: String,
    pub metadata: Metadata,
}

/// Input for [`record_reward_claim`](crate::TransactionLedger::record_reward_claim).
#[derive(Debug, Clone)]
pub struct RewardClaimEvent {
    pub user_principal: String,
    pub stake_id: String,
    /// Amount credited to the virtual balance.
    pub rewards: u64,
    pub transaction_hash: String,
    pub metadata: Metadata,
}

/// Input for [`record_voting`](crate::TransactionLedger::record_voting).
#[derive(Debug, Clone)]
pub struct VotingEvent {
    pub user_principal: String,
    pub proposal_id: String,
    pub vote_for: bool,
    pub voting_power: u64,
    pub transaction_hash: String,
    pub metadata: Metadata,
}

/// Input for [`record_staking_activity`](crate::TransactionLedger::record_staking_activity).
#[derive(Debug, Clone)]
pub struct StakingEvent {
    pub user_principal: String,
    pub action: StakeAction,
    pub amount: u64,
    pub currency: String,
    pub chain: Chain,
    pub transaction_hash: String,
    pub metadata: Metadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_tables_are_consistent() {
        for chain in Chain::ALL {
            assert!(chain.staking_type().ends_with("_nft_staking"));
            assert!(chain.claim_type().ends_with("_reward_claim"));
            assert!(chain.stake_id_prefix().ends_with("_stake"));
            assert!(chain.claim_id_prefix().ends_with("_claim"));
        }
        assert_eq!(Chain::Solana.nft_currency(), "SOL_NFT");
        assert_eq!(Chain::Ic.nft_currency(), "ICP_NFT");
    }

    #[test]
    fn chain_accepts_legacy_spellings() {
        let chain: Chain = serde_json::from_str("\"Solana\"").unwrap();
        assert_eq!(chain, Chain::Solana);
        let chain: Chain = serde_json::from_str("\"sui\"").unwrap();
        assert_eq!(chain, Chain::Sui);
        assert_eq!(serde_json::to_string(&Chain::Ic).unwrap(), "\"IC\"");
    }

    #[test]
    fn records_serialize_with_upstream_field_names() {
        let record = TransactionRecord {
            id: "sui_stake_1700000000000".to_string(),
            user_principal: "user-1".to_string(),
            kind: "sui_nft_staking".to_string(),
            amount: 0,
            currency: "SUI_NFT".to_string(),
            transaction_hash: "0xabc".to_string(),
            chain: Chain::Sui,
            timestamp: 1_700_000_000_000,
            metadata: Metadata::new(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["userPrincipal"], "user-1");
        assert_eq!(json["type"], "sui_nft_staking");
        assert_eq!(json["transactionHash"], "0xabc");
        assert_eq!(json["chain"], "SUI");
    }

    #[test]
    fn staking_activity_without_status_omits_the_field() {
        let activity = StakingActivity {
            id: "staking_1700000000000".to_string(),
            user_principal: "user-1".to_string(),
            action: StakeAction::Stake,
            amount: 3,
            currency: "SPICY".to_string(),
            chain: Chain::Ic,
            transaction_hash: "0xdef".to_string(),
            timestamp: 1_700_000_000_000,
            metadata: Metadata::new(),
            status: None,
        };
        let json = serde_json::to_value(&activity).unwrap();
        assert_eq!(json["type"], "stake");
        assert!(json.get("status").is_none());

        let parsed: StakingActivity =
            serde_json::from_str(r#"{"id":"staking_1","userPrincipal":"u","type":"claim","amount":1,"currency":"SPICY","chain":"IC","transactionHash":"h","timestamp":5,"status":"active"}"#)
                .unwrap();
        assert_eq!(parsed.status.as_deref(), Some("active"));
        assert_eq!(parsed.action, StakeAction::Claim);
    }
}
