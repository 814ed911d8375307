//! The transaction ledger service.

use crate::analytics::{
    ActivityCounts, AnalyticsOverview, ChainActivity, ChainBreakdown, ChainCounts,
    MultiChainAnalytics, StakedNftTotals, StakingAggregate, UserAnalytics, VotingAggregate,
};
use crate::error::LedgerError;
use crate::types::{
    Chain, NftStakeEvent, RewardClaimEvent, StakingActivity, StakingEvent, TransactionRecord,
    VoteActivity, VotingEvent, VIRTUAL_SPICY_CURRENCY,
};
use async_trait::async_trait;
use spicy_core::id::scoped_id;
use spicy_core::persist::{load_or_default, store_logged};
use spicy_core::{Metadata, StorageEffects, TimeEffects};
use std::sync::Arc;
use tracing::debug;

/// Storage key for the SUI transaction log.
pub const SUI_TRANSACTIONS_KEY: &str = "ic_spicy_sui_transactions";
/// Storage key for the Solana transaction log.
pub const SOLANA_TRANSACTIONS_KEY: &str = "ic_spicy_solana_transactions";
/// Storage key for the IC transaction log.
pub const IC_TRANSACTIONS_KEY: &str = "ic_spicy_ic_transactions";
/// Storage key for the virtual SPICY balance.
pub const VIRTUAL_BALANCE_KEY: &str = "ic_spicy_virtual_balance";
/// Storage key for the cumulative voting history.
pub const VOTING_HISTORY_KEY: &str = "ic_spicy_voting_history";
/// Storage key for the staking-activity history.
pub const STAKING_HISTORY_KEY: &str = "ic_spicy_staking_history";

/// Multi-chain activity ledger.
///
/// Owns one append-only log per chain plus the voting history, staking
/// history, and virtual balance. Construction loads all six pieces from
/// the injected store; every mutation appends in memory first and then
/// persists the full state, so a broken store costs durability but never
/// a record.
///
/// The ledger is a single logical actor: callers that share one instance
/// across tasks wrap it in a `tokio::sync::Mutex`, which also makes it
/// usable as the engine's [`VotingSink`].
pub struct TransactionLedger {
    storage: Arc<dyn StorageEffects>,
    clock: Arc<dyn TimeEffects>,
    sui_transactions: Vec<TransactionRecord>,
    solana_transactions: Vec<TransactionRecord>,
    ic_transactions: Vec<TransactionRecord>,
    virtual_spicy_balance: u64,
    voting_history: Vec<VoteActivity>,
    staking_history: Vec<StakingActivity>,
}

impl TransactionLedger {
    /// Load a ledger from the store.
    ///
    /// Missing keys start empty; unreadable or unparseable values are
    /// logged and start empty as well.
    pub async fn load(storage: Arc<dyn StorageEffects>, clock: Arc<dyn TimeEffects>) -> Self {
        let sui_transactions = load_or_default(storage.as_ref(), SUI_TRANSACTIONS_KEY).await;
        let solana_transactions = load_or_default(storage.as_ref(), SOLANA_TRANSACTIONS_KEY).await;
        let ic_transactions = load_or_default(storage.as_ref(), IC_TRANSACTIONS_KEY).await;
        let virtual_spicy_balance = load_or_default(storage.as_ref(), VIRTUAL_BALANCE_KEY).await;
        let voting_history = load_or_default(storage.as_ref(), VOTING_HISTORY_KEY).await;
        let staking_history = load_or_default(storage.as_ref(), STAKING_HISTORY_KEY).await;

        Self {
            storage,
            clock,
            sui_transactions,
            solana_transactions,
            ic_transactions,
            virtual_spicy_balance,
            voting_history,
            staking_history,
        }
    }

    /// Record an NFT staking transaction on `chain`.
    ///
    /// The NFT id and lock duration ride in the record metadata; caller
    /// metadata wins on key collisions.
    pub async fn record_nft_staking(
        &mut self,
        chain: Chain,
        event: NftStakeEvent,
    ) -> Result<TransactionRecord, LedgerError> {
        require_field(&event.user_principal, "userPrincipal")?;
        require_field(&event.transaction_hash, "transactionHash")?;

        let now = self.clock.now_ms().await;
        let mut metadata = Metadata::new();
        metadata.insert("nftId".to_string(), event.nft_id.into());
        metadata.insert("lockDuration".to_string(), event.lock_duration.into());
        metadata.extend(event.metadata);

        let record = TransactionRecord {
            id: scoped_id(chain.stake_id_prefix(), now),
            user_principal: event.user_principal,
            kind: chain.staking_type().to_string(),
            amount: 0,
            currency: chain.nft_currency().to_string(),
            transaction_hash: event.transaction_hash,
            chain,
            timestamp: now,
            metadata,
        };
        self.chain_log_mut(chain).push(record.clone());
        self.persist().await;

        debug!(%chain, id = %record.id, "nft staking transaction recorded");
        Ok(record)
    }

    /// Record a reward claim on `chain` and credit the virtual balance.
    pub async fn record_reward_claim(
        &mut self,
        chain: Chain,
        event: RewardClaimEvent,
    ) -> Result<TransactionRecord, LedgerError> {
        require_field(&event.user_principal, "userPrincipal")?;
        require_field(&event.transaction_hash, "transactionHash")?;

        let now = self.clock.now_ms().await;
        let mut metadata = Metadata::new();
        metadata.insert("stakeId".to_string(), event.stake_id.into());
        metadata.extend(event.metadata);

        let record = TransactionRecord {
            id: scoped_id(chain.claim_id_prefix(), now),
            user_principal: event.user_principal,
            kind: chain.claim_type().to_string(),
            amount: event.rewards,
            currency: VIRTUAL_SPICY_CURRENCY.to_string(),
            transaction_hash: event.transaction_hash,
            chain,
            timestamp: now,
            metadata,
        };
        self.chain_log_mut(chain).push(record.clone());
        self.virtual_spicy_balance = self.virtual_spicy_balance.saturating_add(event.rewards);
        self.persist().await;

        debug!(%chain, id = %record.id, rewards = event.rewards, "reward claim transaction recorded");
        Ok(record)
    }

    /// Record a voting activity in the cumulative history.
    pub async fn record_voting(&mut self, event: VotingEvent) -> Result<VoteActivity, LedgerError> {
        require_field(&event.user_principal, "userPrincipal")?;
        require_field(&event.transaction_hash, "transactionHash")?;

        let now = self.clock.now_ms().await;
        let vote = VoteActivity {
            id: scoped_id("vote", now),
            user_principal: event.user_principal,
            proposal_id: event.proposal_id,
            vote_for: event.vote_for,
            voting_power: event.voting_power,
            transaction_hash: event.transaction_hash,
            timestamp: now,
            metadata: event.metadata,
        };
        self.voting_history.push(vote.clone());
        self.persist().await;

        debug!(id = %vote.id, proposal_id = %vote.proposal_id, "voting transaction recorded");
        Ok(vote)
    }

    /// Record a staking activity (stake, unstake, or claim).
    ///
    /// No `status` is ever written, so these entries never count as
    /// active stakes.
    pub async fn record_staking_activity(
        &mut self,
        event: StakingEvent,
    ) -> Result<StakingActivity, LedgerError> {
        require_field(&event.user_principal, "userPrincipal")?;
        require_field(&event.transaction_hash, "transactionHash")?;

        let now = self.clock.now_ms().await;
        let activity = StakingActivity {
            id: scoped_id("staking", now),
            user_principal: event.user_principal,
            action: event.action,
            amount: event.amount,
            currency: event.currency,
            chain: event.chain,
            transaction_hash: event.transaction_hash,
            timestamp: now,
            metadata: event.metadata,
            status: None,
        };
        self.staking_history.push(activity.clone());
        self.persist().await;

        debug!(action = ?activity.action, id = %activity.id, "staking activity recorded");
        Ok(activity)
    }

    /// Analytics snapshot across all chains. Pure read.
    pub fn multi_chain_analytics(&self) -> MultiChainAnalytics {
        let total_transactions = self.sui_transactions.len()
            + self.solana_transactions.len()
            + self.ic_transactions.len();
        let total_voting_power: u64 = self.voting_history.iter().map(|v| v.voting_power).sum();
        let total_votes = self.voting_history.len();
        let average_voting_power = if total_votes > 0 {
            total_voting_power as f64 / total_votes as f64
        } else {
            0.0
        };

        MultiChainAnalytics {
            overview: AnalyticsOverview {
                total_transactions,
                total_voting_power,
                total_staking_transactions: self.staking_history.len(),
                virtual_spicy_balance: self.virtual_spicy_balance,
            },
            by_chain: ChainBreakdown {
                sui: self.chain_activity(Chain::Sui),
                solana: self.chain_activity(Chain::Solana),
                ic: self.chain_activity(Chain::Ic),
            },
            voting: VotingAggregate {
                total_votes,
                total_voting_power,
                average_voting_power,
            },
            staking: StakingAggregate {
                total_stakes: self.staking_history.len(),
                active_stakes: self
                    .staking_history
                    .iter()
                    .filter(|s| s.status.as_deref() == Some("active"))
                    .count(),
            },
        }
    }

    /// Activity summary for one user. Pure read.
    pub fn user_analytics(&self, user_principal: &str) -> UserAnalytics {
        let count_on = |chain: Chain| {
            self.chain_log(chain)
                .iter()
                .filter(|t| t.user_principal == user_principal)
                .count()
        };
        let chains = ChainCounts {
            sui: count_on(Chain::Sui),
            solana: count_on(Chain::Solana),
            ic: count_on(Chain::Ic),
        };

        let user_records = || {
            Chain::ALL
                .iter()
                .flat_map(|chain| self.chain_log(*chain))
                .filter(|t| t.user_principal == user_principal)
        };
        let user_votes: Vec<&VoteActivity> = self
            .voting_history
            .iter()
            .filter(|v| v.user_principal == user_principal)
            .collect();

        UserAnalytics {
            total_transactions: chains.sui + chains.solana + chains.ic,
            total_voting_power: user_votes.iter().map(|v| v.voting_power).sum(),
            total_votes: user_votes.len(),
            chains,
            activities: ActivityCounts {
                staking: user_records().filter(|t| t.kind.contains("staking")).count(),
                voting: user_votes.len(),
                rewards: user_records().filter(|t| t.kind.contains("claim")).count(),
            },
        }
    }

    /// Current virtual SPICY balance.
    ///
    /// Always equals the sum of every reward-claim amount recorded since
    /// the last clear.
    pub fn virtual_spicy_balance(&self) -> u64 {
        self.virtual_spicy_balance
    }

    /// NFT-staking record counts, total and per chain. Pure read.
    pub fn staked_nft_totals(&self) -> StakedNftTotals {
        let staked_on = |chain: Chain| {
            self.chain_log(chain)
                .iter()
                .filter(|t| t.kind == chain.staking_type())
                .count()
        };
        let by_chain = ChainCounts {
            sui: staked_on(Chain::Sui),
            solana: staked_on(Chain::Solana),
            ic: staked_on(Chain::Ic),
        };
        StakedNftTotals {
            total: by_chain.sui + by_chain.solana + by_chain.ic,
            by_chain,
        }
    }

    /// Transaction records, newest first.
    ///
    /// With a chain filter, only that chain's log; otherwise all three
    /// merged.
    pub fn transaction_history(&self, chain: Option<Chain>) -> Vec<TransactionRecord> {
        let mut records: Vec<TransactionRecord> = match chain {
            Some(chain) => self.chain_log(chain).clone(),
            None => Chain::ALL
                .iter()
                .flat_map(|chain| self.chain_log(*chain).iter().cloned())
                .collect(),
        };
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        records
    }

    /// The raw transaction log for one chain.
    pub fn transactions(&self, chain: Chain) -> &[TransactionRecord] {
        self.chain_log(chain)
    }

    /// The cumulative voting history.
    pub fn voting_history(&self) -> &[VoteActivity] {
        &self.voting_history
    }

    /// The staking-activity history.
    pub fn staking_history(&self) -> &[StakingActivity] {
        &self.staking_history
    }

    /// Reset every piece of state to empty and persist the cleared state.
    pub async fn clear_all_data(&mut self) {
        self.sui_transactions.clear();
        self.solana_transactions.clear();
        self.ic_transactions.clear();
        self.virtual_spicy_balance = 0;
        self.voting_history.clear();
        self.staking_history.clear();
        self.persist().await;

        debug!("ledger data cleared");
    }

    fn chain_log(&self, chain: Chain) -> &Vec<TransactionRecord> {
        match chain {
            Chain::Sui => &self.sui_transactions,
            Chain::Solana => &self.solana_transactions,
            Chain::Ic => &self.ic_transactions,
        }
    }

    fn chain_log_mut(&mut self, chain: Chain) -> &mut Vec<TransactionRecord> {
        match chain {
            Chain::Sui => &mut self.sui_transactions,
            Chain::Solana => &mut self.solana_transactions,
            Chain::Ic => &mut self.ic_transactions,
        }
    }

    fn chain_activity(&self, chain: Chain) -> ChainActivity {
        let log = self.chain_log(chain);
        ChainActivity {
            transactions: log.len(),
            staking: log.iter().filter(|t| t.kind == chain.staking_type()).count(),
            rewards: log.iter().filter(|t| t.kind == chain.claim_type()).count(),
        }
    }

    async fn persist(&self) {
        let storage = self.storage.as_ref();
        store_logged(storage, SUI_TRANSACTIONS_KEY, &self.sui_transactions).await;
        store_logged(storage, SOLANA_TRANSACTIONS_KEY, &self.solana_transactions).await;
        store_logged(storage, IC_TRANSACTIONS_KEY, &self.ic_transactions).await;
        store_logged(storage, VIRTUAL_BALANCE_KEY, &self.virtual_spicy_balance).await;
        store_logged(storage, VOTING_HISTORY_KEY, &self.voting_history).await;
        store_logged(storage, STAKING_HISTORY_KEY, &self.staking_history).await;
    }
}

fn require_field(value: &str, field: &'static str) -> Result<(), LedgerError> {
    if value.is_empty() {
        return Err(LedgerError::MissingField { field });
    }
    Ok(())
}

/// Write-side seam the governance engine mirrors accepted votes through.
///
/// One-way and best-effort: the engine logs a sink failure and keeps the
/// vote, so implementations may refuse service without affecting voting.
#[async_trait]
pub trait VotingSink: Send + Sync {
    /// Append a voting activity to the cumulative history.
    async fn record_voting(&self, event: VotingEvent) -> Result<VoteActivity, LedgerError>;
}

#[async_trait]
impl VotingSink for tokio::sync::Mutex<TransactionLedger> {
    async fn record_voting(&self, event: VotingEvent) -> Result<VoteActivity, LedgerError> {
        self.lock().await.record_voting(event).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use spicy_testkit::MockEffects;

    fn stake_event(user: &str) -> NftStakeEvent {
        NftStakeEvent {
            user_principal: user.to_string(),
            nft_id: "nft-1".to_string(),
            lock_duration: 30,
            transaction_hash: "0xstake".to_string(),
            metadata: Metadata::new(),
        }
    }

    async fn ledger(effects: &MockEffects) -> TransactionLedger {
        TransactionLedger::load(Arc::new(effects.clone()), Arc::new(effects.clone())).await
    }

    #[tokio::test]
    async fn staking_record_has_upstream_shape() {
        let effects = MockEffects::deterministic();
        let mut ledger = ledger(&effects).await;

        let record = ledger
            .record_nft_staking(Chain::Sui, stake_event("user-1"))
            .await
            .unwrap();

        assert!(record.id.starts_with("sui_stake_"));
        assert_eq!(record.kind, "sui_nft_staking");
        assert_eq!(record.amount, 0);
        assert_eq!(record.currency, "SUI_NFT");
        assert_eq!(record.metadata["nftId"], "nft-1");
        assert_eq!(record.metadata["lockDuration"], 30);
    }

    #[tokio::test]
    async fn caller_metadata_wins_on_collision() {
        let effects = MockEffects::deterministic();
        let mut ledger = ledger(&effects).await;

        let mut event = stake_event("user-1");
        event.metadata.insert("nftId".to_string(), "override".into());
        event.metadata.insert("campaign".to_string(), "launch".into());
        let record = ledger.record_nft_staking(Chain::Ic, event).await.unwrap();

        assert_eq!(record.metadata["nftId"], "override");
        assert_eq!(record.metadata["campaign"], "launch");
    }

    #[tokio::test]
    async fn empty_required_fields_are_rejected() {
        let effects = MockEffects::deterministic();
        let mut ledger = ledger(&effects).await;

        let err = ledger
            .record_nft_staking(Chain::Sui, stake_event(""))
            .await
            .unwrap_err();
        assert_matches!(err, LedgerError::MissingField { field: "userPrincipal" });

        let mut event = stake_event("user-1");
        event.transaction_hash = String::new();
        let err = ledger.record_nft_staking(Chain::Sui, event).await.unwrap_err();
        assert_matches!(err, LedgerError::MissingField { field: "transactionHash" });

        // Nothing was appended or persisted.
        assert_eq!(ledger.transactions(Chain::Sui).len(), 0);
        assert_eq!(effects.stored_value(SUI_TRANSACTIONS_KEY), None);
    }

    #[tokio::test]
    async fn reward_claims_credit_the_balance() {
        let effects = MockEffects::deterministic();
        let mut ledger = ledger(&effects).await;

        for rewards in [10, 25] {
            ledger
                .record_reward_claim(
                    Chain::Solana,
                    RewardClaimEvent {
                        user_principal: "user-1".to_string(),
                        stake_id: "stake-1".to_string(),
                        rewards,
                        transaction_hash: "0xclaim".to_string(),
                        metadata: Metadata::new(),
                    },
                )
                .await
                .unwrap();
        }

        assert_eq!(ledger.virtual_spicy_balance(), 35);
        let record = &ledger.transactions(Chain::Solana)[1];
        assert_eq!(record.amount, 25);
        assert_eq!(record.currency, VIRTUAL_SPICY_CURRENCY);
        assert!(record.id.starts_with("solana_claim_"));
    }

    #[tokio::test]
    async fn persists_all_six_keys_on_mutation() {
        let effects = MockEffects::deterministic();
        let mut ledger = ledger(&effects).await;

        ledger
            .record_nft_staking(Chain::Sui, stake_event("user-1"))
            .await
            .unwrap();

        assert_eq!(
            effects.storage_keys(),
            vec![
                IC_TRANSACTIONS_KEY.to_string(),
                SOLANA_TRANSACTIONS_KEY.to_string(),
                STAKING_HISTORY_KEY.to_string(),
                SUI_TRANSACTIONS_KEY.to_string(),
                VIRTUAL_BALANCE_KEY.to_string(),
                VOTING_HISTORY_KEY.to_string(),
            ]
        );
    }
}
