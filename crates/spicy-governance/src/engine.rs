//! The voting engine.
//!
//! Owns proposals, cast votes, and the per-NFT voting-rights cache, all
//! persisted under their fixed keys. Voting power comes from the rarity of
//! the caller's staked NFTs; eligibility enforces proposal liveness, a
//! minimum stake age, and a per-user cooldown that spans all proposals.
//! Accepted votes are mirrored to the transaction ledger through an injected
//! sink on a best-effort basis.

use crate::audit::{run_audit, ComplianceAudit};
use crate::config::ComplianceConfig;
use crate::error::GovernanceError;
use crate::nft::{NftVotingRight, StakedNft};
use crate::proposal::{
    Proposal, ProposalDraft, ProposalResults, ProposalStatus, VoteTally, DEFAULT_CATEGORY,
    DEFAULT_OPTIONS,
};
use crate::vote::{Vote, VoteChoice, VoteReceipt};
use serde::Serialize;
use serde_json::Value;
use spicy_core::id::{suffixed_id, ID_SUFFIX_LEN};
use spicy_core::persist::{load_or_default, store_logged};
use spicy_core::{Metadata, RandomEffects, StorageEffects, TimeEffects};
use spicy_ledger::{VotingEvent, VotingSink};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Key holding the proposal list.
pub const ACTIVE_PROPOSALS_KEY: &str = "ic_spicy_active_proposals";
/// Key holding the cast-vote list.
pub const USER_VOTES_KEY: &str = "ic_spicy_user_votes";
/// Key holding the per-NFT voting-rights cache.
pub const NFT_VOTING_RIGHTS_KEY: &str = "ic_spicy_nft_voting_rights";

/// Aggregate view over proposals and the cumulative voting history.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VotingStatistics {
    /// All proposals ever created (the list is never pruned).
    pub total_proposals: usize,
    /// Proposals currently accepting votes.
    pub active_proposals: usize,
    /// Proposals whose status left `active`.
    pub completed_proposals: usize,
    /// Entries in the cumulative voting history, counting vote changes.
    pub total_votes: usize,
    /// Distinct principals in the history.
    pub unique_voters: usize,
    /// Mean power per history entry.
    pub average_voting_power: f64,
    /// History entries per unique voter.
    pub participation_rate: f64,
}

/// NFT-weighted proposal voting with anti-abuse rules.
///
/// Single-actor: every mutating operation takes `&mut self` and callers
/// serialize access themselves. Persistence failures are logged and the
/// in-memory state stands, so two instances over one store follow
/// last-writer-wins with no coordination.
pub struct VotingEngine {
    storage: Arc<dyn StorageEffects>,
    clock: Arc<dyn TimeEffects>,
    random: Arc<dyn RandomEffects>,
    sink: Arc<dyn VotingSink>,
    config: ComplianceConfig,
    proposals: Vec<Proposal>,
    user_votes: Vec<Vote>,
    nft_voting_rights: BTreeMap<String, NftVotingRight>,
    // Derived log: rebuilt from the stored votes at load, appended on every
    // accepted vote afterwards. The cooldown and the statistics read it.
    voting_history: Vec<Vote>,
    last_voting_power: u64,
}

impl VotingEngine {
    /// Load engine state from storage.
    ///
    /// Missing or unreadable values fall back to empty state with a logged
    /// warning; construction never fails.
    pub async fn load(
        storage: Arc<dyn StorageEffects>,
        clock: Arc<dyn TimeEffects>,
        random: Arc<dyn RandomEffects>,
        sink: Arc<dyn VotingSink>,
        config: ComplianceConfig,
    ) -> Self {
        let proposals: Vec<Proposal> = load_or_default(storage.as_ref(), ACTIVE_PROPOSALS_KEY).await;
        let user_votes: Vec<Vote> = load_or_default(storage.as_ref(), USER_VOTES_KEY).await;
        let nft_voting_rights: BTreeMap<String, NftVotingRight> =
            load_or_default(storage.as_ref(), NFT_VOTING_RIGHTS_KEY).await;

        // Every stored vote is an accepted past vote carrying its pair's
        // latest timestamp, which is all the cooldown needs after a restart.
        let voting_history = user_votes.clone();

        debug!(
            proposals = proposals.len(),
            votes = user_votes.len(),
            rights = nft_voting_rights.len(),
            "voting engine loaded"
        );

        Self {
            storage,
            clock,
            random,
            sink,
            config,
            proposals,
            user_votes,
            nft_voting_rights,
            voting_history,
            last_voting_power: 0,
        }
    }

    /// Sum the rarity-derived power of `staked_nfts`, clamped to the
    /// configured maximum.
    ///
    /// Refreshes the voting-rights cache entry for every NFT seen (last
    /// write wins) and the last-computed-power scalar, then persists.
    pub async fn calculate_voting_power(
        &mut self,
        user_principal: &str,
        staked_nfts: &[StakedNft],
    ) -> u64 {
        let now = self.clock.now_ms().await;

        let mut total: u64 = 0;
        for nft in staked_nfts {
            let descriptor = nft.descriptor();
            let power = descriptor.voting_power();
            total = total.saturating_add(power);
            self.nft_voting_rights.insert(
                descriptor.id,
                NftVotingRight {
                    power,
                    user_principal: user_principal.to_string(),
                    last_updated: now,
                },
            );
        }

        let total = total.min(self.config.max_voting_power);
        self.last_voting_power = total;
        self.persist().await;

        debug!(
            user = %user_principal,
            power = total,
            nfts = staked_nfts.len(),
            "voting power calculated"
        );
        total
    }

    /// Check whether `user_principal` may vote on `proposal_id` with the
    /// given NFTs, returning the subset that meets the stake-age rule.
    ///
    /// Checks run in a fixed order: proposal liveness, expiry, stake age,
    /// then the global cooldown.
    pub async fn validate_voting_eligibility(
        &self,
        proposal_id: &str,
        user_principal: &str,
        staked_nfts: &[StakedNft],
    ) -> Result<Vec<StakedNft>, GovernanceError> {
        let now = self.clock.now_ms().await;
        self.check_eligibility(proposal_id, user_principal, staked_nfts, now)
    }

    fn check_eligibility(
        &self,
        proposal_id: &str,
        user_principal: &str,
        staked_nfts: &[StakedNft],
        now_ms: u64,
    ) -> Result<Vec<StakedNft>, GovernanceError> {
        let proposal = self
            .proposals
            .iter()
            .find(|proposal| proposal.id == proposal_id)
            .filter(|proposal| proposal.status == ProposalStatus::Active)
            .ok_or(GovernanceError::ProposalNotActive)?;

        if now_ms > proposal.expires_at {
            return Err(GovernanceError::ProposalExpired);
        }

        let minimum_age = self.config.minimum_stake_duration_ms();
        let eligible: Vec<StakedNft> = staked_nfts
            .iter()
            .filter(|nft| now_ms.saturating_sub(nft.staked_at) >= minimum_age)
            .cloned()
            .collect();
        if eligible.is_empty() {
            return Err(GovernanceError::StakeTooRecent);
        }

        // The cooldown is global per user: the most recent vote on any
        // proposal arms it, including a changed vote.
        let last_vote_ms = self
            .voting_history
            .iter()
            .filter(|vote| vote.user_principal == user_principal)
            .map(|vote| vote.timestamp)
            .max();
        if let Some(last) = last_vote_ms {
            if now_ms.saturating_sub(last) < self.config.cooldown_ms() {
                return Err(GovernanceError::CooldownActive);
            }
        }

        Ok(eligible)
    }

    /// Create an active proposal from `draft`, filling defaults, and
    /// persist it.
    pub async fn create_proposal(&mut self, draft: ProposalDraft) -> Proposal {
        let now = self.clock.now_ms().await;
        let entropy = self.random.random_bytes(ID_SUFFIX_LEN).await;

        let mut metadata = draft.metadata;
        metadata.insert("complianceVersion".to_string(), Value::from("1.0"));
        metadata.insert("createdBy".to_string(), Value::from("system"));

        let proposal = Proposal {
            id: suffixed_id("proposal", now, &entropy),
            title: draft.title,
            description: draft.description,
            options: draft
                .options
                .unwrap_or_else(|| DEFAULT_OPTIONS.iter().map(|option| option.to_string()).collect()),
            category: draft.category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            created_at: now,
            expires_at: now.saturating_add(self.config.proposal_duration_ms()),
            status: ProposalStatus::Active,
            votes: VoteTally::default(),
            total_voting_power: 0,
            voter_count: 0,
            metadata,
        };

        self.proposals.push(proposal.clone());
        self.persist().await;

        info!(proposal = %proposal.id, title = %proposal.title, "proposal created");
        proposal
    }

    /// Cast, or change, a vote on `proposal_id`.
    ///
    /// On success the vote is tallied, appended to the cumulative history,
    /// mirrored to the ledger sink (best effort), and persisted. Eligibility
    /// refusals come back as [`GovernanceError`] values with fixed reasons;
    /// the engine state is untouched in that case.
    pub async fn vote_on_proposal(
        &mut self,
        proposal_id: &str,
        choice: VoteChoice,
        user_principal: &str,
        staked_nfts: &[StakedNft],
    ) -> Result<VoteReceipt, GovernanceError> {
        let eligible = self
            .validate_voting_eligibility(proposal_id, user_principal, staked_nfts)
            .await?;

        // Power is always recomputed from the eligible NFTs, never read
        // back from the rights cache.
        let voting_power = self.calculate_voting_power(user_principal, &eligible).await;

        let now = self.clock.now_ms().await;
        let entropy = self.random.random_bytes(ID_SUFFIX_LEN).await;
        let nfts_used: Vec<String> = eligible.iter().map(|nft| nft.id.clone()).collect();

        let mut metadata = Metadata::new();
        metadata.insert("chain".to_string(), Value::from("multi-chain"));
        metadata.insert("complianceVersion".to_string(), Value::from("1.0"));

        let vote = Vote {
            id: suffixed_id("vote", now, &entropy),
            proposal_id: proposal_id.to_string(),
            user_principal: user_principal.to_string(),
            vote_choice: choice,
            voting_power,
            nfts_used: nfts_used.clone(),
            timestamp: now,
            metadata,
        };

        let existing = self.user_votes.iter().position(|existing| {
            existing.proposal_id == proposal_id && existing.user_principal == user_principal
        });
        let proposal = self
            .proposals
            .iter_mut()
            .find(|proposal| proposal.id == proposal_id)
            .ok_or(GovernanceError::ProposalNotActive)?;

        match existing {
            Some(index) if self.config.anti_double_voting => {
                // Change-vote: the stored record keeps its id and gains the
                // new choice, power, and timestamp. Totals and the voter
                // count stay as they were.
                let previous = &mut self.user_votes[index];
                let bucket = proposal.votes.bucket_mut(previous.vote_choice);
                *bucket = bucket.saturating_sub(previous.voting_power);
                let bucket = proposal.votes.bucket_mut(choice);
                *bucket = bucket.saturating_add(voting_power);

                previous.vote_choice = choice;
                previous.voting_power = voting_power;
                previous.timestamp = now;
            }
            _ => {
                // First vote for the pair, or duplicate stacking with
                // anti-double-voting disabled.
                let bucket = proposal.votes.bucket_mut(choice);
                *bucket = bucket.saturating_add(voting_power);
                proposal.total_voting_power =
                    proposal.total_voting_power.saturating_add(voting_power);
                proposal.voter_count += 1;
                self.user_votes.push(vote.clone());
            }
        }

        let proposal_snapshot = proposal.clone();
        self.voting_history.push(vote.clone());

        let mut mirror_metadata = Metadata::new();
        mirror_metadata.insert("nftsUsed".to_string(), Value::from(nfts_used));
        mirror_metadata.insert("chain".to_string(), Value::from("multi-chain"));
        let mirror = VotingEvent {
            user_principal: user_principal.to_string(),
            proposal_id: proposal_id.to_string(),
            vote_for: choice == VoteChoice::For,
            voting_power,
            transaction_hash: vote.id.clone(),
            metadata: mirror_metadata,
        };
        if let Err(error) = self.sink.record_voting(mirror).await {
            warn!(%error, proposal = %proposal_id, "analytics mirror failed, vote stands");
        }

        self.persist().await;

        info!(
            proposal = %proposal_id,
            user = %user_principal,
            choice = %choice,
            power = voting_power,
            "vote recorded"
        );
        Ok(VoteReceipt {
            vote,
            proposal: proposal_snapshot,
        })
    }

    /// Proposal by id, regardless of status.
    pub fn proposal(&self, proposal_id: &str) -> Option<&Proposal> {
        self.proposals.iter().find(|proposal| proposal.id == proposal_id)
    }

    /// The stored vote for a `(proposal, user)` pair, if any.
    pub fn user_vote(&self, proposal_id: &str, user_principal: &str) -> Option<&Vote> {
        self.user_votes.iter().find(|vote| {
            vote.proposal_id == proposal_id && vote.user_principal == user_principal
        })
    }

    /// Derived result view for a proposal.
    pub fn proposal_results(&self, proposal_id: &str) -> Option<ProposalResults> {
        self.proposal(proposal_id).map(Proposal::results)
    }

    /// Proposals currently accepting votes.
    pub async fn active_proposals(&self) -> Vec<Proposal> {
        let now = self.clock.now_ms().await;
        self.proposals
            .iter()
            .filter(|proposal| proposal.accepts_votes_at(now))
            .cloned()
            .collect()
    }

    /// A user's entries in the cumulative voting history, newest first.
    pub fn user_vote_history(&self, user_principal: &str) -> Vec<Vote> {
        let mut votes: Vec<Vote> = self
            .voting_history
            .iter()
            .filter(|vote| vote.user_principal == user_principal)
            .cloned()
            .collect();
        votes.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        votes
    }

    /// Aggregate statistics over proposals and the voting history.
    pub async fn voting_statistics(&self) -> VotingStatistics {
        let now = self.clock.now_ms().await;
        let active_proposals = self
            .proposals
            .iter()
            .filter(|proposal| proposal.accepts_votes_at(now))
            .count();
        let completed_proposals = self
            .proposals
            .iter()
            .filter(|proposal| proposal.status != ProposalStatus::Active)
            .count();

        let total_votes = self.voting_history.len();
        let unique_voters = self
            .voting_history
            .iter()
            .map(|vote| vote.user_principal.as_str())
            .collect::<HashSet<_>>()
            .len();
        let average_voting_power = if total_votes > 0 {
            let power_sum: u64 = self.voting_history.iter().map(|vote| vote.voting_power).sum();
            power_sum as f64 / total_votes as f64
        } else {
            0.0
        };
        let participation_rate = if unique_voters > 0 {
            total_votes as f64 / unique_voters as f64
        } else {
            0.0
        };

        VotingStatistics {
            total_proposals: self.proposals.len(),
            active_proposals,
            completed_proposals,
            total_votes,
            unique_voters,
            average_voting_power,
            participation_rate,
        }
    }

    /// Scan for duplicate votes and over-cap power.
    pub fn audit_compliance(&self) -> ComplianceAudit {
        run_audit(
            &self.user_votes,
            &self.voting_history,
            self.config.max_voting_power,
        )
    }

    /// The total from the most recent power computation.
    pub fn last_voting_power(&self) -> u64 {
        self.last_voting_power
    }

    /// All proposals, including expired ones.
    pub fn proposals(&self) -> &[Proposal] {
        &self.proposals
    }

    /// All stored votes.
    pub fn user_votes(&self) -> &[Vote] {
        &self.user_votes
    }

    /// The cumulative voting history, including changed votes.
    pub fn voting_history(&self) -> &[Vote] {
        &self.voting_history
    }

    /// The per-NFT voting-rights cache.
    pub fn nft_voting_rights(&self) -> &BTreeMap<String, NftVotingRight> {
        &self.nft_voting_rights
    }

    /// The compliance limits this engine enforces.
    pub fn config(&self) -> &ComplianceConfig {
        &self.config
    }

    /// Reset every collection and persist the cleared state.
    pub async fn clear_voting_data(&mut self) {
        self.proposals.clear();
        self.user_votes.clear();
        self.nft_voting_rights.clear();
        self.voting_history.clear();
        self.last_voting_power = 0;
        self.persist().await;
        info!("voting data cleared");
    }

    async fn persist(&self) {
        store_logged(self.storage.as_ref(), ACTIVE_PROPOSALS_KEY, &self.proposals).await;
        store_logged(self.storage.as_ref(), USER_VOTES_KEY, &self.user_votes).await;
        store_logged(
            self.storage.as_ref(),
            NFT_VOTING_RIGHTS_KEY,
            &self.nft_voting_rights,
        )
        .await;
    }
}
