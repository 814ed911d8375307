//! Proposals and their derived results.

use crate::vote::VoteChoice;
use serde::{Deserialize, Serialize};
use spicy_core::Metadata;

/// Ballot options used when a draft does not supply its own.
pub const DEFAULT_OPTIONS: [&str; 3] = ["For", "Against", "Abstain"];

/// Category used when a draft does not supply one.
pub const DEFAULT_CATEGORY: &str = "general";

/// Lifecycle state of a proposal.
///
/// Only `Active` is ever assigned; there is no closing transition, and
/// expiry is checked reactively against `expiresAt` at vote time. `Closed`
/// exists so externally edited snapshots remain loadable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    /// Open for voting, subject to the expiry timestamp.
    Active,
    /// Not open for voting.
    Closed,
}

/// Power-weighted tally buckets, one per ballot option.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    /// Power cast in favor.
    #[serde(rename = "for")]
    pub in_favor: u64,
    /// Power cast against.
    pub against: u64,
    /// Power cast as abstention.
    pub abstain: u64,
}

impl VoteTally {
    /// Power currently sitting in the bucket for `choice`.
    pub fn bucket(&self, choice: VoteChoice) -> u64 {
        match choice {
            VoteChoice::For => self.in_favor,
            VoteChoice::Against => self.against,
            VoteChoice::Abstain => self.abstain,
        }
    }

    pub(crate) fn bucket_mut(&mut self, choice: VoteChoice) -> &mut u64 {
        match choice {
            VoteChoice::For => &mut self.in_favor,
            VoteChoice::Against => &mut self.against,
            VoteChoice::Abstain => &mut self.abstain,
        }
    }

    /// Sum of all buckets, in vote-weight units.
    pub fn total(&self) -> u64 {
        self.in_favor + self.against + self.abstain
    }
}

/// Caller input for proposal creation; omitted fields take the defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProposalDraft {
    /// Short headline.
    pub title: String,
    /// Full text.
    pub description: String,
    /// Ballot options; [`DEFAULT_OPTIONS`] when `None`.
    pub options: Option<Vec<String>>,
    /// Grouping label; [`DEFAULT_CATEGORY`] when `None`.
    pub category: Option<String>,
    /// Free-form caller metadata.
    pub metadata: Metadata,
}

impl ProposalDraft {
    /// Draft with only the required fields set.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }
}

/// A governance proposal with its running tally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    /// `proposal_{ms}_{suffix}` identifier.
    pub id: String,
    /// Short headline.
    pub title: String,
    /// Full text.
    pub description: String,
    /// Ballot options shown to voters.
    pub options: Vec<String>,
    /// Grouping label.
    pub category: String,
    /// Creation timestamp in milliseconds since epoch.
    pub created_at: u64,
    /// Voting deadline in milliseconds since epoch.
    pub expires_at: u64,
    /// Lifecycle state; see [`ProposalStatus`].
    pub status: ProposalStatus,
    /// Power-weighted tally.
    pub votes: VoteTally,
    /// Sum of power contributed by distinct voters.
    pub total_voting_power: u64,
    /// Number of distinct voters.
    pub voter_count: usize,
    /// Caller metadata plus the engine's compliance markers.
    #[serde(default)]
    pub metadata: Metadata,
}

impl Proposal {
    /// Whether votes are accepted at `now_ms`.
    pub fn accepts_votes_at(&self, now_ms: u64) -> bool {
        self.status == ProposalStatus::Active && now_ms <= self.expires_at
    }

    /// Derive the result view: totals, participation, and per-choice
    /// percentages, all guarded against division by zero.
    pub fn results(&self) -> ProposalResults {
        let total_votes = self.votes.total();
        let participation_rate = if self.total_voting_power > 0 {
            total_votes as f64 / self.total_voting_power as f64 * 100.0
        } else {
            0.0
        };
        let percentage = |bucket: u64| {
            if total_votes > 0 {
                bucket as f64 / total_votes as f64 * 100.0
            } else {
                0.0
            }
        };

        ProposalResults {
            proposal_id: self.id.clone(),
            title: self.title.clone(),
            status: self.status,
            votes: self.votes,
            total_votes,
            participation_rate,
            voter_count: self.voter_count,
            created_at: self.created_at,
            expires_at: self.expires_at,
            results: ChoiceBreakdown {
                in_favor: self.votes.in_favor,
                against: self.votes.against,
                abstain: self.votes.abstain,
                for_percentage: percentage(self.votes.in_favor),
                against_percentage: percentage(self.votes.against),
                abstain_percentage: percentage(self.votes.abstain),
            },
        }
    }
}

/// Read model for a proposal's outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalResults {
    /// Proposal identifier.
    pub proposal_id: String,
    /// Proposal headline.
    pub title: String,
    /// Lifecycle state at read time.
    pub status: ProposalStatus,
    /// Raw tally buckets.
    pub votes: VoteTally,
    /// Sum of the buckets, in vote-weight units (not voter count).
    pub total_votes: u64,
    /// `totalVotes / totalVotingPower x 100`, zero when no power.
    pub participation_rate: f64,
    /// Number of distinct voters.
    pub voter_count: usize,
    /// Creation timestamp.
    pub created_at: u64,
    /// Voting deadline.
    pub expires_at: u64,
    /// Buckets with their share of the total.
    pub results: ChoiceBreakdown,
}

/// Per-choice share of the cast power.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceBreakdown {
    /// Power in favor.
    #[serde(rename = "for")]
    pub in_favor: u64,
    /// Power against.
    pub against: u64,
    /// Power abstaining.
    pub abstain: u64,
    /// Percentage of the cast power in favor.
    pub for_percentage: f64,
    /// Percentage of the cast power against.
    pub against_percentage: f64,
    /// Percentage of the cast power abstaining.
    pub abstain_percentage: f64,
}
