//! Vote records and choices.

use crate::proposal::Proposal;
use serde::{Deserialize, Serialize};
use spicy_core::Metadata;
use std::fmt;

/// The three fixed ballot options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoteChoice {
    /// In favor of the proposal.
    For,
    /// Against the proposal.
    Against,
    /// Counted for participation without taking a side.
    Abstain,
}

impl VoteChoice {
    /// Wire spelling of the choice, matching the default option list.
    pub fn as_str(self) -> &'static str {
        match self {
            VoteChoice::For => "For",
            VoteChoice::Against => "Against",
            VoteChoice::Abstain => "Abstain",
        }
    }
}

impl fmt::Display for VoteChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cast vote, one per `(proposal, user)` pair under anti-double-voting.
///
/// A changed vote keeps its original id and gains the new choice, power,
/// and timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    /// `vote_{ms}_{suffix}` identifier.
    pub id: String,
    /// Proposal the vote applies to.
    pub proposal_id: String,
    /// Voter principal.
    pub user_principal: String,
    /// Ballot option taken.
    pub vote_choice: VoteChoice,
    /// Clamped power this vote carried into the tally.
    pub voting_power: u64,
    /// Ids of the staked NFTs the power was computed from.
    pub nfts_used: Vec<String>,
    /// Cast (or last changed) timestamp in milliseconds since epoch.
    pub timestamp: u64,
    /// Caller metadata plus the engine's compliance markers.
    #[serde(default)]
    pub metadata: Metadata,
}

/// Successful outcome of a vote call.
#[derive(Debug, Clone, PartialEq)]
pub struct VoteReceipt {
    /// The stored vote record.
    pub vote: Vote,
    /// Snapshot of the proposal after the tally update.
    pub proposal: Proposal,
}
