//! Compliance configuration for the voting engine.

/// Weighting curve applied to raw NFT power.
///
/// Only [`Linear`](VoteWeighting::Linear) affects the computation today; the
/// other curves are declared for configuration compatibility and are treated
/// as linear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteWeighting {
    /// Power counts as-is.
    Linear,
    /// Declared but computed as linear.
    Quadratic,
    /// Declared but computed as linear.
    Logarithmic,
}

/// Anti-abuse limits enforced by the engine.
///
/// Immutable for the lifetime of an engine instance; injected at
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplianceConfig {
    /// Upper bound on a single user's total voting power.
    pub max_voting_power: u64,
    /// Seconds a user must wait between votes, across all proposals.
    pub voting_cooldown_secs: u64,
    /// Seconds a new proposal stays open after creation.
    pub proposal_duration_secs: u64,
    /// Seconds an NFT must have been staked before it counts.
    pub minimum_stake_duration_secs: u64,
    /// When set, a repeat vote replaces the existing one instead of
    /// stacking a second record.
    pub anti_double_voting: bool,
    /// Declared weighting curve; see [`VoteWeighting`].
    pub vote_weighting: VoteWeighting,
    /// Declared ownership-verification requirement; descriptors arrive from
    /// the caller already scoped to one user, so no check runs here.
    pub require_nft_verification: bool,
}

impl Default for ComplianceConfig {
    fn default() -> Self {
        Self {
            max_voting_power: 1000,
            voting_cooldown_secs: 86_400,
            proposal_duration_secs: 604_800,
            minimum_stake_duration_secs: 86_400,
            anti_double_voting: true,
            vote_weighting: VoteWeighting::Linear,
            require_nft_verification: true,
        }
    }
}

impl ComplianceConfig {
    /// Cooldown window in milliseconds.
    pub(crate) fn cooldown_ms(&self) -> u64 {
        self.voting_cooldown_secs * 1000
    }

    /// Proposal lifetime in milliseconds.
    pub(crate) fn proposal_duration_ms(&self) -> u64 {
        self.proposal_duration_secs * 1000
    }

    /// Minimum stake age in milliseconds.
    pub(crate) fn minimum_stake_duration_ms(&self) -> u64 {
        self.minimum_stake_duration_secs * 1000
    }
}
