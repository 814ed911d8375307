//! Compliance audit over the recorded votes.
//!
//! The scans look for conditions the engine's own rules should make
//! unreachable: duplicate `(proposal, user)` vote records (possible when
//! anti-double-voting is disabled) and per-vote power above the configured
//! cap (possible only in externally edited snapshots). Read-only.

use crate::vote::Vote;
use serde::Serialize;
use std::collections::HashMap;

/// Outcome of a compliance scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceAudit {
    /// One entry per populated scan, empty when clean.
    pub violations: Vec<ComplianceViolation>,
    /// Total offending records across all scans.
    pub total_violations: usize,
    /// `100 - 10` per populated scan, floored at zero.
    pub compliance_score: u32,
}

/// A populated scan with its record count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceViolation {
    /// Which scan fired.
    #[serde(rename = "type")]
    pub kind: ViolationKind,
    /// Number of offending records.
    pub count: usize,
    /// Fixed severity of this scan.
    pub severity: Severity,
}

/// Scans the audit performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// More than one vote record for a `(proposal, user)` pair.
    DoubleVoting,
    /// A vote carrying more power than the configured maximum.
    ExcessiveVotingPower,
}

/// Severity label attached to a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Breaks a voting invariant.
    High,
    /// Exceeds a configured limit.
    Medium,
}

/// Scan the live vote list for duplicates and the cumulative history for
/// over-cap power.
///
/// Every record belonging to a duplicated pair counts, so one pair voted
/// twice contributes two.
pub(crate) fn run_audit(
    user_votes: &[Vote],
    voting_history: &[Vote],
    max_voting_power: u64,
) -> ComplianceAudit {
    let mut pair_counts: HashMap<(&str, &str), usize> = HashMap::new();
    for vote in user_votes {
        *pair_counts
            .entry((vote.proposal_id.as_str(), vote.user_principal.as_str()))
            .or_default() += 1;
    }
    let double_votes: usize = pair_counts.values().filter(|count| **count > 1).sum();

    let excessive_power = voting_history
        .iter()
        .filter(|vote| vote.voting_power > max_voting_power)
        .count();

    let mut violations = Vec::new();
    if double_votes > 0 {
        violations.push(ComplianceViolation {
            kind: ViolationKind::DoubleVoting,
            count: double_votes,
            severity: Severity::High,
        });
    }
    if excessive_power > 0 {
        violations.push(ComplianceViolation {
            kind: ViolationKind::ExcessiveVotingPower,
            count: excessive_power,
            severity: Severity::Medium,
        });
    }

    let total_violations = violations.iter().map(|violation| violation.count).sum();
    let compliance_score = 100u32.saturating_sub(10 * violations.len() as u32);

    ComplianceAudit {
        violations,
        total_violations,
        compliance_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vote::VoteChoice;
    use spicy_core::Metadata;

    fn vote(proposal: &str, user: &str, power: u64) -> Vote {
        Vote {
            id: format!("vote_1700000000000_{user}"),
            proposal_id: proposal.to_string(),
            user_principal: user.to_string(),
            vote_choice: VoteChoice::For,
            voting_power: power,
            nfts_used: Vec::new(),
            timestamp: 1_700_000_000_000,
            metadata: Metadata::new(),
        }
    }

    #[test]
    fn clean_votes_score_a_hundred() {
        let votes = vec![vote("p1", "alice", 5), vote("p1", "bob", 3), vote("p2", "alice", 5)];
        let audit = run_audit(&votes, &votes, 1000);
        assert!(audit.violations.is_empty());
        assert_eq!(audit.total_violations, 0);
        assert_eq!(audit.compliance_score, 100);
    }

    #[test]
    fn every_member_of_a_duplicated_pair_counts() {
        let votes = vec![
            vote("p1", "alice", 5),
            vote("p1", "alice", 7),
            vote("p1", "alice", 2),
            vote("p1", "bob", 3),
        ];
        let audit = run_audit(&votes, &votes, 1000);
        assert_eq!(audit.violations.len(), 1);
        assert_eq!(audit.violations[0].kind, ViolationKind::DoubleVoting);
        assert_eq!(audit.violations[0].count, 3);
        assert_eq!(audit.violations[0].severity, Severity::High);
        assert_eq!(audit.compliance_score, 90);
    }

    #[test]
    fn over_cap_history_entries_are_flagged() {
        let votes = vec![vote("p1", "alice", 5)];
        let history = vec![vote("p1", "alice", 5), vote("p2", "alice", 2500)];
        let audit = run_audit(&votes, &history, 1000);
        assert_eq!(audit.violations.len(), 1);
        assert_eq!(audit.violations[0].kind, ViolationKind::ExcessiveVotingPower);
        assert_eq!(audit.violations[0].count, 1);
        assert_eq!(audit.compliance_score, 90);
    }

    #[test]
    fn both_scans_firing_costs_twenty_points() {
        let votes = vec![vote("p1", "alice", 5), vote("p1", "alice", 9000)];
        let audit = run_audit(&votes, &votes, 1000);
        assert_eq!(audit.violations.len(), 2);
        assert_eq!(audit.total_violations, 3);
        assert_eq!(audit.compliance_score, 80);
    }

    #[test]
    fn violation_kinds_serialize_snake_case() {
        let audit = run_audit(
            &[vote("p1", "alice", 5), vote("p1", "alice", 6)],
            &[],
            1000,
        );
        let value = serde_json::to_value(&audit).unwrap();
        assert_eq!(value["violations"][0]["type"], "double_voting");
        assert_eq!(value["violations"][0]["severity"], "high");
        assert_eq!(value["complianceScore"], 90);
    }
}
