//! Scoring: converts a finding count into a `(score, severity)` pair.

use gatewatch_types::Severity;

use crate::rule::Rule;

/// Result of scoring one rule run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleScore {
    pub score: u64,
    pub severity: Severity,
}

/// `score = finding_count x weight`, then a strictly-greater-than ladder
/// against the rule's thresholds. Boundary values fall to the lower
/// severity; that exclusive comparison is part of the contract and must
/// not be relaxed to `>=`.
///
/// `finding_count` is the number of implicated events, not the number of
/// distinct anomalous groups.
pub fn score(rule: &Rule, finding_count: usize) -> RuleScore {
    let score = finding_count as u64 * rule.weight;
    let severity = if score > rule.thresholds.medium {
        Severity::High
    } else if score > rule.thresholds.low {
        Severity::Medium
    } else {
        Severity::Low
    };
    RuleScore { score, severity }
}
