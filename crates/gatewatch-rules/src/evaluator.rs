//! Rule evaluation: partitions an event batch into time-bucket groups and
//! emits findings.
//!
//! For group predicates, every event in an anomalous group becomes a
//! finding, not just a triggering subset; membership in an anomalous group
//! is itself the signal. Row predicates skip grouping entirely. Evaluation
//! is deterministic: groups are held in ordered maps and no wall-clock or
//! iteration-order state is consulted, so the same input always yields the
//! same findings.

use std::collections::{BTreeMap, HashSet};

use chrono::FixedOffset;

use gatewatch_types::{AccessEvent, EngineConfig, Finding};

use crate::bucket::{aligned_bucket, day_key, hour_key};
use crate::rule::{GroupCheck, Grouping, Predicate, Rule, RowCheck};

/// Evaluation context derived from [`EngineConfig`]; carries everything a
/// rule needs beyond the events themselves.
#[derive(Debug, Clone, Copy)]
pub struct EvalContext {
    /// Local offset for calendar-day and hour grouping keys.
    pub tz: FixedOffset,
}

impl EvalContext {
    pub fn new(tz: FixedOffset) -> Self {
        Self { tz }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self { tz: config.tz() }
    }
}

/// Evaluate one rule over a batch of events.
pub fn evaluate(rule: &Rule, events: &[AccessEvent], ctx: &EvalContext) -> Vec<Finding> {
    let findings = match &rule.predicate {
        Predicate::Row(check) => events
            .iter()
            .filter(|e| row_matches(*check, e))
            .map(|e| Finding::new(rule.id.clone(), e.id.clone(), ""))
            .collect(),
        Predicate::Group(check) => {
            let mut groups: BTreeMap<String, Vec<&AccessEvent>> = BTreeMap::new();
            for event in events {
                groups
                    .entry(bucket_key(rule.grouping, event, ctx))
                    .or_default()
                    .push(event);
            }
            let mut findings = Vec::new();
            for (key, members) in &groups {
                if group_matches(*check, members) {
                    for event in members {
                        findings.push(Finding::new(rule.id.clone(), event.id.clone(), key.clone()));
                    }
                }
            }
            findings
        }
    };

    tracing::debug!(
        rule_id = %rule.id,
        events = events.len(),
        finding_count = findings.len(),
        "rule evaluated"
    );
    findings
}

/// Compose the bucket key for an event under a grouping. Missing fields
/// land under the empty sentinel so a null location can never crash a rule.
fn bucket_key(grouping: Grouping, event: &AccessEvent, ctx: &EvalContext) -> String {
    match grouping {
        // Row predicates never reach here; give them a single bucket anyway.
        Grouping::None => String::new(),
        Grouping::CardByDay => {
            format!("{}|{}", event.card_key(), day_key(event.timestamp, ctx.tz))
        }
        Grouping::CardByHour => {
            format!("{}|{}", event.card_key(), hour_key(event.timestamp, ctx.tz))
        }
        Grouping::CardByBucket { minutes } => format!(
            "{}|{}",
            event.card_key(),
            aligned_bucket(event.timestamp, minutes)
        ),
        Grouping::ChannelByBucket { minutes } => format!(
            "{}|{}",
            event.channel_key(),
            aligned_bucket(event.timestamp, minutes)
        ),
        Grouping::Card => event.card_key().to_string(),
        Grouping::CardLabel => event.card_label_key().to_string(),
        Grouping::Permission => event.permission_key().to_string(),
        Grouping::PermissionDoor => {
            format!("{}|{}", event.permission_key(), event.door_key())
        }
        Grouping::Transaction => event.transaction_key().to_string(),
    }
}

fn row_matches(check: RowCheck, event: &AccessEvent) -> bool {
    match check {
        RowCheck::AllowedWithReason => event.allowed && event.has_reason(),
        RowCheck::DeniedWithoutReason => !event.allowed && !event.has_reason(),
        RowCheck::AllowedWithoutPermission => event.allowed && !event.has_permission(),
        RowCheck::MissingDeviceOrLocation => !event.has_device() || !event.has_location(),
    }
}

fn group_matches(check: GroupCheck, members: &[&AccessEvent]) -> bool {
    match check {
        GroupCheck::DistinctDevicesOver { max } => distinct(members, |e| e.device_key()) > max,
        GroupCheck::DistinctLocationsOver { max } => distinct(members, |e| e.location_key()) > max,
        GroupCheck::DistinctUserTypesOver { max } => distinct(members, |e| e.user_type_key()) > max,
        GroupCheck::DistinctCardsOver { max } => distinct(members, |e| e.card_key()) > max,
        GroupCheck::AllowedCountOver { max } => members.iter().filter(|e| e.allowed).count() > max,
        GroupCheck::ConflictingOutcomes => {
            members.iter().any(|e| e.allowed) && members.iter().any(|e| !e.allowed)
        }
        GroupCheck::NeverAllowed => !members.is_empty() && !members.iter().any(|e| e.allowed),
        GroupCheck::SingletonGroup => members.len() == 1,
    }
}

fn distinct<'a>(members: &[&'a AccessEvent], key: impl Fn(&'a AccessEvent) -> &'a str) -> usize {
    members.iter().map(|e| key(e)).collect::<HashSet<_>>().len()
}
