//! Integration tests for the named-rule query surface: every catalog rule
//! exercised end to end through the engine.

mod common;

use common::{at, on_day, swipe};

use gatewatch::{AccessEvent, Engine, EngineConfig, GatewatchError, Severity};

fn engine() -> Engine {
    Engine::new(EngineConfig::default())
}

#[test]
fn multi_device_counts_implicated_events_not_groups() {
    // Three C1 events across D1/D2 on one day, one C2 event at D3:
    // finding_count is 3 (the C1 events), not 4.
    let events = vec![
        swipe("e1", "C1", "D1", at(9, 0)),
        swipe("e2", "C1", "D2", at(12, 0)),
        swipe("e3", "C1", "D1", at(15, 0)),
        swipe("e4", "C2", "D3", at(10, 0)),
    ];
    let report = engine().run_rule("multi_device", &events).unwrap();
    assert_eq!(report.finding_count, 3);
    assert!(!report.matched_events.contains(&"e4".to_string()));
}

#[test]
fn multi_location_is_windowed_by_hour() {
    let mut e2 = swipe("e2", "C1", "D1", at(9, 40));
    e2.location = Some("Annex".into());
    let events = vec![swipe("e1", "C1", "D1", at(9, 10)), e2.clone()];
    let report = engine().run_rule("multi_location", &events).unwrap();
    assert_eq!(report.finding_count, 2);

    // Same pair of locations two hours apart: separate buckets, no finding.
    let mut late = e2;
    late.timestamp = at(11, 40);
    let events = vec![swipe("e1", "C1", "D1", at(9, 10)), late];
    let report = engine().run_rule("multi_location", &events).unwrap();
    assert_eq!(report.finding_count, 0);
}

#[test]
fn user_type_churn_per_card_per_day() {
    let mut e2 = swipe("e2", "C1", "D1", at(14, 0));
    e2.user_type = Some("visitor".into());
    let events = vec![swipe("e1", "C1", "D1", at(9, 0)), e2];
    let report = engine().run_rule("user_type_churn", &events).unwrap();
    assert_eq!(report.finding_count, 2);
}

#[test]
fn row_predicate_rules_count_matching_rows() {
    let mut allow_with_reason = swipe("e1", "C1", "D1", at(9, 0));
    allow_with_reason.reason = Some("guard override".into());

    let mut deny_no_reason = swipe("e2", "C2", "D1", at(9, 5));
    deny_no_reason.allowed = false;

    let mut allow_no_permission = swipe("e3", "C3", "D1", at(9, 10));
    allow_no_permission.permission = None;

    let mut missing_location = swipe("e4", "C4", "D1", at(9, 15));
    missing_location.location = None;

    let events = vec![
        allow_with_reason,
        deny_no_reason,
        allow_no_permission,
        missing_location,
        swipe("e5", "C5", "D1", at(9, 20)),
    ];

    let e = engine();
    assert_eq!(e.run_rule("allow_with_reason", &events).unwrap().finding_count, 1);
    assert_eq!(e.run_rule("deny_without_reason", &events).unwrap().finding_count, 1);
    assert_eq!(e.run_rule("allow_without_permission", &events).unwrap().finding_count, 1);
    // e4 is missing a location; door is still set, but the rule checks the
    // location field itself.
    assert_eq!(
        e.run_rule("missing_device_or_location", &events).unwrap().finding_count,
        1
    );
}

#[test]
fn high_frequency_respects_aligned_buckets() {
    // Six allowed swipes between 10:00 and 10:05: one bucket, over the
    // limit of five, all six implicated.
    let events: Vec<AccessEvent> = (0..6)
        .map(|i| swipe(&format!("e{i}"), "C1", "D1", at(10, i)))
        .collect();
    let report = engine().run_rule("high_frequency", &events).unwrap();
    assert_eq!(report.finding_count, 6);

    // Same six swipes straddling the 10:10 boundary 3/3: no finding.
    let events: Vec<AccessEvent> = (0..6)
        .map(|i| swipe(&format!("e{i}"), "C1", "D1", at(10, 7 + i)))
        .collect();
    let report = engine().run_rule("high_frequency", &events).unwrap();
    assert_eq!(report.finding_count, 0);
}

#[test]
fn shared_permission_across_user_types() {
    let mut visitor = swipe("e2", "C2", "D1", at(11, 0));
    visitor.user_type = Some("visitor".into());
    let events = vec![swipe("e1", "C1", "D1", at(9, 0)), visitor];
    let report = engine().run_rule("shared_permission", &events).unwrap();
    assert_eq!(report.finding_count, 2);
}

#[test]
fn never_allowed_spans_the_whole_set() {
    let mut d1 = swipe("e1", "C1", "D1", on_day(24, 9, 0));
    d1.allowed = false;
    let mut d2 = swipe("e2", "C1", "D1", on_day(25, 9, 0));
    d2.allowed = false;
    let ok = swipe("e3", "C2", "D1", on_day(25, 10, 0));

    let report = engine().run_rule("never_allowed", &[d1, d2, ok]).unwrap();
    assert_eq!(report.finding_count, 2);
}

#[test]
fn transaction_conflict_detects_split_outcomes() {
    let mut a = swipe("e1", "C1", "D1", at(9, 0));
    let mut b = swipe("e2", "C1", "D1", at(9, 0));
    a.transaction_id = Some("tx-same".into());
    b.transaction_id = Some("tx-same".into());
    b.allowed = false;

    let report = engine().run_rule("transaction_conflict", &[a, b]).unwrap();
    assert_eq!(report.finding_count, 2);
}

#[test]
fn shared_card_label_across_card_ids() {
    let mut a = swipe("e1", "C1", "D1", at(9, 0));
    let mut b = swipe("e2", "C2", "D1", at(10, 0));
    a.card_label = Some("Loading Dock".into());
    b.card_label = Some("Loading Dock".into());

    let report = engine().run_rule("shared_card_label", &[a, b]).unwrap();
    assert_eq!(report.finding_count, 2);
}

#[test]
fn permission_door_mismatch_flags_singleton_pairings() {
    let mut vault = swipe("e3", "C3", "D1", at(11, 0));
    vault.door = Some("vault".into());
    let events = vec![
        swipe("e1", "C1", "D1", at(9, 0)),
        swipe("e2", "C2", "D1", at(10, 0)),
        vault,
    ];
    let report = engine()
        .run_rule("permission_door_mismatch", &events)
        .unwrap();
    assert_eq!(report.finding_count, 1);
    assert_eq!(report.matched_events, vec!["e3".to_string()]);
}

#[test]
fn channel_device_mismatch_within_five_minutes() {
    let events = vec![
        swipe("e1", "C1", "D1", at(9, 0)),
        swipe("e2", "C2", "D2", at(9, 3)),
    ];
    let report = engine()
        .run_rule("channel_device_mismatch", &events)
        .unwrap();
    assert_eq!(report.finding_count, 2);

    // Ten minutes apart: different buckets.
    let events = vec![
        swipe("e1", "C1", "D1", at(9, 0)),
        swipe("e2", "C2", "D2", at(9, 11)),
    ];
    let report = engine()
        .run_rule("channel_device_mismatch", &events)
        .unwrap();
    assert_eq!(report.finding_count, 0);
}

#[test]
fn severity_boundaries_through_the_engine() {
    // multi_device: weight 5, thresholds {10, 30}.
    // Two implicated events score exactly 10: still low.
    let events = vec![
        swipe("e1", "C1", "D1", at(9, 0)),
        swipe("e2", "C1", "D2", at(12, 0)),
    ];
    let report = engine().run_rule("multi_device", &events).unwrap();
    assert_eq!(report.score, 10);
    assert_eq!(report.severity, Severity::Low);

    // Seven implicated events score 35: high.
    let events: Vec<AccessEvent> = (0..7)
        .map(|i| swipe(&format!("e{i}"), "C1", &format!("D{i}"), at(9, i)))
        .collect();
    let report = engine().run_rule("multi_device", &events).unwrap();
    assert_eq!(report.score, 35);
    assert_eq!(report.severity, Severity::High);
}

#[test]
fn unknown_rule_id_is_a_client_error() {
    let err = engine().run_rule("definitely_not_a_rule", &[]).unwrap_err();
    assert!(matches!(err, GatewatchError::UnknownRule(_)));
    assert_eq!(err.to_string(), "unknown rule: definitely_not_a_rule");
}

#[test]
fn rules_overlap_without_deduplication() {
    // One denied event with no reason at a second device: implicated by
    // both multi_device and deny_without_reason independently.
    let mut e2 = swipe("e2", "C1", "D2", at(12, 0));
    e2.allowed = false;
    let events = vec![swipe("e1", "C1", "D1", at(9, 0)), e2];

    let e = engine();
    let multi = e.run_rule("multi_device", &events).unwrap();
    let deny = e.run_rule("deny_without_reason", &events).unwrap();
    assert!(multi.matched_events.contains(&"e2".to_string()));
    assert!(deny.matched_events.contains(&"e2".to_string()));
}
