//! Shared helpers for integration tests.
//!
//! Each integration test file compiles common/ as its own module, so not
//! every helper is used in every file.
#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};

use gatewatch::AccessEvent;

/// A timestamp on the fixed test day (2026-08-25, UTC).
pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 25, hour, minute, 0).unwrap()
}

/// A timestamp on an arbitrary day of August 2026.
pub fn on_day(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, day, hour, minute, 0).unwrap()
}

/// A fully-populated allowed event; override fields with struct update or
/// direct mutation as needed.
pub fn swipe(id: &str, card: &str, device: &str, ts: DateTime<Utc>) -> AccessEvent {
    AccessEvent {
        id: id.into(),
        timestamp: ts,
        card_id: Some(card.into()),
        card_label: None,
        user_type: Some("employee".into()),
        device: Some(device.into()),
        location: Some("HQ".into()),
        door: Some("front".into()),
        channel: Some("ch-1".into()),
        direction: None,
        permission: Some("staff".into()),
        allowed: true,
        reason: None,
        transaction_id: Some(format!("tx-{id}")),
    }
}

/// A denied event with the given reason.
pub fn denied(id: &str, card: &str, ts: DateTime<Utc>, reason: &str) -> AccessEvent {
    let mut e = swipe(id, card, "D1", ts);
    e.allowed = false;
    e.reason = if reason.is_empty() {
        None
    } else {
        Some(reason.into())
    };
    e
}
