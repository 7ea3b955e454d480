//! Alert assembly: turns findings or raw events into normalized alerts.
//!
//! Two paths feed the same [`Alert`] shape:
//!
//! - the **catalog path** ([`Assembler::add_rule_findings`]) converts each
//!   finding of a scored rule run into one alert;
//! - the **live path** ([`Assembler::add_live_heuristics`]) applies the
//!   dashboard heuristics directly to an event window: denials, access
//!   outside the quiet-hours window, and repeated failures by one actor at
//!   one location.
//!
//! Alerts are not deduplicated across paths or heuristics; the same event
//! may legitimately appear behind several alerts, each covering a
//! different risk dimension. Alert ids are a counter scoped to one
//! assembly run; the content-derived `fingerprint` is the identifier that
//! survives re-evaluation.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};

use gatewatch_rules::bucket::local_hour;
use gatewatch_rules::Rule;
use gatewatch_types::{
    alert_fingerprint, AccessEvent, Alert, AlertType, EngineConfig, Finding, Severity,
};

pub struct Assembler<'a> {
    config: &'a EngineConfig,
    alerts: Vec<Alert>,
    next_id: u64,
}

impl<'a> Assembler<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self {
            config,
            alerts: Vec::new(),
            next_id: 1,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn push(
        &mut self,
        alert_type: AlertType,
        severity: Severity,
        actor: &str,
        location: &str,
        occurred_at: DateTime<Utc>,
        reason: String,
        user_type: &str,
        event_id: &str,
    ) {
        self.alerts.push(Alert {
            id: self.next_id,
            alert_type,
            severity,
            actor: actor.to_string(),
            location: location.to_string(),
            occurred_at,
            reason,
            user_type: user_type.to_string(),
            fingerprint: alert_fingerprint(event_id, alert_type),
        });
        self.next_id += 1;
    }

    /// Convert the findings of one scored rule run into alerts. Every
    /// finding carries the run's severity; the reason is the rule
    /// description plus the bucket the event fell into, when grouped.
    pub fn add_rule_findings(
        &mut self,
        rule: &Rule,
        findings: &[Finding],
        severity: Severity,
        events: &[AccessEvent],
    ) {
        let by_id: HashMap<&str, &AccessEvent> =
            events.iter().map(|e| (e.id.as_str(), e)).collect();

        for finding in findings {
            // A finding always originates from the supplied batch; an
            // unmatched id would mean caller-side corruption, so skip it
            // rather than fabricating an alert with no event behind it.
            let Some(event) = by_id.get(finding.event_id.as_str()) else {
                tracing::debug!(
                    rule_id = %rule.id,
                    event_id = %finding.event_id,
                    "finding refers to an event outside the batch, skipping"
                );
                continue;
            };
            let reason = if finding.bucket.is_empty() {
                rule.description.clone()
            } else {
                format!("{} ({})", rule.description, finding.bucket)
            };
            self.push(
                rule.alert_type,
                severity,
                event.actor_label(),
                event.location_label(),
                event.timestamp,
                reason,
                event.user_type_label(),
                &event.id,
            );
        }
    }

    /// Apply the three live-dashboard heuristics to an event window.
    pub fn add_live_heuristics(&mut self, events: &[AccessEvent]) {
        let tz = self.config.tz();

        for event in events {
            if !event.allowed {
                let reason = event
                    .reason
                    .as_deref()
                    .filter(|r| !r.trim().is_empty())
                    .unwrap_or("access denied");
                let severity = if self.config.is_invalid_credential(reason) {
                    Severity::High
                } else {
                    Severity::Medium
                };
                self.push(
                    AlertType::AccessDenied,
                    severity,
                    event.actor_label(),
                    event.location_label(),
                    event.timestamp,
                    reason.to_string(),
                    event.user_type_label(),
                    &event.id,
                );
            }

            let hour = local_hour(event.timestamp, tz);
            if self.config.is_outside_quiet_hours(hour) {
                let severity = if hour < self.config.night_cutoff_hour
                    || hour > self.config.late_cutoff_hour
                {
                    Severity::High
                } else {
                    Severity::Medium
                };
                self.push(
                    AlertType::UnusualTime,
                    severity,
                    event.actor_label(),
                    event.location_label(),
                    event.timestamp,
                    format!(
                        "access at {hour:02}:00, outside {:02}:00-{:02}:00",
                        self.config.quiet_hours_start, self.config.quiet_hours_end
                    ),
                    event.user_type_label(),
                    &event.id,
                );
            }
        }

        self.add_repeated_failures(events);
    }

    /// One `MULTIPLE_ATTEMPTS` alert per (actor, location) group with at
    /// least the configured number of failures in the window. The alert
    /// carries the latest failure's timestamp and upgrades to high once
    /// the group reaches the high-watermark count.
    fn add_repeated_failures(&mut self, events: &[AccessEvent]) {
        let mut groups: BTreeMap<(String, String), Vec<&AccessEvent>> = BTreeMap::new();
        for event in events.iter().filter(|e| !e.allowed) {
            groups
                .entry((
                    event.actor_label().to_string(),
                    event.location_label().to_string(),
                ))
                .or_default()
                .push(event);
        }

        for ((actor, location), failures) in &groups {
            if failures.len() < self.config.repeated_failure_threshold {
                continue;
            }
            let severity = if failures.len() >= self.config.repeated_failure_high {
                Severity::High
            } else {
                Severity::Medium
            };
            let Some(latest) = failures.iter().max_by_key(|e| e.timestamp) else {
                continue;
            };
            self.push(
                AlertType::MultipleAttempts,
                severity,
                actor,
                location,
                latest.timestamp,
                format!("{} failed attempts at {location}", failures.len()),
                latest.user_type_label(),
                &latest.id,
            );
        }
    }

    /// Finish the run: most recent first, ties kept in insertion order.
    pub fn finish(mut self) -> Vec<Alert> {
        // sort_by is stable, preserving insertion order within a timestamp.
        self.alerts.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
        tracing::debug!(alert_count = self.alerts.len(), "assembly run finished");
        self.alerts
    }
}
