//! Derived views over a set of alerts.
//!
//! Every function here is pure: it takes an immutable alert slice and
//! returns a new value, so calling any of them twice on the same input
//! yields identical output. Empty input degrades to the zero state (empty
//! rankings, zero risk score, zero-filled heatmap), never an error.

use std::collections::HashMap;

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use gatewatch_rules::bucket::local_hour;
use gatewatch_types::{AccessEvent, Alert, EngineConfig, Severity};

/// Severity weights for the aggregate risk score.
const WEIGHT_HIGH: u64 = 10;
const WEIGHT_MEDIUM: u64 = 5;
const WEIGHT_LOW: u64 = 2;
const WEIGHT_MAX: u64 = WEIGHT_HIGH;

/// Count of alerts per severity value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl SeverityCounts {
    pub fn total(&self) -> usize {
        self.low + self.medium + self.high
    }

    fn add(&mut self, severity: Severity) {
        match severity {
            Severity::Low => self.low += 1,
            Severity::Medium => self.medium += 1,
            Severity::High => self.high += 1,
        }
    }

    fn weighted(&self) -> u64 {
        self.high as u64 * WEIGHT_HIGH
            + self.medium as u64 * WEIGHT_MEDIUM
            + self.low as u64 * WEIGHT_LOW
    }
}

/// One row of the top-offenders ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffenderCount {
    pub actor: String,
    pub count: usize,
}

/// One row of the location risk ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRisk {
    pub location: String,
    pub counts: SeverityCounts,
    /// `high x 10 + medium x 5 + low x 2`.
    pub risk_score: u64,
}

/// Roll-up of the event window itself (not the alerts): outcome totals and
/// deny rate, a KPI the dashboards show next to the alert feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowStats {
    pub total_events: usize,
    pub allow_count: usize,
    pub deny_count: usize,
    pub deny_rate: f64,
}

/// Aggregate summary over one alert set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertSummary {
    pub total_alerts: usize,
    pub severity_counts: SeverityCounts,
    /// 0-100 aggregate metric summarizing the severity mix.
    pub risk_score: u64,
    /// Alert count per local hour of day.
    pub heatmap: [usize; 24],
    pub top_offenders: Vec<OffenderCount>,
    pub location_risk: Vec<LocationRisk>,
}

pub fn severity_counts(alerts: &[Alert]) -> SeverityCounts {
    let mut counts = SeverityCounts::default();
    for alert in alerts {
        counts.add(alert.severity);
    }
    counts
}

/// `round(100 x weighted / (total x max_weight))`, clamped to `[0, 100]`;
/// zero when there are no alerts.
pub fn risk_score(counts: &SeverityCounts) -> u64 {
    let total = counts.total();
    if total == 0 {
        return 0;
    }
    let raw = 100.0 * counts.weighted() as f64 / (total as f64 * WEIGHT_MAX as f64);
    (raw.round() as u64).min(100)
}

/// 24-bucket histogram of alert count by local hour of `occurred_at`.
pub fn hourly_heatmap(alerts: &[Alert], tz: FixedOffset) -> [usize; 24] {
    let mut buckets = [0usize; 24];
    for alert in alerts {
        buckets[local_hour(alert.occurred_at, tz) as usize] += 1;
    }
    buckets
}

/// Actors ranked by alert count, descending, ties broken by first-seen
/// order, truncated to `limit`.
pub fn top_offenders(alerts: &[Alert], limit: usize) -> Vec<OffenderCount> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for alert in alerts {
        let entry = counts.entry(alert.actor.as_str()).or_insert(0);
        if *entry == 0 {
            order.push(alert.actor.as_str());
        }
        *entry += 1;
    }

    let mut ranked: Vec<OffenderCount> = order
        .into_iter()
        .map(|actor| OffenderCount {
            actor: actor.to_string(),
            count: counts[actor],
        })
        .collect();
    // Stable sort keeps first-seen order within equal counts.
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(limit);
    ranked
}

/// Locations ranked by weighted severity mix, descending, truncated to
/// `limit`. Ties keep first-seen order.
pub fn location_risk(alerts: &[Alert], limit: usize) -> Vec<LocationRisk> {
    let mut order: Vec<&str> = Vec::new();
    let mut per_location: HashMap<&str, SeverityCounts> = HashMap::new();
    for alert in alerts {
        let entry = per_location.entry(alert.location.as_str()).or_default();
        if entry.total() == 0 {
            order.push(alert.location.as_str());
        }
        entry.add(alert.severity);
    }

    let mut ranked: Vec<LocationRisk> = order
        .into_iter()
        .map(|location| {
            let counts = per_location[location];
            LocationRisk {
                location: location.to_string(),
                counts,
                risk_score: counts.weighted(),
            }
        })
        .collect();
    ranked.sort_by(|a, b| b.risk_score.cmp(&a.risk_score));
    ranked.truncate(limit);
    ranked
}

/// Outcome totals for the supplied event window.
pub fn window_stats(events: &[AccessEvent]) -> WindowStats {
    let allow_count = events.iter().filter(|e| e.allowed).count();
    let deny_count = events.len() - allow_count;
    let deny_rate = if events.is_empty() {
        0.0
    } else {
        deny_count as f64 / events.len() as f64
    };
    WindowStats {
        total_events: events.len(),
        allow_count,
        deny_count,
        deny_rate,
    }
}

/// Bundle every derived view into one summary.
pub fn summarize(alerts: &[Alert], config: &EngineConfig) -> AlertSummary {
    let counts = severity_counts(alerts);
    AlertSummary {
        total_alerts: alerts.len(),
        severity_counts: counts,
        risk_score: risk_score(&counts),
        heatmap: hourly_heatmap(alerts, config.tz()),
        top_offenders: top_offenders(alerts, config.ranking_limit),
        location_risk: location_risk(alerts, config.ranking_limit),
    }
}
