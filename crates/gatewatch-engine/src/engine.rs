//! The engine facade: the single entry point every presentation surface
//! calls instead of re-deriving detection logic.
//!
//! An [`Engine`] owns an immutable rule catalog and configuration for the
//! process lifetime; changing either means constructing a new engine, not
//! mutating a running one. Every method is a pure function of its event
//! or alert input: no I/O, no shared mutable state, no wall-clock
//! dependency in evaluation. The caller (HTTP layer, dashboard) owns the
//! event store and supplies already-materialized batches.

use serde::Serialize;
use uuid::Uuid;

use gatewatch_alerts::{summarize, window_stats, AlertSummary, Assembler, WindowStats};
use gatewatch_rules::{default_catalog, evaluate, score, EvalContext, Rule};
use gatewatch_types::{AccessEvent, Alert, EngineConfig, GatewatchError, Severity};

use crate::export::export_csv;

/// Result of running one named rule over an event set.
#[derive(Debug, Clone, Serialize)]
pub struct RuleReport {
    pub rule_id: String,
    pub description: String,
    /// Number of implicated events (not distinct groups).
    pub finding_count: usize,
    pub score: u64,
    pub severity: Severity,
    /// Ids of the implicated events.
    pub matched_events: Vec<String>,
}

/// Result of one assembly + aggregation run over an event window.
#[derive(Debug, Clone, Serialize)]
pub struct AlertFeed {
    /// Identifies this assembly run; alert `id`s are only unique within it.
    pub run_id: Uuid,
    pub alerts: Vec<Alert>,
    pub summary: AlertSummary,
    pub window: WindowStats,
}

pub struct Engine {
    config: EngineConfig,
    catalog: Vec<Rule>,
}

impl Engine {
    /// Engine with the built-in rule catalog.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_catalog(config, default_catalog())
    }

    /// Engine with a caller-supplied catalog; used by tests to substitute
    /// synthetic rules and by deployments that load a tuned rule table.
    pub fn with_catalog(config: EngineConfig, catalog: Vec<Rule>) -> Self {
        Self { config, catalog }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Rule identifiers in catalog order.
    pub fn rule_ids(&self) -> Vec<&str> {
        self.catalog.iter().map(|r| r.id.as_str()).collect()
    }

    fn rule(&self, rule_id: &str) -> Result<&Rule, GatewatchError> {
        self.catalog
            .iter()
            .find(|r| r.id == rule_id)
            .ok_or_else(|| GatewatchError::UnknownRule(rule_id.to_string()))
    }

    /// Run one named rule over the supplied event set.
    ///
    /// An unknown rule identifier is a client error
    /// ([`GatewatchError::UnknownRule`]), never a crash or partial result.
    pub fn run_rule(
        &self,
        rule_id: &str,
        events: &[AccessEvent],
    ) -> Result<RuleReport, GatewatchError> {
        let rule = self.rule(rule_id)?;
        let ctx = EvalContext::from_config(&self.config);
        let findings = evaluate(rule, events, &ctx);
        let run = score(rule, findings.len());
        tracing::info!(
            rule_id = %rule.id,
            finding_count = findings.len(),
            score = run.score,
            severity = %run.severity,
            "rule run complete"
        );
        Ok(RuleReport {
            rule_id: rule.id.clone(),
            description: rule.description.clone(),
            finding_count: findings.len(),
            score: run.score,
            severity: run.severity,
            matched_events: findings.into_iter().map(|f| f.event_id).collect(),
        })
    }

    /// Run every catalog rule, in catalog order. Rules are independent,
    /// so a batch sweep is just the per-rule query applied to each.
    pub fn run_catalog(&self, events: &[AccessEvent]) -> Vec<RuleReport> {
        let ctx = EvalContext::from_config(&self.config);
        self.catalog
            .iter()
            .map(|rule| {
                let findings = evaluate(rule, events, &ctx);
                let run = score(rule, findings.len());
                RuleReport {
                    rule_id: rule.id.clone(),
                    description: rule.description.clone(),
                    finding_count: findings.len(),
                    score: run.score,
                    severity: run.severity,
                    matched_events: findings.into_iter().map(|f| f.event_id).collect(),
                }
            })
            .collect()
    }

    /// Assemble catalog-rule findings into alerts, one alert per
    /// implicated event, carrying each rule run's severity.
    pub fn catalog_alerts(&self, events: &[AccessEvent]) -> Vec<Alert> {
        let ctx = EvalContext::from_config(&self.config);
        let mut assembler = Assembler::new(&self.config);
        for rule in &self.catalog {
            let findings = evaluate(rule, events, &ctx);
            if findings.is_empty() {
                continue;
            }
            let run = score(rule, findings.len());
            assembler.add_rule_findings(rule, &findings, run.severity, events);
        }
        assembler.finish()
    }

    /// The live-dashboard feed: the three heuristics (denied access,
    /// out-of-hours access, repeated failures) assembled and aggregated
    /// over one event window.
    pub fn alert_feed(&self, events: &[AccessEvent]) -> AlertFeed {
        let mut assembler = Assembler::new(&self.config);
        assembler.add_live_heuristics(events);
        let alerts = assembler.finish();
        let summary = summarize(&alerts, &self.config);
        let feed = AlertFeed {
            run_id: Uuid::new_v4(),
            alerts,
            summary,
            window: window_stats(events),
        };
        tracing::info!(
            run_id = %feed.run_id,
            events = events.len(),
            alert_count = feed.alerts.len(),
            risk_score = feed.summary.risk_score,
            "alert feed assembled"
        );
        feed
    }

    /// Serialize a selected alert set and its summary to a downloadable
    /// delimited report. An empty selection produces a valid report with
    /// zero rows.
    pub fn export(&self, alerts: &[Alert], summary: &AlertSummary, label: &str) -> Vec<u8> {
        let report = export_csv(alerts, summary, label, chrono::Utc::now(), Uuid::new_v4());
        tracing::info!(label, rows = alerts.len(), bytes = report.len(), "report exported");
        report.into_bytes()
    }
}
