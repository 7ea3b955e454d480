//! Alert assembly and aggregation for Gatewatch.
//!
//! [`Assembler`] turns rule findings or raw event windows into normalized
//! [`gatewatch_types::Alert`]s; [`aggregator`] computes the derived views
//! the dashboards render: severity counts, risk score, hourly heatmap,
//! top offenders, and location risk ranking.

pub mod aggregator;
pub mod assembler;

pub use aggregator::{
    hourly_heatmap, location_risk, risk_score, severity_counts, summarize, top_offenders,
    window_stats, AlertSummary, LocationRisk, OffenderCount, SeverityCounts, WindowStats,
};
pub use assembler::Assembler;
