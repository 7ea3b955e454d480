//! Report export: serializes a selected alert set plus its aggregate
//! summary to a delimited table for download.
//!
//! Layout: a metadata block (label, generation timestamp, run id, row
//! count), a severity summary block, then one row per alert. Fields are
//! sanitized so free-text reasons cannot break row structure: quotes are
//! doubled, fields containing delimiters are quoted, and control
//! characters are stripped.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use gatewatch_alerts::AlertSummary;
use gatewatch_types::Alert;

const HEADER_COLUMNS: &str = "Index,Timestamp,Type,Severity,Actor,Location,Reason,UserType";

/// Quote a field for CSV output. Control characters other than newline are
/// stripped; embedded quotes are doubled per RFC 4180.
fn csv_field(value: &str) -> String {
    let cleaned: String = value
        .chars()
        .filter(|c| !c.is_control() || *c == '\n')
        .collect();
    if cleaned.contains(',') || cleaned.contains('"') || cleaned.contains('\n') {
        format!("\"{}\"", cleaned.replace('"', "\"\""))
    } else {
        cleaned
    }
}

/// Serialize one report. Pure function of its inputs; `generated_at` and
/// `run_id` come from the caller so tests stay deterministic.
pub fn export_csv(
    alerts: &[Alert],
    summary: &AlertSummary,
    label: &str,
    generated_at: DateTime<Utc>,
    run_id: Uuid,
) -> String {
    let mut out = String::new();

    out.push_str(&format!("Gatewatch Access Report,{}\n", csv_field(label)));
    out.push_str(&format!("Generated,{}\n", generated_at.to_rfc3339()));
    out.push_str(&format!("Run,{run_id}\n"));
    out.push_str(&format!("Rows,{}\n", alerts.len()));
    out.push('\n');

    out.push_str("Severity,Count\n");
    out.push_str(&format!("high,{}\n", summary.severity_counts.high));
    out.push_str(&format!("medium,{}\n", summary.severity_counts.medium));
    out.push_str(&format!("low,{}\n", summary.severity_counts.low));
    out.push_str(&format!("Risk Score,{}\n", summary.risk_score));
    out.push('\n');

    out.push_str(HEADER_COLUMNS);
    out.push('\n');
    for (index, alert) in alerts.iter().enumerate() {
        out.push_str(&format!(
            "{},{},{},{},{},{},{},{}\n",
            index + 1,
            alert.occurred_at.to_rfc3339(),
            alert.alert_type,
            alert.severity,
            csv_field(&alert.actor),
            csv_field(&alert.location),
            csv_field(&alert.reason),
            csv_field(&alert.user_type),
        ));
    }

    out
}
