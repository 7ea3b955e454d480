//! Alerts: the user-facing, severity-classified output of the engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Severity of an alert or a scored rule run. Always one of the three
/// closed values, never absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
        }
    }
}

/// Closed set of alert types: the three live-dashboard heuristics plus one
/// type per catalog rule archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertType {
    AccessDenied,
    UnusualTime,
    MultipleAttempts,
    MultiDevice,
    MultiLocation,
    UserTypeChurn,
    AllowWithReason,
    DenyWithoutReason,
    AllowWithoutPermission,
    HighFrequency,
    SharedPermission,
    MissingDeviceOrLocation,
    NeverAllowed,
    TransactionConflict,
    SharedCardLabel,
    PermissionDoorMismatch,
    ChannelDeviceMismatch,
}

impl AlertType {
    /// Wire/display name, e.g. `ACCESS_DENIED`.
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::AccessDenied => "ACCESS_DENIED",
            AlertType::UnusualTime => "UNUSUAL_TIME",
            AlertType::MultipleAttempts => "MULTIPLE_ATTEMPTS",
            AlertType::MultiDevice => "MULTI_DEVICE",
            AlertType::MultiLocation => "MULTI_LOCATION",
            AlertType::UserTypeChurn => "USER_TYPE_CHURN",
            AlertType::AllowWithReason => "ALLOW_WITH_REASON",
            AlertType::DenyWithoutReason => "DENY_WITHOUT_REASON",
            AlertType::AllowWithoutPermission => "ALLOW_WITHOUT_PERMISSION",
            AlertType::HighFrequency => "HIGH_FREQUENCY",
            AlertType::SharedPermission => "SHARED_PERMISSION",
            AlertType::MissingDeviceOrLocation => "MISSING_DEVICE_OR_LOCATION",
            AlertType::NeverAllowed => "NEVER_ALLOWED",
            AlertType::TransactionConflict => "TRANSACTION_CONFLICT",
            AlertType::SharedCardLabel => "SHARED_CARD_LABEL",
            AlertType::PermissionDoorMismatch => "PERMISSION_DOOR_MISMATCH",
            AlertType::ChannelDeviceMismatch => "CHANNEL_DEVICE_MISMATCH",
        }
    }
}

impl std::fmt::Display for AlertType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user-facing alert derived from one or more events/findings.
///
/// `id` is a 1-based counter scoped to one assembly run and is not stable
/// across repeated runs on the same data; `fingerprint` is content-derived
/// and can be used to correlate the same logical alert across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: u64,
    pub alert_type: AlertType,
    pub severity: Severity,
    /// Display label of the actor (card label > card id > "unknown").
    pub actor: String,
    /// Display label of the place (location > door > "unknown").
    pub location: String,
    /// Timestamp of the triggering event, or the latest event in a group.
    pub occurred_at: DateTime<Utc>,
    /// Human-readable, rule-specific explanation.
    pub reason: String,
    pub user_type: String,
    /// `hex(SHA-256(event_id || alert_type))`; stable across runs.
    pub fingerprint: String,
}

/// Compute the stable fingerprint for an alert attributable to `event_id`.
pub fn alert_fingerprint(event_id: &str, alert_type: AlertType) -> String {
    let mut hasher = Sha256::new();
    hasher.update(event_id);
    hasher.update(alert_type.as_str());
    hex::encode(hasher.finalize())
}
