//! AccessEvent: one normalized physical access-control record.
//!
//! Events are supplied by an external store (SQL query, file import, stream
//! snapshot) and are read-only to the engine. Any field except `id`,
//! `timestamp`, and `allowed` may be absent in the source data; accessors
//! substitute sentinels so downstream code never has to branch on `None`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel shown when a display field is absent from the source record.
pub const UNKNOWN: &str = "unknown";

/// Direction of travel through the door or gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Entry,
    Exit,
}

/// A single physical access attempt (badge swipe at a reader).
///
/// Immutable once constructed; the engine derives findings and alerts from
/// events but never mutates or persists them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessEvent {
    /// Opaque unique identifier (transaction/hash identifier from the store).
    pub id: String,
    /// When the attempt occurred.
    pub timestamp: DateTime<Utc>,
    /// Pseudonymous identifier of the credential used.
    #[serde(default)]
    pub card_id: Option<String>,
    /// Display name associated with the credential. May be shared across
    /// multiple card identifiers.
    #[serde(default)]
    pub card_label: Option<String>,
    /// Category of the credential holder (employee, visitor, affiliate, ...).
    #[serde(default)]
    pub user_type: Option<String>,
    /// Physical reader/controller identifier.
    #[serde(default)]
    pub device: Option<String>,
    /// Logical site/floor/area identifier.
    #[serde(default)]
    pub location: Option<String>,
    /// Physical door/gate identifier.
    #[serde(default)]
    pub door: Option<String>,
    /// Logical access channel grouping a set of devices.
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub direction: Option<Direction>,
    /// Access-level/permission label presented.
    #[serde(default)]
    pub permission: Option<String>,
    /// Outcome of the access decision.
    pub allowed: bool,
    /// Free-text explanation, populated primarily on denial.
    #[serde(default)]
    pub reason: Option<String>,
    /// Correlates multiple records for the same physical attempt
    /// (e.g. duplicate reads).
    #[serde(default)]
    pub transaction_id: Option<String>,
}

impl AccessEvent {
    /// Display label for the actor behind this event: card label, falling
    /// back to card identifier, falling back to [`UNKNOWN`].
    pub fn actor_label(&self) -> &str {
        non_empty(self.card_label.as_deref())
            .or_else(|| non_empty(self.card_id.as_deref()))
            .unwrap_or(UNKNOWN)
    }

    /// Display label for where this event happened: location, falling back
    /// to door, falling back to [`UNKNOWN`].
    pub fn location_label(&self) -> &str {
        non_empty(self.location.as_deref())
            .or_else(|| non_empty(self.door.as_deref()))
            .unwrap_or(UNKNOWN)
    }

    /// User type for display, defaulted to [`UNKNOWN`].
    pub fn user_type_label(&self) -> &str {
        non_empty(self.user_type.as_deref()).unwrap_or(UNKNOWN)
    }

    /// Card identifier for grouping; missing values group under the empty
    /// sentinel rather than erroring.
    pub fn card_key(&self) -> &str {
        self.card_id.as_deref().unwrap_or("")
    }

    pub fn card_label_key(&self) -> &str {
        self.card_label.as_deref().unwrap_or("")
    }

    pub fn user_type_key(&self) -> &str {
        self.user_type.as_deref().unwrap_or("")
    }

    pub fn device_key(&self) -> &str {
        self.device.as_deref().unwrap_or("")
    }

    pub fn location_key(&self) -> &str {
        self.location.as_deref().unwrap_or("")
    }

    pub fn door_key(&self) -> &str {
        self.door.as_deref().unwrap_or("")
    }

    pub fn channel_key(&self) -> &str {
        self.channel.as_deref().unwrap_or("")
    }

    pub fn permission_key(&self) -> &str {
        self.permission.as_deref().unwrap_or("")
    }

    pub fn transaction_key(&self) -> &str {
        self.transaction_id.as_deref().unwrap_or("")
    }

    /// Whether the denial/decision reason carries any text.
    pub fn has_reason(&self) -> bool {
        non_empty(self.reason.as_deref()).is_some()
    }

    pub fn has_permission(&self) -> bool {
        non_empty(self.permission.as_deref()).is_some()
    }

    pub fn has_device(&self) -> bool {
        non_empty(self.device.as_deref()).is_some()
    }

    pub fn has_location(&self) -> bool {
        non_empty(self.location.as_deref()).is_some()
    }
}

/// Treat `None`, empty, and whitespace-only strings uniformly as absent.
fn non_empty(value: Option<&str>) -> Option<&str> {
    match value {
        Some(s) if !s.trim().is_empty() => Some(s),
        _ => None,
    }
}
