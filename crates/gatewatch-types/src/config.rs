//! Engine configuration.
//!
//! [`EngineConfig`] is the explicit context object passed into every engine
//! call: evaluation time zone, quiet-hours window, live-heuristic
//! thresholds, and ranking limits. Loaded from `gatewatch.toml`; every
//! field has a default so a missing or partial file still yields a working
//! engine.

use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::GatewatchError;

/// Default marker substrings that upgrade an `ACCESS_DENIED` alert to high
/// severity when found in the denial reason.
fn default_markers() -> Vec<String> {
    vec!["invalid".into(), "expired".into(), "unknown".into()]
}

fn default_quiet_start() -> u32 {
    6
}
fn default_quiet_end() -> u32 {
    22
}
fn default_night_cutoff() -> u32 {
    4
}
fn default_late_cutoff() -> u32 {
    23
}
fn default_failure_threshold() -> usize {
    2
}
fn default_failure_high() -> usize {
    3
}
fn default_ranking_limit() -> usize {
    5
}

/// Configuration for one engine instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Offset from UTC, in minutes, used for calendar-day/hour grouping,
    /// quiet-hours checks, and the hourly heatmap. Zero means UTC.
    #[serde(default)]
    pub utc_offset_minutes: i32,
    /// Start of the normal-access window (local hour, inclusive).
    #[serde(default = "default_quiet_start")]
    pub quiet_hours_start: u32,
    /// End of the normal-access window (local hour, exclusive).
    #[serde(default = "default_quiet_end")]
    pub quiet_hours_end: u32,
    /// `UNUSUAL_TIME` is high severity when the local hour is below this.
    #[serde(default = "default_night_cutoff")]
    pub night_cutoff_hour: u32,
    /// `UNUSUAL_TIME` is high severity when the local hour is above this.
    #[serde(default = "default_late_cutoff")]
    pub late_cutoff_hour: u32,
    /// Minimum failed attempts by one actor at one location to raise a
    /// `MULTIPLE_ATTEMPTS` alert.
    #[serde(default = "default_failure_threshold")]
    pub repeated_failure_threshold: usize,
    /// Failed-attempt count at which `MULTIPLE_ATTEMPTS` becomes high.
    #[serde(default = "default_failure_high")]
    pub repeated_failure_high: usize,
    /// Case-insensitive substrings of a denial reason that mark an invalid
    /// credential.
    #[serde(default = "default_markers")]
    pub invalid_credential_markers: Vec<String>,
    /// Truncation limit for top-offender and location-risk rankings.
    #[serde(default = "default_ranking_limit")]
    pub ranking_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 0,
            quiet_hours_start: default_quiet_start(),
            quiet_hours_end: default_quiet_end(),
            night_cutoff_hour: default_night_cutoff(),
            late_cutoff_hour: default_late_cutoff(),
            repeated_failure_threshold: default_failure_threshold(),
            repeated_failure_high: default_failure_high(),
            invalid_credential_markers: default_markers(),
            ranking_limit: default_ranking_limit(),
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, GatewatchError> {
        toml::from_str(content).map_err(|e| GatewatchError::ConfigError(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String, GatewatchError> {
        toml::to_string_pretty(self).map_err(|e| GatewatchError::ConfigError(e.to_string()))
    }

    /// Load a configuration from a TOML file on disk.
    pub fn load(path: &std::path::Path) -> Result<Self, GatewatchError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            GatewatchError::ConfigError(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// The configured fixed offset. An out-of-range offset falls back to
    /// UTC rather than erroring; the engine must never fail on bad input.
    pub fn tz(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).unwrap_or_else(|| Utc.fix())
    }

    /// Whether a denial reason names an invalid credential.
    pub fn is_invalid_credential(&self, reason: &str) -> bool {
        let lower = reason.to_lowercase();
        self.invalid_credential_markers
            .iter()
            .any(|m| !m.is_empty() && lower.contains(&m.to_lowercase()))
    }

    /// Whether a local hour falls outside the normal-access window.
    pub fn is_outside_quiet_hours(&self, hour: u32) -> bool {
        hour < self.quiet_hours_start || hour >= self.quiet_hours_end
    }
}
