//! Finding: the fact that one event matched one rule within one time bucket.
//!
//! Findings are transient. They are recomputed on each evaluation run and
//! never stored.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub rule_id: String,
    pub event_id: String,
    /// Composed bucket key the event was grouped under; empty for
    /// row-predicate rules, which do not group.
    pub bucket: String,
}

impl Finding {
    pub fn new(
        rule_id: impl Into<String>,
        event_id: impl Into<String>,
        bucket: impl Into<String>,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            event_id: event_id.into(),
            bucket: bucket.into(),
        }
    }
}
