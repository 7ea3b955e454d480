//! Gatewatch: anomaly detection and risk scoring for physical
//! access-control event logs.
//!
//! This facade crate re-exports the workspace members so a host service
//! can depend on one crate:
//!
//! - [`types`]: the event/alert data model, configuration, and errors
//! - [`rules`]: the detection rule catalog, evaluator, and scorer
//! - [`alerts`]: alert assembly and aggregation
//! - [`engine`]: the callable surfaces (rule queries, alert feed, export)

pub use gatewatch_alerts as alerts;
pub use gatewatch_engine as engine;
pub use gatewatch_rules as rules;
pub use gatewatch_types as types;

pub use gatewatch_engine::{AlertFeed, Engine, RuleReport};
pub use gatewatch_types::{
    AccessEvent, Alert, AlertType, EngineConfig, GatewatchError, Severity,
};
