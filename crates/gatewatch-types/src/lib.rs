//! Core types shared across all Gatewatch crates.
//!
//! Defines the access-event model, findings, alerts, configuration, and
//! error types used by the rule evaluator, alert assembler, aggregator,
//! and engine facade.

pub mod alert;
pub mod config;
pub mod error;
pub mod event;
pub mod finding;

pub use alert::{alert_fingerprint, Alert, AlertType, Severity};
pub use config::EngineConfig;
pub use error::GatewatchError;
pub use event::{AccessEvent, Direction, UNKNOWN};
pub use finding::Finding;
