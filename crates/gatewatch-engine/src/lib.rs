//! Engine facade for Gatewatch.
//!
//! Exposes the three query surfaces the host service mounts: per-rule
//! queries ([`Engine::run_rule`]), the alert feed
//! ([`Engine::alert_feed`]), and report export ([`Engine::export`]).

pub mod engine;
pub mod export;

pub use engine::{AlertFeed, Engine, RuleReport};
pub use export::export_csv;
