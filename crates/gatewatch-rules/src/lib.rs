//! Rule catalog, time-windowed evaluator, and scorer for Gatewatch.
//!
//! This crate is the single authoritative home of the detection logic the
//! reference system re-derived (inconsistently) in its backend queries and
//! two dashboards. Every presentation surface goes through [`evaluate`]
//! and [`score`] rather than reimplementing thresholds.

pub mod bucket;
pub mod catalog;
pub mod evaluator;
pub mod rule;
pub mod scorer;

pub use catalog::default_catalog;
pub use evaluator::{evaluate, EvalContext};
pub use rule::{GroupCheck, Grouping, Predicate, Rule, RowCheck, Thresholds};
pub use scorer::{score, RuleScore};
