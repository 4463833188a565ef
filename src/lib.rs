//! Nudge Audit Framework
//!
//! Simulates the logs of an A/B "nudge" test, scores every user with the
//! Nudge Autonomy Deficit (NAD) and reports the trade-off between platform
//! gain and user comprehension cost.
//!
//! # Modules
//! - `config` — Named simulation, scoring and chart parameters
//! - `frame` — Named-column in-memory table
//! - `simulator` — Synthetic A/B test data with injected group B bias
//! - `scorer` — NAD score and its normalized form
//! - `metrics` — Per-group means and the NAD summary
//! - `reports` — Trade-off table and chart rendering
//! - `pipeline` — Simulate → score → summarize → report
//! - `export` — JSON snapshot of a finished audit
//! - `ids` — Audit run identifiers
//! - `numeric` — Half-to-even rounding
//! - `error` — Error taxonomy

pub mod config;
pub mod error;
pub mod export;
pub mod frame;
pub mod ids;
pub mod metrics;
pub mod numeric;
pub mod pipeline;
pub mod reports;
pub mod scorer;
pub mod simulator;

pub use error::AuditError;
pub use frame::AuditFrame;

/// Crate version constant
pub const VERSION: &str = "1.0.0";
