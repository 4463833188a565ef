//! Audit export
//!
//! Serializes the results of a run to JSON for external consumption.

use crate::ids::RunId;
use crate::metrics::{GroupMetrics, GroupScore};
use crate::pipeline::AuditOutcome;
use crate::reports::tradeoff::TradeoffRow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of a finished audit run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditExport {
    pub version: String,
    pub run_id: RunId,
    pub generated_at: DateTime<Utc>,
    /// Seed of the simulation RNG, when known
    pub seed: Option<u64>,
    pub rows: usize,
    pub group_metrics: Vec<GroupMetrics>,
    pub nad_summary: Vec<GroupScore>,
    pub nudge_effect: f64,
    pub ethical_cost: f64,
    pub tradeoff: Vec<TradeoffRow>,
}

/// Build an export from a finished run.
pub fn build_export(run_id: RunId, seed: Option<u64>, outcome: &AuditOutcome) -> AuditExport {
    AuditExport {
        version: crate::VERSION.to_string(),
        run_id,
        generated_at: Utc::now(),
        seed,
        rows: outcome.frame.len(),
        group_metrics: outcome.tradeoff.group_metrics.rows.clone(),
        nad_summary: outcome.nad_summary.groups.clone(),
        nudge_effect: outcome.tradeoff.nudge_effect,
        ethical_cost: outcome.tradeoff.ethical_cost,
        tradeoff: outcome.tradeoff.rows.clone(),
    }
}

/// Export as pretty-printed JSON.
pub fn export_json(export: &AuditExport) -> String {
    serde_json::to_string_pretty(export).unwrap_or_default()
}
