//! Ethical trade-off report
//!
//! Compares what group B gains the platform against what it costs users:
//! - nudge effect: goal rate difference B − A, in percentage points
//! - ethical cost: comprehension drop A − B, in score points

use crate::error::AuditError;
use crate::frame::TestGroup;
use crate::metrics::GroupMetricsTable;
use serde::{Deserialize, Serialize};

pub const PLATFORM_GOAL_INCREASE: &str = "Platform Goal Increase (%)";
pub const USER_COMPREHENSION_DROP: &str = "User Comprehension Drop (Points)";

/// Impact category of a trade-off row, used for chart coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImpactType {
    #[serde(rename = "Platform Gain (Desired)")]
    PlatformGain,
    #[serde(rename = "User Cost (Ethical Concern)")]
    UserCost,
}

impl ImpactType {
    pub fn label(&self) -> &'static str {
        match self {
            ImpactType::PlatformGain => "Platform Gain (Desired)",
            ImpactType::UserCost => "User Cost (Ethical Concern)",
        }
    }
}

/// One bar of the trade-off chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeoffRow {
    pub metric: String,
    pub value: f64,
    #[serde(rename = "type")]
    pub impact: ImpactType,
}

/// Platform gain vs. user cost of the nudge variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeoffReport {
    pub nudge_effect: f64,
    pub ethical_cost: f64,
    pub rows: Vec<TradeoffRow>,
    /// Group means the effects were computed from
    pub group_metrics: GroupMetricsTable,
}

impl TradeoffReport {
    /// Both groups must be present.
    pub fn from_metrics(metrics: &GroupMetricsTable) -> Result<Self, AuditError> {
        let a = metrics.require(TestGroup::A)?;
        let b = metrics.require(TestGroup::B)?;

        let nudge_effect = (b.goal_rate - a.goal_rate) * 100.0;
        let ethical_cost = a.comprehension_avg - b.comprehension_avg;

        let rows = vec![
            TradeoffRow {
                metric: PLATFORM_GOAL_INCREASE.to_string(),
                value: nudge_effect,
                impact: ImpactType::PlatformGain,
            },
            TradeoffRow {
                metric: USER_COMPREHENSION_DROP.to_string(),
                value: ethical_cost,
                impact: ImpactType::UserCost,
            },
        ];

        Ok(Self {
            nudge_effect,
            ethical_cost,
            rows,
            group_metrics: metrics.clone(),
        })
    }
}
