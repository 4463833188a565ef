//! Per-group audit metrics
//!
//! Group means of the platform goal, comprehension and NAD columns.

use crate::error::AuditError;
use crate::frame::columns::*;
use crate::frame::{AuditFrame, TestGroup};
use crate::numeric::round_dp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Core metrics of one test group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMetrics {
    pub group: String,
    /// Mean of Platform_Goal_Achieved
    pub goal_rate: f64,
    /// Mean of User_Comprehension_Score
    pub comprehension_avg: f64,
    pub users: usize,
}

/// One `GroupMetrics` row per group present, sorted by group label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMetricsTable {
    pub rows: Vec<GroupMetrics>,
}

impl GroupMetricsTable {
    pub fn from_frame(frame: &AuditFrame) -> Result<Self, AuditError> {
        let goal = frame.numeric(PLATFORM_GOAL_ACHIEVED)?;
        let comprehension = frame.numeric(USER_COMPREHENSION_SCORE)?;
        let groups = frame.group_indices(TEST_GROUP)?;

        let rows = groups
            .into_iter()
            .map(|(group, idx)| {
                let users = idx.len();
                let goal_sum: f64 = idx.iter().map(|&i| goal[i]).sum();
                let comp_sum: f64 = idx.iter().map(|&i| comprehension[i]).sum();
                GroupMetrics {
                    group,
                    goal_rate: goal_sum / users as f64,
                    comprehension_avg: comp_sum / users as f64,
                    users,
                }
            })
            .collect();

        Ok(Self { rows })
    }

    pub fn get(&self, group: TestGroup) -> Option<&GroupMetrics> {
        self.rows.iter().find(|m| m.group == group.as_str())
    }

    /// Like `get`, but an absent group is an error.
    pub fn require(&self, group: TestGroup) -> Result<&GroupMetrics, AuditError> {
        self.get(group).ok_or_else(|| AuditError::MissingGroup {
            group: group.to_string(),
        })
    }
}

/// Mean NAD score of one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupScore {
    pub group: String,
    pub mean_nad: f64,
}

/// Mean `NAD_Score` per test group, rounded for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NadSummary {
    pub groups: Vec<GroupScore>,
    /// Decimal places of the means, also their display precision
    pub decimals: u32,
}

impl NadSummary {
    pub fn from_frame(frame: &AuditFrame, decimals: u32) -> Result<Self, AuditError> {
        let groups = frame
            .group_mean(TEST_GROUP, NAD_SCORE)?
            .into_iter()
            .map(|(group, mean)| GroupScore {
                group,
                mean_nad: round_dp(mean, decimals),
            })
            .collect();
        Ok(Self { groups, decimals })
    }

    pub fn get(&self, group: TestGroup) -> Option<f64> {
        self.groups
            .iter()
            .find(|g| g.group == group.as_str())
            .map(|g| g.mean_nad)
    }
}

impl fmt::Display for NadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{TEST_GROUP}")?;
        for g in &self.groups {
            writeln!(f, "{:<5}{:.*}", g.group, self.decimals as usize, g.mean_nad)?;
        }
        write!(f, "Name: {NAD_SCORE}, dtype: float64")
    }
}
