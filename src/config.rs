//! Audit parameters
//!
//! Every constant of the audit lives here with its default. The binary only
//! ever runs `AuditConfig::default()`; tests substitute their own values.

use crate::error::AuditError;
use serde::{Deserialize, Serialize};

/// Parameters for the synthetic A/B test logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of simulated users
    pub n_users: usize,
    /// Identifier of the first user; the rest follow sequentially
    pub first_user_id: i64,
    /// Probability that a user lands in group B
    pub group_b_probability: f64,
    /// Platform goal rate before any nudge
    pub base_goal_rate: f64,
    /// Platform goal rate group B is resampled with
    pub nudged_goal_rate: f64,
    /// Mean of the comprehension score distribution
    pub comprehension_mean: f64,
    /// Standard deviation of the comprehension score distribution
    pub comprehension_std: f64,
    /// Comprehension points group B loses
    pub comprehension_penalty: f64,
    /// Decimal places kept on the comprehension score
    pub comprehension_decimals: u32,
    /// Lowest feature score drawn (inclusive)
    pub feature_score_min: i64,
    /// Highest feature score drawn (inclusive)
    pub feature_score_max: i64,
    /// Group B urgency is clamped to this before the boost
    pub urgency_pre_boost_max: f64,
    /// Urgency points added for group B
    pub urgency_boost: f64,
    /// Final clamp range for comprehension and urgency scores
    pub score_floor: f64,
    pub score_ceiling: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            n_users: 1000,
            first_user_id: 1000,
            group_b_probability: 0.5,
            base_goal_rate: 0.25,
            nudged_goal_rate: 0.35,
            comprehension_mean: 7.0,
            comprehension_std: 1.5,
            comprehension_penalty: 1.0,
            comprehension_decimals: 1,
            feature_score_min: 1,
            feature_score_max: 9,
            urgency_pre_boost_max: 8.0,
            urgency_boost: 2.0,
            score_floor: 1.0,
            score_ceiling: 10.0,
        }
    }
}

impl SimulationConfig {
    /// Reject parameters the generators cannot draw from.
    pub fn validate(&self) -> Result<(), AuditError> {
        if self.n_users == 0 {
            return Err(invalid("n_users must be positive"));
        }
        for (name, p) in [
            ("group_b_probability", self.group_b_probability),
            ("base_goal_rate", self.base_goal_rate),
            ("nudged_goal_rate", self.nudged_goal_rate),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(invalid(&format!("{name} must be within [0, 1], got {p}")));
            }
        }
        if !self.comprehension_std.is_finite() || self.comprehension_std <= 0.0 {
            return Err(invalid("comprehension_std must be positive and finite"));
        }
        if self.feature_score_min > self.feature_score_max {
            return Err(invalid("feature_score_min exceeds feature_score_max"));
        }
        if !(self.score_floor <= self.score_ceiling) {
            return Err(invalid("score_floor exceeds score_ceiling"));
        }
        if !(self.score_floor <= self.urgency_pre_boost_max) {
            return Err(invalid("score_floor exceeds urgency_pre_boost_max"));
        }
        Ok(())
    }
}

fn invalid(reason: &str) -> AuditError {
    AuditError::InvalidConfig {
        reason: reason.to_string(),
    }
}

/// Feature weights of the NAD score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub opt_out_difficulty: f64,
    /// Covers both urgency and default bias
    pub urgency_messaging: f64,
    /// Highest value a feature score is assumed to reach
    pub max_feature_score: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            opt_out_difficulty: 0.4,
            urgency_messaging: 0.5,
            max_feature_score: 10.0,
        }
    }
}

impl ScoringWeights {
    /// NAD score of an interface maxing out every feature (1.0 normalized).
    pub fn max_possible_score(&self) -> f64 {
        self.max_feature_score * self.opt_out_difficulty
            + self.max_feature_score * self.urgency_messaging
    }
}

/// Layout of the trade-off chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// PNG file the bitmap surface writes
    pub output_path: String,
    pub width: u32,
    pub height: u32,
    pub title_font_size: u32,
    pub label_font_size: u32,
    /// Decimals printed above each bar
    pub value_label_decimals: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            output_path: "ethical_tradeoff.png".to_string(),
            width: 1000,
            height: 600,
            title_font_size: 14,
            label_font_size: 12,
            value_label_decimals: 2,
        }
    }
}

/// Everything one audit run needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditConfig {
    pub simulation: SimulationConfig,
    pub weights: ScoringWeights,
    pub chart: ChartConfig,
    /// Decimals of the printed NAD summary
    #[serde(default = "default_summary_decimals")]
    pub summary_decimals: u32,
}

fn default_summary_decimals() -> u32 {
    2
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            weights: ScoringWeights::default(),
            chart: ChartConfig::default(),
            summary_decimals: default_summary_decimals(),
        }
    }
}
