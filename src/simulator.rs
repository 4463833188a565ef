//! A/B test log simulator
//!
//! Generates per-user observations of a "nudge" test. Base columns are
//! drawn for every user, then group B gets its bias: a higher platform goal
//! rate, lower comprehension and boosted urgency messaging.

use crate::config::SimulationConfig;
use crate::error::AuditError;
use crate::frame::columns::*;
use crate::frame::{AuditFrame, Column, TestGroup};
use crate::numeric::round_dp;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use std::io::{self, Write};
use tracing::info;

pub const SIMULATION_PROGRESS: &str = "Simulating Audit Data...";

/// Simulate the audit table with the given random source.
pub fn simulate<R: Rng + ?Sized>(
    config: &SimulationConfig,
    rng: &mut R,
) -> Result<AuditFrame, AuditError> {
    simulate_to(config, rng, &mut io::stdout().lock())
}

/// `simulate` with the progress line written to `out`.
pub fn simulate_to<R, W>(
    config: &SimulationConfig,
    rng: &mut R,
    out: &mut W,
) -> Result<AuditFrame, AuditError>
where
    R: Rng + ?Sized,
    W: Write + ?Sized,
{
    writeln!(out, "{SIMULATION_PROGRESS}").map_err(AuditError::console)?;
    config.validate()?;

    let n = config.n_users;
    let comprehension = Normal::new(config.comprehension_mean, config.comprehension_std)
        .map_err(|e| AuditError::InvalidConfig {
            reason: format!("comprehension distribution: {e}"),
        })?;
    let scores = config.feature_score_min..=config.feature_score_max;

    // Base columns, one column at a time
    let user_ids: Vec<i64> = (0..n as i64).map(|i| config.first_user_id + i).collect();
    let groups: Vec<TestGroup> = (0..n)
        .map(|_| {
            if rng.gen_bool(config.group_b_probability) {
                TestGroup::B
            } else {
                TestGroup::A
            }
        })
        .collect();
    let mut goal: Vec<i64> = (0..n)
        .map(|_| i64::from(rng.gen_bool(config.base_goal_rate)))
        .collect();
    let mut comprehension_scores: Vec<f64> =
        (0..n).map(|_| comprehension.sample(&mut *rng)).collect();
    let opt_out: Vec<i64> = (0..n).map(|_| rng.gen_range(scores.clone())).collect();
    let mut urgency: Vec<f64> = (0..n)
        .map(|_| rng.gen_range(scores.clone()) as f64)
        .collect();

    // Group B bias
    let nudged: Vec<usize> = (0..n).filter(|&i| groups[i] == TestGroup::B).collect();
    for &i in &nudged {
        goal[i] = i64::from(rng.gen_bool(config.nudged_goal_rate));
    }
    for &i in &nudged {
        comprehension_scores[i] -= config.comprehension_penalty;
    }
    for &i in &nudged {
        urgency[i] = urgency[i].clamp(config.score_floor, config.urgency_pre_boost_max)
            + config.urgency_boost;
    }

    // Whole-column cleanup
    for score in comprehension_scores.iter_mut() {
        *score = round_dp(
            score.clamp(config.score_floor, config.score_ceiling),
            config.comprehension_decimals,
        );
    }
    for score in urgency.iter_mut() {
        *score = score.clamp(config.score_floor, config.score_ceiling);
    }

    info!(
        users = n,
        group_b = nudged.len(),
        group_a = n - nudged.len(),
        "Simulated audit data"
    );

    let group_labels = groups.iter().map(|g| g.as_str().to_string()).collect();
    AuditFrame::new()
        .with_column(USER_ID, Column::Int(user_ids))?
        .with_column(TEST_GROUP, Column::Text(group_labels))?
        .with_column(PLATFORM_GOAL_ACHIEVED, Column::Int(goal))?
        .with_column(USER_COMPREHENSION_SCORE, Column::Float(comprehension_scores))?
        .with_column(OPT_OUT_DIFFICULTY_SCORE, Column::Int(opt_out))?
        .with_column(URGENCY_MESSAGING_SCORE, Column::Float(urgency))
}

/// Simulate with a deterministic ChaCha8 generator.
pub fn simulate_seeded(config: &SimulationConfig, seed: u64) -> Result<AuditFrame, AuditError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    simulate(config, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_frame(seed: u64) -> AuditFrame {
        simulate_seeded(&SimulationConfig::default(), seed).unwrap()
    }

    #[test]
    fn test_row_count_and_columns() {
        let frame = default_frame(42);
        assert_eq!(frame.len(), 1000);
        assert_eq!(
            frame.column_names(),
            vec![
                USER_ID,
                TEST_GROUP,
                PLATFORM_GOAL_ACHIEVED,
                USER_COMPREHENSION_SCORE,
                OPT_OUT_DIFFICULTY_SCORE,
                URGENCY_MESSAGING_SCORE,
            ]
        );
    }

    #[test]
    fn test_user_ids_contiguous() {
        let frame = default_frame(42);
        let ids = frame.ints(USER_ID).unwrap();
        for (i, id) in ids.iter().enumerate() {
            assert_eq!(*id, 1000 + i as i64);
        }
    }

    #[test]
    fn test_groups_and_binary_goal() {
        let frame = default_frame(7);
        assert!(frame
            .texts(TEST_GROUP)
            .unwrap()
            .iter()
            .all(|g| g == "A" || g == "B"));
        assert!(frame
            .ints(PLATFORM_GOAL_ACHIEVED)
            .unwrap()
            .iter()
            .all(|&v| v == 0 || v == 1));
    }

    #[test]
    fn test_scores_clamped() {
        let frame = default_frame(11);
        for &c in frame.floats(USER_COMPREHENSION_SCORE).unwrap() {
            assert!((1.0..=10.0).contains(&c), "comprehension {c}");
            assert!(((c * 10.0).round() - c * 10.0).abs() < 1e-9);
        }
        for &u in frame.floats(URGENCY_MESSAGING_SCORE).unwrap() {
            assert!((1.0..=10.0).contains(&u), "urgency {u}");
        }
        for &o in frame.ints(OPT_OUT_DIFFICULTY_SCORE).unwrap() {
            assert!((1..=9).contains(&o));
        }
    }

    #[test]
    fn test_group_b_urgency_boosted() {
        let frame = default_frame(3);
        let groups = frame.texts(TEST_GROUP).unwrap();
        let urgency = frame.floats(URGENCY_MESSAGING_SCORE).unwrap();
        for (g, &u) in groups.iter().zip(urgency) {
            if g == "B" {
                assert!((3.0..=10.0).contains(&u));
            } else {
                assert!((1.0..=9.0).contains(&u));
            }
        }
    }

    #[test]
    fn test_seeded_is_deterministic() {
        assert_eq!(default_frame(99), default_frame(99));
        assert_ne!(default_frame(1), default_frame(2));
    }

    #[test]
    fn test_injected_bias_visible() {
        let frame = default_frame(2024);
        let goal = frame.group_mean(TEST_GROUP, PLATFORM_GOAL_ACHIEVED).unwrap();
        let comp = frame.group_mean(TEST_GROUP, USER_COMPREHENSION_SCORE).unwrap();
        assert!(goal["B"] > goal["A"]);
        assert!(comp["A"] > comp["B"]);
    }

    #[test]
    fn test_invalid_config() {
        let config = SimulationConfig {
            base_goal_rate: -0.1,
            ..Default::default()
        };
        assert!(matches!(
            simulate_seeded(&config, 1),
            Err(AuditError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_progress_line_precedes_validation() {
        let config = SimulationConfig {
            n_users: 0,
            ..Default::default()
        };
        let mut out = Vec::new();
        let result = simulate_to(&config, &mut ChaCha8Rng::seed_from_u64(1), &mut out);
        assert!(result.is_err());
        assert_eq!(String::from_utf8(out).unwrap(), "Simulating Audit Data...\n");
    }

    #[test]
    fn test_all_group_b() {
        let config = SimulationConfig {
            n_users: 50,
            group_b_probability: 1.0,
            ..Default::default()
        };
        let frame = simulate_seeded(&config, 5).unwrap();
        assert!(frame.texts(TEST_GROUP).unwrap().iter().all(|g| g == "B"));
    }
}
