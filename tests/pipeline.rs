//! End-to-end audit runs
//!
//! Runs the full pipeline with a recording plotting surface and checks the
//! table, the summary and the chart handed to the surface.

use nudge_audit::config::{AuditConfig, SimulationConfig};
use nudge_audit::frame::columns::*;
use nudge_audit::frame::{AuditFrame, Column, TestGroup};
use nudge_audit::metrics::GroupMetricsTable;
use nudge_audit::pipeline::{run_audit_to, run_seeded, NAD_SUMMARY_HEADER};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use nudge_audit::reports::chart::{ChartSpec, PlottingSurface, COST_RED, GAIN_GREEN};
use nudge_audit::reports::tradeoff::TradeoffReport;
use nudge_audit::scorer::calculate_autonomy_deficit;
use nudge_audit::AuditError;

#[derive(Default)]
struct RecordingSurface {
    specs: Vec<ChartSpec>,
}

impl PlottingSurface for RecordingSurface {
    fn render(&mut self, spec: &ChartSpec) -> Result<(), AuditError> {
        self.specs.push(spec.clone());
        Ok(())
    }
}

#[test]
fn test_full_run() {
    let mut surface = RecordingSurface::default();
    let outcome = run_seeded(&AuditConfig::default(), 42, &mut surface).unwrap();

    assert_eq!(outcome.frame.len(), 1000);
    assert!(outcome.frame.contains(NAD_SCORE));
    assert!(outcome.frame.contains(NAD_SCORE_NORMALIZED));
    assert_eq!(outcome.nad_summary.groups.len(), 2);

    assert_eq!(surface.specs.len(), 1);
    let spec = &surface.specs[0];
    assert_eq!(
        spec.title,
        "Ethical Trade-Off: Platform Optimization vs. User Autonomy"
    );
    assert_eq!(spec.bars.len(), 2);
    assert_eq!(spec.bars[0].value, outcome.tradeoff.nudge_effect);
    assert_eq!(spec.bars[1].value, outcome.tradeoff.ethical_cost);
    assert_eq!(spec.color_of(spec.bars[0].impact), Some(GAIN_GREEN));
    assert_eq!(spec.color_of(spec.bars[1].impact), Some(COST_RED));
}

#[test]
fn test_console_report_order() {
    let mut out = Vec::new();
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let outcome = run_audit_to(
        &AuditConfig::default(),
        &mut rng,
        &mut RecordingSurface::default(),
        &mut out,
    )
    .unwrap();

    let text = String::from_utf8(out).unwrap();
    let expected = format!(
        "Simulating Audit Data...\n\
         Calculating Nudge Autonomy Deficit (NAD) Scores...\n\
         {NAD_SUMMARY_HEADER}\n\
         {}\n\
         Generating Ethical Trade-Off Visualization...\n",
        outcome.nad_summary
    );
    assert_eq!(text, expected);

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[2], "");
    assert_eq!(lines[4], "Test_Group");
    assert!(lines[5].starts_with("A    "));
    assert!(lines[6].starts_with("B    "));
    // Means are printed with two decimals
    assert_eq!(lines[5].rsplit('.').next().map(str::len), Some(2));
    assert_eq!(lines[7], "Name: NAD_Score, dtype: float64");
}

#[test]
fn test_console_stops_at_failing_step() {
    let config = AuditConfig {
        simulation: SimulationConfig {
            n_users: 20,
            group_b_probability: 0.0,
            ..Default::default()
        },
        ..Default::default()
    };
    let mut out = Vec::new();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let err = run_audit_to(&config, &mut rng, &mut RecordingSurface::default(), &mut out)
        .unwrap_err();

    assert_eq!(err, AuditError::MissingGroup { group: "B".into() });
    let text = String::from_utf8(out).unwrap();
    assert!(text.ends_with("Generating Ethical Trade-Off Visualization...\n"));
}

#[test]
fn test_run_is_reproducible() {
    let config = AuditConfig::default();
    let a = run_seeded(&config, 7, &mut RecordingSurface::default()).unwrap();
    let b = run_seeded(&config, 7, &mut RecordingSurface::default()).unwrap();

    assert_eq!(a.frame, b.frame);
    assert_eq!(a.tradeoff, b.tradeoff);
    assert_eq!(a.nad_summary, b.nad_summary);
}

#[test]
fn test_group_b_scores_higher_nad() {
    let outcome = run_seeded(&AuditConfig::default(), 123, &mut RecordingSurface::default()).unwrap();
    let a = outcome.nad_summary.get(TestGroup::A).unwrap();
    let b = outcome.nad_summary.get(TestGroup::B).unwrap();
    // Group B urgency is shifted up by the boost
    assert!(b > a, "A={a} B={b}");
}

#[test]
fn test_single_group_run_fails_with_missing_group() {
    let config = AuditConfig {
        simulation: SimulationConfig {
            n_users: 20,
            group_b_probability: 0.0,
            ..Default::default()
        },
        ..Default::default()
    };
    let mut surface = RecordingSurface::default();
    let err = run_seeded(&config, 1, &mut surface).unwrap_err();

    assert_eq!(err, AuditError::MissingGroup { group: "B".into() });
    assert!(surface.specs.is_empty());
}

#[test]
fn test_four_row_table() {
    let mut frame = AuditFrame::new()
        .with_column(
            TEST_GROUP,
            Column::Text(vec!["A".into(), "A".into(), "B".into(), "B".into()]),
        )
        .unwrap()
        .with_column(PLATFORM_GOAL_ACHIEVED, Column::Int(vec![0, 1, 1, 1]))
        .unwrap()
        .with_column(
            USER_COMPREHENSION_SCORE,
            Column::Float(vec![7.0, 8.0, 6.5, 6.5]),
        )
        .unwrap()
        .with_column(OPT_OUT_DIFFICULTY_SCORE, Column::Int(vec![2, 10, 2, 10]))
        .unwrap()
        .with_column(
            URGENCY_MESSAGING_SCORE,
            Column::Float(vec![3.0, 10.0, 3.0, 10.0]),
        )
        .unwrap();

    calculate_autonomy_deficit(&mut frame, &Default::default()).unwrap();
    let nad = frame.floats(NAD_SCORE).unwrap();
    let norm = frame.floats(NAD_SCORE_NORMALIZED).unwrap();
    assert!((nad[0] - 2.3).abs() < 1e-9);
    assert!((nad[1] - 9.0).abs() < 1e-9);
    assert!((norm[0] - 0.2556).abs() < 1e-4);
    assert!((norm[1] - 1.0).abs() < 1e-9);

    let metrics = GroupMetricsTable::from_frame(&frame).unwrap();
    let report = TradeoffReport::from_metrics(&metrics).unwrap();
    assert!((report.nudge_effect - 50.0).abs() < 1e-9);
    assert!((report.ethical_cost - 1.0).abs() < 1e-9);
}

#[test]
fn test_scorer_on_table_without_features() {
    let mut frame = AuditFrame::new()
        .with_column(TEST_GROUP, Column::Text(vec!["A".into()]))
        .unwrap();
    let err = calculate_autonomy_deficit(&mut frame, &Default::default()).unwrap_err();
    assert_eq!(err, AuditError::missing_column(OPT_OUT_DIFFICULTY_SCORE));
}
