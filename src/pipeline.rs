//! The audit run
//!
//! Simulate → score → print the NAD summary → trade-off report and chart.

use crate::config::AuditConfig;
use crate::error::AuditError;
use crate::frame::AuditFrame;
use crate::metrics::NadSummary;
use crate::reports::chart::{generate_visualization_to, PlottingSurface};
use crate::reports::tradeoff::TradeoffReport;
use crate::scorer::calculate_autonomy_deficit_to;
use crate::simulator::simulate_to;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io::{self, Write};

pub const NAD_SUMMARY_HEADER: &str = "\n--- Average Nudge Autonomy Deficit (NAD) Scores ---";
pub const AUDIT_COMPLETE: &str = "\nAudit Complete.";

/// Everything a finished run produced.
#[derive(Debug, Clone)]
pub struct AuditOutcome {
    pub frame: AuditFrame,
    pub nad_summary: NadSummary,
    pub tradeoff: TradeoffReport,
}

/// Run the audit end to end with the given random source.
pub fn run_audit<R, S>(
    config: &AuditConfig,
    rng: &mut R,
    surface: &mut S,
) -> Result<AuditOutcome, AuditError>
where
    R: Rng + ?Sized,
    S: PlottingSurface + ?Sized,
{
    run_audit_to(config, rng, surface, &mut io::stdout().lock())
}

/// `run_audit` with the console report written to `out`.
pub fn run_audit_to<R, S, W>(
    config: &AuditConfig,
    rng: &mut R,
    surface: &mut S,
    out: &mut W,
) -> Result<AuditOutcome, AuditError>
where
    R: Rng + ?Sized,
    S: PlottingSurface + ?Sized,
    W: Write + ?Sized,
{
    let mut frame = simulate_to(&config.simulation, rng, out)?;
    calculate_autonomy_deficit_to(&mut frame, &config.weights, out)?;

    let nad_summary = NadSummary::from_frame(&frame, config.summary_decimals)?;
    writeln!(out, "{NAD_SUMMARY_HEADER}").map_err(AuditError::console)?;
    writeln!(out, "{nad_summary}").map_err(AuditError::console)?;

    let tradeoff = generate_visualization_to(&frame, surface, &config.chart, out)?;

    Ok(AuditOutcome {
        frame,
        nad_summary,
        tradeoff,
    })
}

/// `run_audit` with a ChaCha8 generator seeded from `seed`.
pub fn run_seeded<S: PlottingSurface + ?Sized>(
    config: &AuditConfig,
    seed: u64,
    surface: &mut S,
) -> Result<AuditOutcome, AuditError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    run_audit(config, &mut rng, surface)
}
