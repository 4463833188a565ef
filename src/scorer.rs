//! Nudge Autonomy Deficit (NAD) scoring
//!
//! NAD = opt-out weight × OptOut_Difficulty_Score
//!     + urgency weight × Urgency_Messaging_Score
//!
//! A higher score means less user autonomy. The normalized score divides by
//! the NAD of an interface maxing out every feature. Scores are not capped,
//! so normalized values above 1.0 are possible.

use crate::config::ScoringWeights;
use crate::error::AuditError;
use crate::frame::columns::*;
use crate::frame::{AuditFrame, Column};
use std::io::{self, Write};
use tracing::info;

pub const SCORING_PROGRESS: &str = "Calculating Nudge Autonomy Deficit (NAD) Scores...";

/// Append `NAD_Score` and `NAD_Score_Normalized` to the table.
///
/// Existing NAD columns are overwritten, so scoring twice is a no-op.
pub fn calculate_autonomy_deficit<'a>(
    frame: &'a mut AuditFrame,
    weights: &ScoringWeights,
) -> Result<&'a mut AuditFrame, AuditError> {
    calculate_autonomy_deficit_to(frame, weights, &mut io::stdout().lock())
}

/// `calculate_autonomy_deficit` with the progress line written to `out`.
pub fn calculate_autonomy_deficit_to<'a, W: Write + ?Sized>(
    frame: &'a mut AuditFrame,
    weights: &ScoringWeights,
    out: &mut W,
) -> Result<&'a mut AuditFrame, AuditError> {
    writeln!(out, "{SCORING_PROGRESS}").map_err(AuditError::console)?;

    let opt_out = frame.numeric(OPT_OUT_DIFFICULTY_SCORE)?;
    let urgency = frame.numeric(URGENCY_MESSAGING_SCORE)?;
    let max_possible = weights.max_possible_score();

    let nad: Vec<f64> = opt_out
        .iter()
        .zip(&urgency)
        .map(|(o, u)| o * weights.opt_out_difficulty + u * weights.urgency_messaging)
        .collect();
    let normalized: Vec<f64> = nad.iter().map(|score| score / max_possible).collect();

    frame.insert(NAD_SCORE, Column::Float(nad))?;
    frame.insert(NAD_SCORE_NORMALIZED, Column::Float(normalized))?;

    info!(rows = frame.len(), max_possible, "Scored autonomy deficit");
    Ok(frame)
}
