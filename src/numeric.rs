//! Decimal rounding shared by the simulator and the NAD summary.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Round to `dp` decimal places, ties to even.
///
/// Non-finite values are returned unchanged.
pub fn round_dp(value: f64, dp: u32) -> f64 {
    Decimal::from_f64(value)
        .map(|d| d.round_dp(dp))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}
