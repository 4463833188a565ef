//! Report modules for audit output
//!
//! The trade-off table and its chart.

pub mod chart;
pub mod tradeoff;

pub use chart::{generate_visualization, BitmapSurface, ChartSpec, PlottingSurface};
pub use tradeoff::{ImpactType, TradeoffReport, TradeoffRow};
