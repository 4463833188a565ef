//! Trade-off chart
//!
//! `ChartSpec` is everything a plotting surface needs to draw the trade-off
//! bars: categories, values, colors, annotations and labels. Surfaces only
//! draw; all numbers are decided before `render` is called.

use crate::config::ChartConfig;
use crate::error::AuditError;
use crate::frame::AuditFrame;
use crate::metrics::GroupMetricsTable;
use crate::reports::tradeoff::{ImpactType, TradeoffReport};
use plotters::coord::ranged1d::{SegmentValue, SegmentedCoord};
use plotters::coord::types::RangedCoordu32;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;

pub const VISUALIZATION_PROGRESS: &str = "Generating Ethical Trade-Off Visualization...";

pub const CHART_TITLE: &str = "Ethical Trade-Off: Platform Optimization vs. User Autonomy";
pub const Y_AXIS_LABEL: &str = "Magnitude of Change";
pub const X_AXIS_LABEL: &str = "Metric";
pub const LEGEND_TITLE: &str = "Impact Type";

/// Headroom above the tallest bar, for the value labels.
const VALUE_HEADROOM: f64 = 1.15;

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Matplotlib's "g"
pub const GAIN_GREEN: Rgb = Rgb(0, 128, 0);
/// Matplotlib's "r"
pub const COST_RED: Rgb = Rgb(255, 0, 0);

/// A single bar: one category on the x axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSpec {
    pub category: String,
    pub value: f64,
    pub impact: ImpactType,
    /// Text drawn at the top of the bar
    pub annotation: String,
}

/// Complete description of the trade-off chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub legend_title: String,
    pub bars: Vec<BarSpec>,
    pub palette: Vec<(ImpactType, Rgb)>,
    pub width: u32,
    pub height: u32,
    pub title_font_size: u32,
    pub label_font_size: u32,
}

impl ChartSpec {
    pub fn from_report(report: &TradeoffReport, config: &ChartConfig) -> Self {
        let bars = report
            .rows
            .iter()
            .map(|row| BarSpec {
                category: row.metric.clone(),
                value: row.value,
                impact: row.impact,
                annotation: format!("{:.*}", config.value_label_decimals, row.value),
            })
            .collect();

        Self {
            title: CHART_TITLE.to_string(),
            x_label: X_AXIS_LABEL.to_string(),
            y_label: Y_AXIS_LABEL.to_string(),
            legend_title: LEGEND_TITLE.to_string(),
            bars,
            palette: vec![
                (ImpactType::PlatformGain, GAIN_GREEN),
                (ImpactType::UserCost, COST_RED),
            ],
            width: config.width,
            height: config.height,
            title_font_size: config.title_font_size,
            label_font_size: config.label_font_size,
        }
    }

    pub fn color_of(&self, impact: ImpactType) -> Option<Rgb> {
        self.palette
            .iter()
            .find(|(kind, _)| *kind == impact)
            .map(|(_, color)| *color)
    }

    pub fn categories(&self) -> Vec<&str> {
        self.bars.iter().map(|b| b.category.as_str()).collect()
    }

    /// Y range covering zero and every bar, with room for the annotations.
    pub fn value_range(&self) -> (f64, f64) {
        let finite = self.bars.iter().map(|b| b.value).filter(|v| v.is_finite());
        let (lo, hi) = finite.fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
        if lo == hi {
            return (0.0, 1.0);
        }
        (lo * VALUE_HEADROOM, hi * VALUE_HEADROOM)
    }
}

/// X axis with one segment per bar.
///
/// Integer ranges are inclusive of their end in plotters, so `n` bars need
/// the key points `0..=n-1`, written `0..n-1`.
fn category_axis(bars: usize) -> SegmentedCoord<RangedCoordu32> {
    let last = (bars as u32).saturating_sub(1);
    (0u32..last).into_segmented()
}

/// Something that can display a trade-off chart.
pub trait PlottingSurface {
    fn render(&mut self, spec: &ChartSpec) -> Result<(), AuditError>;
}

/// Draws the chart into a PNG file.
pub struct BitmapSurface {
    path: PathBuf,
}

impl BitmapSurface {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PlottingSurface for BitmapSurface {
    fn render(&mut self, spec: &ChartSpec) -> Result<(), AuditError> {
        let root = BitMapBackend::new(&self.path, (spec.width, spec.height)).into_drawing_area();
        root.fill(&WHITE).map_err(AuditError::render)?;

        let (y_min, y_max) = spec.value_range();
        let label_font = ("sans-serif", f64::from(spec.label_font_size));

        let mut chart = ChartBuilder::on(&root)
            .caption(&spec.title, ("sans-serif", f64::from(spec.title_font_size)))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(category_axis(spec.bars.len()), y_min..y_max)
            .map_err(AuditError::render)?;

        let categories = spec.categories();
        let category_label = |v: &SegmentValue<u32>| match v {
            SegmentValue::CenterOf(i) => categories
                .get(*i as usize)
                .map(|c| c.to_string())
                .unwrap_or_default(),
            _ => String::new(),
        };

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(spec.bars.len())
            .x_label_formatter(&category_label)
            .x_desc(spec.x_label.as_str())
            .y_desc(spec.y_label.as_str())
            .axis_desc_style(label_font)
            .draw()
            .map_err(AuditError::render)?;

        // Title row of the legend
        chart
            .draw_series(std::iter::empty::<Rectangle<(SegmentValue<u32>, f64)>>())
            .map_err(AuditError::render)?
            .label(spec.legend_title.as_str())
            .legend(|(x, y)| EmptyElement::at((x, y)));

        for (i, bar) in spec.bars.iter().enumerate() {
            let Rgb(r, g, b) = spec.color_of(bar.impact).unwrap_or(Rgb(128, 128, 128));
            let color = RGBColor(r, g, b);

            chart
                .draw_series(
                    Histogram::vertical(&chart)
                        .style(color.filled())
                        .margin(60)
                        .data(std::iter::once((i as u32, bar.value))),
                )
                .map_err(AuditError::render)?
                .label(bar.impact.label())
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], color.filled()));

            let anchor = if bar.value >= 0.0 { VPos::Bottom } else { VPos::Top };
            let style = TextStyle::from(label_font.into_font()).pos(Pos::new(HPos::Center, anchor));
            chart
                .draw_series(std::iter::once(Text::new(
                    bar.annotation.clone(),
                    (SegmentValue::CenterOf(i as u32), bar.value),
                    style,
                )))
                .map_err(AuditError::render)?;
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(label_font)
            .position(SeriesLabelPosition::UpperRight)
            .draw()
            .map_err(AuditError::render)?;

        root.present().map_err(AuditError::render)?;
        info!(path = %self.path.display(), "Rendered trade-off chart");
        Ok(())
    }
}

/// Build the trade-off report for a scored table and hand it to `surface`.
pub fn generate_visualization<S: PlottingSurface + ?Sized>(
    frame: &AuditFrame,
    surface: &mut S,
    config: &ChartConfig,
) -> Result<TradeoffReport, AuditError> {
    generate_visualization_to(frame, surface, config, &mut io::stdout().lock())
}

/// `generate_visualization` with the progress line written to `out`.
pub fn generate_visualization_to<S, W>(
    frame: &AuditFrame,
    surface: &mut S,
    config: &ChartConfig,
    out: &mut W,
) -> Result<TradeoffReport, AuditError>
where
    S: PlottingSurface + ?Sized,
    W: Write + ?Sized,
{
    writeln!(out, "{VISUALIZATION_PROGRESS}").map_err(AuditError::console)?;

    let metrics = GroupMetricsTable::from_frame(frame)?;
    let report = TradeoffReport::from_metrics(&metrics)?;
    info!(
        nudge_effect = report.nudge_effect,
        ethical_cost = report.ethical_cost,
        "Computed ethical trade-off"
    );

    let spec = ChartSpec::from_report(&report, config);
    surface.render(&spec)?;
    Ok(report)
}
