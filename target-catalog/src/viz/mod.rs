//! Visualization of target list statistics.

use plotters::drawing::DrawingAreaErrorKind;
use plotters::style::RGBColor;
use thiserror::Error;

pub mod statistics_plot;

pub use statistics_plot::{render_statistics_plot, ScatterPoint, StatisticsPlotData};

/// Errors raised while rendering a figure
#[derive(Debug, Error)]
pub enum PlotError {
    /// Backend or layout failure reported by plotters
    #[error("Drawing error: {0}")]
    Drawing(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for PlotError {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        PlotError::Drawing(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PlotError>;

/// Viridis anchor colours at 0, 1/8, ..., 1
const VIRIDIS: [(u8, u8, u8); 9] = [
    (68, 1, 84),
    (71, 44, 122),
    (59, 81, 139),
    (44, 113, 142),
    (33, 144, 141),
    (39, 173, 129),
    (92, 200, 99),
    (170, 220, 50),
    (253, 231, 37),
];

/// Viridis colour for `value` scaled into `[min, max]`; out-of-range values clamp
pub fn viridis(value: f64, min: f64, max: f64) -> RGBColor {
    let t = if max > min {
        ((value - min) / (max - min)).clamp(0.0, 1.0)
    } else {
        0.5
    };
    let scaled = t * (VIRIDIS.len() - 1) as f64;
    let index = (scaled.floor() as usize).min(VIRIDIS.len() - 2);
    let frac = scaled - index as f64;

    let (r0, g0, b0) = VIRIDIS[index];
    let (r1, g1, b1) = VIRIDIS[index + 1];
    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    RGBColor(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
}
