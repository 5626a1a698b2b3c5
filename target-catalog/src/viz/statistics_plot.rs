//! Four-panel target statistics figure
//!
//! Layout (2x2):
//! - top left: literature age histogram with a 1 Gyr marker
//! - top right: mean age uncertainty histogram (display cut at 5 Gyr)
//! - bottom left: Teff vs age scatter coloured by [Fe/H], with colour bar
//! - bottom right: brightness histogram (V, falling back to Gaia G) with KDE

use super::{viridis, Result};
use crate::catalogs::{TargetRecord, TargetSet};
use crate::config::AnalysisConfig;
use crate::stats::{age_label, gaussian_kde, linspace, AgeSample, Histogram};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

/// 12 x 10 inches at 150 dpi
pub const FIGURE_SIZE: (u32, u32) = (1800, 1500);

/// Fixed scatter window: age [Gyr] and effective temperature [K]
const SCATTER_AGE_RANGE: (f64, f64) = (0.0, 14.0);
const SCATTER_TEFF_RANGE: (f64, f64) = (3000.0, 7500.0);

/// Metallicity colour scale limits, dex
const MET_RANGE: (f64, f64) = (-0.5, 0.5);

const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);
const SALMON: RGBColor = RGBColor(250, 128, 114);
const PURPLE: RGBColor = RGBColor(128, 0, 128);
const GREY: RGBColor = RGBColor(150, 150, 150);

/// One point of the Teff vs age scatter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterPoint {
    pub age: f64,
    pub teff: f64,
    pub met: Option<f64>,
}

/// Values plotted in each panel
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsPlotData {
    pub ages: Vec<f64>,
    /// Mean age uncertainties below the display cut
    pub age_errors: Vec<f64>,
    /// Aged targets with a Teff inside the scatter window
    pub scatter: Vec<ScatterPoint>,
    /// Brightness of every target that has one
    pub brightness: Vec<f64>,
}

impl StatisticsPlotData {
    pub fn new<C>(catalog: &C, samples: &[AgeSample], config: &AnalysisConfig) -> Self
    where
        C: TargetSet<Entry = TargetRecord>,
    {
        let in_window = |p: &ScatterPoint| {
            (SCATTER_AGE_RANGE.0..=SCATTER_AGE_RANGE.1).contains(&p.age)
                && (SCATTER_TEFF_RANGE.0..=SCATTER_TEFF_RANGE.1).contains(&p.teff)
        };

        Self {
            ages: samples.iter().map(|s| s.age).collect(),
            age_errors: samples
                .iter()
                .map(|s| s.mean_age_err)
                .filter(|err| *err < config.max_plotted_age_err_gyr)
                .collect(),
            scatter: samples
                .iter()
                .filter_map(|s| {
                    s.teff.map(|teff| ScatterPoint {
                        age: s.age,
                        teff,
                        met: s.met,
                    })
                })
                .filter(in_window)
                .collect(),
            brightness: catalog
                .records()
                .iter()
                .filter_map(TargetRecord::brightness)
                .collect(),
        }
    }
}

/// Vertical reference line drawn over a histogram
struct Marker {
    x: f64,
    label: String,
    color: RGBColor,
    /// Number of dashes along the line; more dashes read as dotted
    dashes: usize,
}

struct HistogramPanel<'a> {
    title: &'a str,
    x_desc: &'a str,
    y_desc: &'a str,
    color: RGBColor,
    marker: Option<Marker>,
    kde: bool,
}

/// Render the four-panel figure to a PNG at `path`
pub fn render_statistics_plot(
    data: &StatisticsPlotData,
    config: &AnalysisConfig,
    path: &Path,
) -> Result<()> {
    let root = BitMapBackend::new(path, FIGURE_SIZE).into_drawing_area();
    draw_statistics_plot(&root, data, config)?;
    root.present()?;
    log::info!("Rendered statistics plot to {}", path.display());
    Ok(())
}

/// Draw the figure onto any backend
pub fn draw_statistics_plot<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    data: &StatisticsPlotData,
    config: &AnalysisConfig,
) -> Result<()> {
    root.fill(&WHITE)?;
    let root = root.margin(20, 20, 20, 20);
    let panels = root.split_evenly((2, 2));

    draw_histogram(
        &panels[0],
        &data.ages,
        config.bins,
        HistogramPanel {
            title: "Distribution of Literature Ages",
            x_desc: "Literature Age [Gyr]",
            y_desc: "Number of Stars",
            color: SKY_BLUE,
            marker: Some(Marker {
                x: config.young_age_gyr,
                label: age_label(config.young_age_gyr),
                color: RED,
                dashes: 15,
            }),
            kde: false,
        },
    )?;

    draw_histogram(
        &panels[1],
        &data.age_errors,
        config.bins,
        HistogramPanel {
            title: "How precise are current ages?",
            x_desc: "Age Uncertainty [Gyr]",
            y_desc: "Number of Stars",
            color: SALMON,
            marker: None,
            kde: false,
        },
    )?;

    draw_age_teff_scatter(&panels[2], &data.scatter)?;

    draw_histogram(
        &panels[3],
        &data.brightness,
        config.bins,
        HistogramPanel {
            title: "Target Brightness Distribution",
            x_desc: "Brightness (V mag)",
            y_desc: "Count",
            color: PURPLE,
            marker: Some(Marker {
                x: config.brightness_limit_mag,
                label: brightness_limit_label(config.brightness_limit_mag),
                color: BLACK,
                dashes: 40,
            }),
            kde: true,
        },
    )?;

    Ok(())
}

fn brightness_limit_label(mag: f64) -> String {
    format!("Spec Limit (~{mag})")
}

/// Break a vertical line into `dashes` drawn segments with equal gaps
fn dash_segments(x: f64, y0: f64, y1: f64, dashes: usize) -> Vec<Vec<(f64, f64)>> {
    let pieces = dashes.max(1) * 2 - 1;
    let step = (y1 - y0) / pieces as f64;
    (0..pieces)
        .step_by(2)
        .map(|i| vec![(x, y0 + step * i as f64), (x, y0 + step * (i + 1) as f64)])
        .collect()
}

fn draw_histogram<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    values: &[f64],
    bins: usize,
    panel: HistogramPanel<'_>,
) -> Result<()> {
    let hist = Histogram::new(values, bins);
    let (mut lo, mut hi) = hist.range().unwrap_or((0.0, 1.0));
    if let Some(marker) = &panel.marker {
        let pad = (hi - lo) * 0.02;
        lo = lo.min(marker.x - pad);
        hi = hi.max(marker.x + pad);
    }

    let grid = linspace(lo, hi, 200);
    // KDE scaled from density to counts per bin
    let kde_curve: Vec<f64> = if panel.kde && !hist.is_empty() {
        let scale = hist.total() as f64 * hist.bin_width();
        gaussian_kde(values, &grid)
            .into_iter()
            .map(|d| d * scale)
            .collect()
    } else {
        Vec::new()
    };

    let y_max = kde_curve
        .iter()
        .copied()
        .fold(hist.max_count() as f64, f64::max)
        .max(1.0)
        * 1.1;

    let mut chart = ChartBuilder::on(area)
        .caption(panel.title, ("sans-serif", 28).into_font().color(&BLACK))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(lo..hi, 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_desc(panel.x_desc)
        .y_desc(panel.y_desc)
        .axis_desc_style(("sans-serif", 20))
        .label_style(("sans-serif", 16))
        .light_line_style(RGBColor(235, 235, 235))
        .draw()?;

    chart.draw_series(hist.bins().map(|(x0, x1, count)| {
        Rectangle::new([(x0, 0.0), (x1, count as f64)], panel.color.mix(0.8).filled())
    }))?;
    chart.draw_series(hist.bins().map(|(x0, x1, count)| {
        Rectangle::new([(x0, 0.0), (x1, count as f64)], WHITE.stroke_width(1))
    }))?;

    if !kde_curve.is_empty() {
        chart.draw_series(LineSeries::new(
            grid.iter().copied().zip(kde_curve.iter().copied()),
            panel.color.stroke_width(2),
        ))?;
    }

    if let Some(marker) = &panel.marker {
        let color = marker.color;
        chart
            .draw_series(
                dash_segments(marker.x, 0.0, y_max, marker.dashes)
                    .into_iter()
                    .map(|segment| PathElement::new(segment, color.stroke_width(2))),
            )?
            .label(marker.label.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.9))
            .border_style(BLACK)
            .label_font(("sans-serif", 18))
            .draw()?;
    }

    if hist.is_empty() {
        area.draw(&Text::new(
            "No data",
            (area.dim_in_pixel().0 as i32 / 2 - 40, area.dim_in_pixel().1 as i32 / 2),
            ("sans-serif", 24).into_font().color(&GREY),
        ))?;
    }

    Ok(())
}

fn draw_age_teff_scatter<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    points: &[ScatterPoint],
) -> Result<()> {
    let bar_width = 120;
    let plot_width = (area.dim_in_pixel().0 as i32 - bar_width).max(1);
    let (plot_area, bar_area) = area.split_horizontally(plot_width);

    let mut chart = ChartBuilder::on(&plot_area)
        .caption(
            "Teff vs. Age (Color = Metallicity)",
            ("sans-serif", 28).into_font().color(&BLACK),
        )
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(
            SCATTER_AGE_RANGE.0..SCATTER_AGE_RANGE.1,
            SCATTER_TEFF_RANGE.0..SCATTER_TEFF_RANGE.1,
        )?;

    chart
        .configure_mesh()
        .x_desc("Age [Gyr]")
        .y_desc("Effective Temperature [K]")
        .axis_desc_style(("sans-serif", 20))
        .label_style(("sans-serif", 16))
        .light_line_style(RGBColor(235, 235, 235))
        .draw()?;

    chart.draw_series(points.iter().map(|p| {
        let color = match p.met {
            Some(met) => viridis(met, MET_RANGE.0, MET_RANGE.1),
            None => GREY,
        };
        Circle::new((p.age, p.teff), 4, color.mix(0.6).filled())
    }))?;

    // Colour bar
    let mut bar = ChartBuilder::on(&bar_area)
        .margin_top(60)
        .margin_bottom(65)
        .margin_right(10)
        .y_label_area_size(70)
        .build_cartesian_2d(0.0..1.0, MET_RANGE.0..MET_RANGE.1)?;

    bar.configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .disable_x_axis()
        .y_desc("[Fe/H]")
        .axis_desc_style(("sans-serif", 20))
        .label_style(("sans-serif", 16))
        .draw()?;

    let steps = 100;
    let step = (MET_RANGE.1 - MET_RANGE.0) / steps as f64;
    bar.draw_series((0..steps).map(|i| {
        let y0 = MET_RANGE.0 + step * i as f64;
        let color = viridis(y0 + step / 2.0, MET_RANGE.0, MET_RANGE.1);
        Rectangle::new([(0.0, y0), (1.0, y0 + step)], color.filled())
    }))?;

    Ok(())
}
