//! SVG figures for the lessons.
//!
//! Figures are written to files instead of opening a window, so rendering
//! never blocks. Only the SVG backend is compiled in; text is emitted as SVG
//! `<text>` elements and needs no system fonts.

use crate::dataset::Dataset;
use crate::error::{LinearLabError, Result};
use crate::experiment::{PolynomialModel, Regime, SweepReport};
use crate::metrics::Evaluation;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

/// File name of the scatter plot of the generated data.
pub const DATASET_FIGURE: &str = "simple_example.svg";
/// File name of the grid of full-data fits.
pub const IN_SAMPLE_FIGURE: &str = "overfitting_in_sample.svg";
/// File name of the grid of train/test fits.
pub const GENERALIZATION_FIGURE: &str = "overfitting_generalization.svg";

const CURVE_POINTS: usize = 200;

fn to_plot_error<E: std::fmt::Display>(err: E) -> LinearLabError {
    LinearLabError::Plot(err.to_string())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// `[lo, hi]` widened by 5% on both ends; a flat range is widened by one.
fn padded((lo, hi): (f64, f64)) -> (f64, f64) {
    let span = hi - lo;
    if span <= 0.0 {
        return (lo - 1.0, hi + 1.0);
    }
    (lo - 0.05 * span, hi + 0.05 * span)
}

/// Scatter plot of `data` with the legend `y = x + ε`.
pub fn plot_dataset<P: AsRef<Path>>(data: &Dataset, path: P) -> Result<()> {
    let path = path.as_ref();
    let (x_range, y_range) = data
        .x_range()
        .zip(data.y_range())
        .ok_or_else(|| LinearLabError::EmptyData("nothing to plot".to_string()))?;
    ensure_parent(path)?;

    let (x_lo, x_hi) = padded((x_range.0.min(10.0), x_range.1.max(30.0)));
    let (y_lo, y_hi) = padded((y_range.0.min(10.0), y_range.1.max(30.0)));

    let root = SVGBackend::new(path, (480, 480)).into_drawing_area();
    root.fill(&WHITE).map_err(to_plot_error)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(15)
        .x_label_area_size(35)
        .y_label_area_size(40)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)
        .map_err(to_plot_error)?;

    chart
        .configure_mesh()
        .x_labels(5)
        .y_labels(5)
        .x_label_formatter(&|v| format!("{:.0}", v))
        .y_label_formatter(&|v| format!("{:.0}", v))
        .x_desc("x")
        .y_desc("y")
        .draw()
        .map_err(to_plot_error)?;

    chart
        .draw_series(
            data.observations()
                .iter()
                .map(|o| Circle::new((o.x, o.y), 4, BLUE.filled())),
        )
        .map_err(to_plot_error)?
        .label("y = x + ε")
        .legend(|(x, y)| Circle::new((x, y), 4, BLUE.filled()));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(to_plot_error)?;

    root.present().map_err(to_plot_error)?;
    log::info!("wrote {}", path.display());
    Ok(())
}

/// 2×2 grid with one panel per degree of `report` for the given regime.
///
/// Every panel shows all of `data` as points and the model as a red curve
/// over a dense grid spanning the data, annotated with its evaluation.
pub fn plot_sweep<P: AsRef<Path>>(
    data: &Dataset,
    report: &SweepReport,
    regime: Regime,
    path: P,
) -> Result<()> {
    let path = path.as_ref();
    if report.entries.is_empty() {
        return Err(LinearLabError::EmptyData("sweep has no entries".to_string()));
    }
    ensure_parent(path)?;

    let root = SVGBackend::new(path, (800, 800)).into_drawing_area();
    root.fill(&WHITE).map_err(to_plot_error)?;
    let root = root
        .titled(regime.title(), ("sans-serif", 20))
        .map_err(to_plot_error)?;

    let panels = root.split_evenly((2, 2));
    for (entry, panel) in report.entries.iter().zip(panels.iter()) {
        let caption = format!("degree {}", entry.degree);
        draw_panel(
            panel,
            data,
            entry.model(regime),
            entry.evaluation(regime),
            &caption,
        )?;
    }
    if report.entries.len() > panels.len() {
        log::warn!(
            "{} degrees swept, only the first {} are drawn",
            report.entries.len(),
            panels.len()
        );
    }

    root.present().map_err(to_plot_error)?;
    log::info!("wrote {}", path.display());
    Ok(())
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    data: &Dataset,
    model: &PolynomialModel,
    evaluation: Evaluation,
    caption: &str,
) -> Result<()> {
    let (x_range, y_range) = data
        .x_range()
        .zip(data.y_range())
        .ok_or_else(|| LinearLabError::EmptyData("nothing to plot".to_string()))?;

    let grid: Vec<f64> = (0..CURVE_POINTS)
        .map(|i| x_range.0 + (x_range.1 - x_range.0) * i as f64 / (CURVE_POINTS - 1) as f64)
        .collect();
    let curve: Vec<(f64, f64)> = grid
        .iter()
        .copied()
        .zip(model.predict_xs(&grid)?)
        .filter(|(_, y)| y.is_finite())
        .collect();

    let y_bounds = curve
        .iter()
        .fold(y_range, |(lo, hi), &(_, y)| (lo.min(y), hi.max(y)));
    let (x_lo, x_hi) = padded(x_range);
    let (y_lo, y_hi) = padded(y_bounds);

    let mut chart = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", 16))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)
        .map_err(to_plot_error)?;

    chart.configure_mesh().draw().map_err(to_plot_error)?;

    chart
        .draw_series(
            data.observations()
                .iter()
                .map(|o| Circle::new((o.x, o.y), 3, BLUE.filled())),
        )
        .map_err(to_plot_error)?;
    chart
        .draw_series(LineSeries::new(curve, RED.stroke_width(2)))
        .map_err(to_plot_error)?;

    let style = ("sans-serif", 15)
        .into_font()
        .style(FontStyle::Italic)
        .color(&MAGENTA);
    let plotting = chart.plotting_area().strip_coord_spec();
    plotting
        .draw_text(&format!("mse: {:.3}", evaluation.mse), &style, (6, 6))
        .map_err(to_plot_error)?;
    plotting
        .draw_text(&format!("R2: {:.3}", evaluation.r_squared), &style, (6, 24))
        .map_err(to_plot_error)?;
    Ok(())
}
