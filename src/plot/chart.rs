//! PNG line plot of a monthly capacity-factor series.

use std::error::Error;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use plotters::prelude::*;
use tracing::debug;

use crate::error::{PipelineError, Result};

use super::series::Selection;

/// Figure width in pixels.
pub const WIDTH: u32 = 1200;
/// Figure height in pixels.
pub const HEIGHT: u32 = 600;
/// Fixed y-axis upper bound.
pub const Y_MAX: f64 = 1.1;

const LINE_COLOR: RGBColor = RGBColor(31, 119, 180);
const MARKER_SIZE: u32 = 4;

fn month_index(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month0() as i32
}

/// `%Y-%m` label of the month nearest to an x coordinate.
pub fn month_label(x: f64) -> String {
    let idx = x.round() as i32;
    NaiveDate::from_ymd_opt(idx.div_euclid(12), idx.rem_euclid(12) as u32 + 1, 1)
        .map(|d| d.format("%Y-%m").to_string())
        .unwrap_or_default()
}

/// X range spanning the series' months with half a month of padding.
pub fn x_range(points: &[(NaiveDate, f64)]) -> Range<f64> {
    let lo = points.first().map_or(0, |&(d, _)| month_index(d));
    let hi = points.last().map_or(lo, |&(d, _)| month_index(d));
    f64::from(lo) - 0.5..f64::from(hi) + 0.5
}

/// Series points in chart coordinates, values clamped to the y range.
pub fn chart_points(points: &[(NaiveDate, f64)]) -> Vec<(f64, f64)> {
    points
        .iter()
        .map(|&(d, v)| (f64::from(month_index(d)), v.clamp(0.0, Y_MAX)))
        .collect()
}

/// Draws the figure into a bitmap at `path`.
///
/// With `labelled` unset no text is drawn, so no font is needed.
fn draw(
    path: &Path,
    selection: &Selection,
    points: &[(NaiveDate, f64)],
    labelled: bool,
) -> std::result::Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut builder = ChartBuilder::on(&root);
    builder.margin(20);
    if labelled {
        builder
            .caption(selection.title(), ("sans-serif", 28))
            .x_label_area_size(50)
            .y_label_area_size(70);
    }
    let mut chart = builder.build_cartesian_2d(x_range(points), 0f64..Y_MAX)?;

    let x_fmt = |x: &f64| month_label(*x);
    let y_fmt = |y: &f64| format!("{y:.1}");
    {
        let mut mesh = chart.configure_mesh();
        if labelled {
            mesh.x_desc("Date")
                .y_desc("Capacity Factor")
                .x_label_formatter(&x_fmt)
                .y_label_formatter(&y_fmt);
        } else {
            mesh.x_labels(0).y_labels(0);
        }
        mesh.draw()?;
    }

    let data = chart_points(points);
    chart.draw_series(LineSeries::new(data.iter().copied(), &LINE_COLOR))?;
    chart.draw_series(
        data.iter()
            .map(|&p| Circle::new(p, MARKER_SIZE, LINE_COLOR.filled())),
    )?;
    root.present()?;
    Ok(())
}

/// Renders the selection as a PNG into `dir`.
///
/// Returns the written path, named by [`Selection::file_name`]. When text
/// cannot be rendered (no usable system font) the figure is saved without
/// caption and labels.
///
/// # Errors
///
/// Returns [`PipelineError::Write`] if the directory cannot be created and
/// [`PipelineError::Plot`] if the figure cannot be drawn.
pub fn save_plot(dir: &Path, selection: &Selection, points: &[(NaiveDate, f64)]) -> Result<PathBuf> {
    fs::create_dir_all(dir).map_err(|source| PipelineError::Write {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(selection.file_name());

    if let Err(e) = draw(&path, selection, points, true) {
        debug!(error = %e, "plot text rendering failed, saving without labels");
        draw(&path, selection, points, false).map_err(|e| PipelineError::Plot {
            path: path.clone(),
            message: e.to_string(),
        })?;
    }
    debug!(path = %path.display(), points = points.len(), "saved plot");
    Ok(path)
}
