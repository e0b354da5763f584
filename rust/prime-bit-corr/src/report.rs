//! Trend fitting and scatter-plot rendering for sample series.

use std::error::Error;
use std::path::Path;

use plotters::prelude::*;
use serde::Serialize;

use crate::error::ReportError;

/// Least-squares line through a point series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LinearFit {
    Line { slope: f64, intercept: f64 },
    /// Every x is equal; the slope is infinite.
    Vertical { x: f64 },
}

impl LinearFit {
    pub fn slope(&self) -> f64 {
        match *self {
            LinearFit::Line { slope, .. } => slope,
            LinearFit::Vertical { .. } => f64::INFINITY,
        }
    }

    pub fn intercept(&self) -> f64 {
        match *self {
            LinearFit::Line { intercept, .. } => intercept,
            LinearFit::Vertical { .. } => 0.0,
        }
    }
}

/// Drop points with a NaN or infinite coordinate. Returns the kept points
/// and how many were dropped.
pub fn finite_points(points: &[(f64, f64)]) -> (Vec<(f64, f64)>, usize) {
    let kept: Vec<(f64, f64)> = points
        .iter()
        .copied()
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect();
    let dropped = points.len() - kept.len();
    (kept, dropped)
}

/// Simple OLS linear regression on (x, y) pairs.
pub fn linear_regression(pts: &[(f64, f64)]) -> Result<LinearFit, ReportError> {
    if pts.is_empty() {
        return Err(ReportError::NoPoints);
    }
    let n = pts.len() as f64;
    let sx: f64 = pts.iter().map(|p| p.0).sum();
    let sy: f64 = pts.iter().map(|p| p.1).sum();
    let sxx: f64 = pts.iter().map(|p| p.0 * p.0).sum();
    let sxy: f64 = pts.iter().map(|p| p.0 * p.1).sum();

    let denom = n * sxx - sx * sx;
    if denom == 0.0 {
        return Ok(LinearFit::Vertical { x: pts[0].0 });
    }

    let slope = (n * sxy - sx * sy) / denom;
    let intercept = (sy - slope * sx) / n;
    Ok(LinearFit::Line { slope, intercept })
}

/// Labels and geometry of a scatter plot.
#[derive(Debug, Clone)]
pub struct ScatterStyle {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Square canvas side, in pixels.
    pub size: u32,
    pub radius: u32,
}

impl ScatterStyle {
    pub fn new(title: &str, x_label: &str, y_label: &str) -> Self {
        Self {
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            size: 768,
            radius: 1,
        }
    }
}

fn padded_range(values: impl Iterator<Item = f64>) -> std::ops::Range<f64> {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    let pad = if hi > lo { (hi - lo) * 0.05 } else { 1.0 };
    (lo - pad)..(hi + pad)
}

/// Render `points` as a PNG scatter plot at `path`.
///
/// Non-finite points are skipped; a series with nothing left to draw is an
/// error.
pub fn render_scatter(
    path: &Path,
    style: &ScatterStyle,
    points: &[(f64, f64)],
) -> Result<(), ReportError> {
    let (points, dropped) = finite_points(points);
    if dropped > 0 {
        log::warn!("{}: skipping {} non-finite points", path.display(), dropped);
    }
    if points.is_empty() {
        return Err(ReportError::NoPoints);
    }
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }

    draw_scatter(path, style, &points).map_err(|e| ReportError::Render {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    log::info!("wrote {} ({} points)", path.display(), points.len());
    Ok(())
}

fn draw_scatter(
    path: &Path,
    style: &ScatterStyle,
    points: &[(f64, f64)],
) -> Result<(), Box<dyn Error>> {
    let x_range = padded_range(points.iter().map(|p| p.0));
    let y_range = padded_range(points.iter().map(|p| p.1));

    let root = BitMapBackend::new(path, (style.size, style.size)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&style.title, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc(style.x_label.as_str())
        .y_desc(style.y_label.as_str())
        .draw()?;

    let radius = style.radius as i32;
    chart.draw_series(
        points
            .iter()
            .map(|&(x, y)| Circle::new((x, y), radius, BLACK.filled())),
    )?;

    root.present()?;
    Ok(())
}
