//! ASCII/Unicode plotting for terminal output.
//!
//! Fixed-size character grid with deterministic output, so plots can be checked
//! against golden snapshots.
//!
//! Plot elements:
//! - ΛCDM curve: `-`
//! - DUT curve: `~`
//! - observed data points: `o`

use crate::data::Dataset;
use crate::domain::{CurveFile, ModelCurve, ModelKind, Observable};

/// Plot one observable for every curve, optionally overlaying the matching dataset.
///
/// Data points outside the curves' redshift span are dropped so the x-axis follows
/// the evaluated range.
pub fn render_comparison_plot(
    curves: &[ModelCurve],
    observable: Observable,
    data: Option<&Dataset>,
    width: usize,
    height: usize,
) -> String {
    let series: Vec<(ModelKind, Vec<(f64, f64)>)> = curves
        .iter()
        .map(|c| {
            let pts = c.points.iter().map(|p| (p.z, observable.select(p))).collect();
            (c.model, pts)
        })
        .collect();

    let (z_min, z_max) = z_range(&series).unwrap_or((0.0, 1.0));
    let overlay: Vec<(f64, f64)> = data
        .map(|ds| {
            ds.points()
                .filter(|(z, _, _)| *z >= z_min && *z <= z_max)
                .map(|(z, v, _)| (z, v))
                .collect()
        })
        .unwrap_or_default();

    let mut out = render_plot(&series, &overlay, observable, z_min, z_max, width, height);
    out.push_str(&legend(&series, data.filter(|_| !overlay.is_empty())));
    out
}

/// Plot a previously exported curve file (curves only).
pub fn render_plot_from_curve_file(
    file: &CurveFile,
    observable: Observable,
    data: Option<&Dataset>,
    width: usize,
    height: usize,
) -> String {
    render_comparison_plot(&file.curves, observable, data, width, height)
}

fn render_plot(
    series: &[(ModelKind, Vec<(f64, f64)>)],
    overlay: &[(f64, f64)],
    observable: Observable,
    z_min: f64,
    z_max: f64,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (y_min, y_max) = y_range(series, overlay).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Curves first so data points overlay them.
    for (kind, pts) in series {
        draw_curve(&mut grid, pts, series_char(*kind), z_min, z_max, y_min, y_max);
    }

    for &(z, v) in overlay {
        let x = map_x(z, z_min, z_max, width);
        let y = map_y(v, y_min, y_max, height);
        grid[y][x] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: {} | z=[{z_min:.3}, {z_max:.3}] | y=[{y_min:.2}, {y_max:.2}]\n",
        observable.label()
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn series_char(kind: ModelKind) -> char {
    match kind {
        ModelKind::Baseline => '-',
        ModelKind::Interacting => '~',
    }
}

fn legend(series: &[(ModelKind, Vec<(f64, f64)>)], data: Option<&Dataset>) -> String {
    let mut parts: Vec<String> = series
        .iter()
        .map(|(kind, _)| format!("{} {}", series_char(*kind), kind.display_name()))
        .collect();
    if let Some(ds) = data {
        parts.push(format!("o {}", ds.probe));
    }
    format!("Legend: {}\n", parts.join(" | "))
}

fn z_range(series: &[(ModelKind, Vec<(f64, f64)>)]) -> Option<(f64, f64)> {
    let mut min_z = f64::INFINITY;
    let mut max_z = f64::NEG_INFINITY;
    for (_, pts) in series {
        for &(z, _) in pts {
            min_z = min_z.min(z);
            max_z = max_z.max(z);
        }
    }
    if min_z.is_finite() && max_z.is_finite() && max_z > min_z {
        Some((min_z, max_z))
    } else {
        None
    }
}

fn y_range(series: &[(ModelKind, Vec<(f64, f64)>)], overlay: &[(f64, f64)]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    let all = series.iter().flat_map(|(_, pts)| pts.iter()).chain(overlay.iter());
    for &(_, y) in all {
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }

    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(z: f64, z_min: f64, z_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((z - z_min) / (z_max - z_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y_max maps to row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(
    grid: &mut [Vec<char>],
    curve: &[(f64, f64)],
    ch: char,
    z_min: f64,
    z_max: f64,
    y_min: f64,
    y_max: f64,
) {
    if curve.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(z, y) in curve {
        let x = map_x(z, z_min, z_max, width);
        let yy = map_y(y, y_min, y_max, height);
        if let Some((x0, y0)) = prev {
            draw_line(grid, x0, y0, x, yy, ch);
        } else if grid[yy][x] == ' ' {
            grid[yy][x] = ch;
        }
        prev = Some((x, yy));
    }
}

/// Integer line drawing (Bresenham). Never overwrites an occupied cell.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
