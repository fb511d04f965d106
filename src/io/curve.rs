//! Read/write curve JSON files.
//!
//! Curve JSON is the portable representation of an evaluation run:
//! - generating tool + timestamp + grid resolution
//! - per model: parameters, growth index, and the evaluated points
//!
//! The schema is defined by `domain::CurveFile`.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::Utc;

use crate::domain::{CurveFile, ModelCurve};
use crate::error::AppError;
use crate::io::export::write_json;

/// Wrap evaluated curves with run metadata.
pub fn curve_file(curves: Vec<ModelCurve>, grid_points: usize) -> CurveFile {
    CurveFile {
        tool: format!("cosmo {}", env!("CARGO_PKG_VERSION")),
        generated_at: Utc::now(),
        grid_points,
        curves,
    }
}

/// Write a curve JSON file.
pub fn write_curve_json(path: &Path, file: &CurveFile) -> Result<(), AppError> {
    write_json(path, file)
}

/// Read a curve JSON file.
pub fn read_curve_json(path: &Path) -> Result<CurveFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open curve JSON '{}': {e}", path.display())))?;
    let curve: CurveFile = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| AppError::new(2, format!("Invalid curve JSON: {e}")))?;
    if curve.curves.is_empty() {
        return Err(AppError::new(2, format!("Curve JSON '{}' holds no curves", path.display())));
    }
    Ok(curve)
}
