//! Export evaluated curves to CSV and arbitrary serializable values to JSON.
//!
//! The CSV is meant to be easy to consume in spreadsheets or downstream scripts:
//! one row per `(model, z)`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::domain::ModelCurve;
use crate::error::AppError;

pub const CURVES_CSV_HEADER: &str = "model,z,h_km_s_mpc,dc_mpc,dl_mpc,mu_mag,dv_mpc,fs8";

/// Write every curve's points to a CSV file.
pub fn write_curves_csv(path: &Path, curves: &[ModelCurve]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    let mut out = BufWriter::new(file);
    write_curves_csv_to(&mut out, curves)?;
    out.flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))
}

/// Same as [`write_curves_csv`] but into any writer.
pub fn write_curves_csv_to<W: Write>(out: &mut W, curves: &[ModelCurve]) -> Result<(), AppError> {
    writeln!(out, "{CURVES_CSV_HEADER}")
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for curve in curves {
        for p in &curve.points {
            writeln!(
                out,
                "{},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6}",
                curve.model.id(),
                p.z,
                p.h,
                p.dc,
                p.dl,
                p.mu,
                p.dv,
                p.fs8,
            )
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
        }
    }

    Ok(())
}

/// Pretty-print `value` as JSON to `path`.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create JSON '{}': {e}", path.display())))?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, value)
        .map_err(|e| AppError::new(2, format!("Failed to write JSON '{}': {e}", path.display())))?;
    out.flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush JSON '{}': {e}", path.display())))
}

/// Pretty JSON as a string (for stdout).
pub fn to_json_string<T: Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(|e| AppError::new(2, format!("Failed to serialize JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CurvePoint, ModelKind, ModelParameters};

    fn curve(model: ModelKind) -> ModelCurve {
        ModelCurve {
            model,
            parameters: ModelParameters::baseline(67.8, 0.315, 0.811),
            gamma: 0.55,
            points: vec![
                CurvePoint {
                    z: 0.1,
                    h: 70.5,
                    dc: 430.0,
                    dl: 473.0,
                    mu: 38.37,
                    dv: 445.0,
                    fs8: 0.47,
                },
                CurvePoint {
                    z: 0.2,
                    h: 73.6,
                    dc: 840.0,
                    dl: 1008.0,
                    mu: 40.02,
                    dv: 870.0,
                    fs8: 0.475,
                },
            ],
        }
    }

    #[test]
    fn csv_has_one_row_per_model_and_redshift() {
        let mut buf = Vec::new();
        write_curves_csv_to(&mut buf, &[curve(ModelKind::Baseline), curve(ModelKind::Interacting)]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], CURVES_CSV_HEADER);
        assert!(lines[1].starts_with("lcdm,0.100000,70.500000,"));
        assert!(lines[4].starts_with("dut,0.200000,"));
        assert_eq!(lines[4].split(',').count(), 8);
    }

    #[test]
    fn csv_file_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("curves.csv");
        write_curves_csv(&path, &[curve(ModelKind::Baseline)]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 3);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn json_write_failure_is_reported() {
        let err = write_json(Path::new("/dev/full"), &vec![1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn json_file_holds_the_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("v.json");
        write_json(&path, &vec![1.0, 2.0]).unwrap();
        let back: Vec<f64> = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, vec![1.0, 2.0]);
    }

    #[test]
    fn unwritable_path_is_exit_code_2() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("curves.csv");
        let err = write_curves_csv(&path, &[]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
