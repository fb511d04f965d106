//! Cumulative quadrature on a tabulated grid.

use crate::error::{CosmoError, CosmoResult};

/// Cumulative trapezoid rule over `(x, y)` samples with a zero initial value.
///
/// `out[0] == 0.0` exactly and `out[i] = Σ_{k<i} (x[k+1]-x[k]) * (y[k]+y[k+1]) / 2`.
/// For a non-negative integrand on an increasing grid the result is non-decreasing.
/// Mismatched lengths are an `InvalidGrid` error.
pub fn cumulative_trapezoid(x: &[f64], y: &[f64]) -> CosmoResult<Vec<f64>> {
    if x.len() != y.len() {
        return Err(CosmoError::InvalidGrid {
            reason: format!("sample/value length mismatch ({} vs {})", x.len(), y.len()),
        });
    }
    let mut out = Vec::with_capacity(x.len());
    if x.is_empty() {
        return Ok(out);
    }

    let mut acc = 0.0;
    out.push(acc);
    for k in 1..x.len() {
        acc += 0.5 * (x[k] - x[k - 1]) * (y[k] + y[k - 1]);
        out.push(acc);
    }
    Ok(out)
}
