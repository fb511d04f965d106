//! Point-spacing helpers shared by the redshift grid and the evaluation pipeline.

use crate::error::{CosmoError, CosmoResult};

/// Generate `steps` log-spaced points between `min` and `max` (inclusive).
pub fn log_space(min: f64, max: f64, steps: usize) -> CosmoResult<Vec<f64>> {
    if !(min.is_finite() && max.is_finite() && min > 0.0 && max > 0.0 && max > min) {
        return Err(CosmoError::InvalidRange {
            reason: format!("log range min={min}, max={max} (must be finite, >0, and max>min)"),
        });
    }
    if steps < 2 {
        return Err(CosmoError::InvalidRange {
            reason: "log-spaced range needs at least 2 steps".to_string(),
        });
    }

    let ln_min = min.ln();
    let ln_max = max.ln();
    let step = (ln_max - ln_min) / (steps as f64 - 1.0);

    let mut out = Vec::with_capacity(steps);
    for i in 0..steps {
        out.push((ln_min + step * i as f64).exp());
    }
    // Pin the endpoints; exp(ln(x)) is not always exactly x.
    out[0] = min;
    out[steps - 1] = max;
    Ok(out)
}

/// Generate `steps` evenly spaced points between `min` and `max` (inclusive).
///
/// A single step yields `[min]`.
pub fn lin_space(min: f64, max: f64, steps: usize) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![min],
        _ => {
            let span = max - min;
            let denom = steps as f64 - 1.0;
            (0..steps)
                .map(|i| if i + 1 == steps { max } else { min + span * (i as f64 / denom) })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_space_includes_endpoints() {
        let v = log_space(1e-3, 5.0, 5).unwrap();
        assert_eq!(v[0], 1e-3);
        assert_eq!(v[v.len() - 1], 5.0);
        assert!(v.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn log_space_rejects_non_positive_min() {
        assert!(log_space(0.0, 5.0, 10).is_err());
        assert!(log_space(1.0, 1.0, 10).is_err());
        assert!(log_space(0.1, 1.0, 1).is_err());
    }

    #[test]
    fn lin_space_matches_endpoints_and_count() {
        let v = lin_space(0.01, 2.5, 100);
        assert_eq!(v.len(), 100);
        assert_eq!(v[0], 0.01);
        assert_eq!(v[99], 2.5);
        assert_eq!(lin_space(0.3, 0.9, 1), vec![0.3]);
        assert!(lin_space(0.3, 0.9, 0).is_empty());
    }
}
