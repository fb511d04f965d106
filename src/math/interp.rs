//! Shape-preserving piecewise-cubic Hermite interpolation (PCHIP).
//!
//! Node slopes follow Fritsch–Carlson with the weighted harmonic mean used by
//! most numerical libraries:
//!
//! - interior node `k`: `d_k = 0` when the adjacent secant slopes differ in sign (or
//!   either is zero), otherwise
//!   `(w1 + w2) / d_k = w1 / δ_{k-1} + w2 / δ_k` with `w1 = 2h_k + h_{k-1}`,
//!   `w2 = h_k + 2h_{k-1}`
//! - end nodes: non-centred three-point formula, clipped so the end slope keeps
//!   the sign of the first secant and never exceeds `3δ`
//!
//! With these slopes the interpolant is monotone on every interval where the data
//! are monotone, so it cannot overshoot a monotone table.
//!
//! Lookup is a binary search over the knots, so evaluation is `O(log n)`.

use std::sync::Arc;

use crate::error::{CosmoError, CosmoResult};

/// Behaviour outside `[x_first, x_last]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extrapolation {
    /// Out-of-range queries fail with `CosmoError::InterpolationDomain`.
    Forbid,
    /// Extend linearly using the end-node slope (C¹ at the boundary).
    Linear,
}

#[derive(Debug, Clone)]
pub struct Pchip {
    x: Arc<[f64]>,
    y: Vec<f64>,
    slopes: Vec<f64>,
    extrapolation: Extrapolation,
}

impl Pchip {
    /// Build an interpolant over shared knots `x` and values `y`.
    ///
    /// Requires at least two knots, strictly increasing finite `x`, and finite `y`.
    pub fn new(x: Arc<[f64]>, y: Vec<f64>, extrapolation: Extrapolation) -> CosmoResult<Self> {
        if x.len() != y.len() {
            return Err(CosmoError::InvalidGrid {
                reason: format!("knot/value length mismatch ({} vs {})", x.len(), y.len()),
            });
        }
        if x.len() < 2 {
            return Err(CosmoError::InvalidGrid {
                reason: "interpolation needs at least 2 knots".to_string(),
            });
        }
        if x.iter().any(|v| !v.is_finite()) || x.windows(2).any(|w| w[1] <= w[0]) {
            return Err(CosmoError::InvalidGrid {
                reason: "knots must be finite and strictly increasing".to_string(),
            });
        }
        if let Some(idx) = y.iter().position(|v| !v.is_finite()) {
            return Err(CosmoError::InvalidGrid {
                reason: format!("non-finite value at knot {idx} (x={})", x[idx]),
            });
        }

        let slopes = pchip_slopes(&x, &y);
        Ok(Self {
            x,
            y,
            slopes,
            extrapolation,
        })
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.x[0], self.x[self.x.len() - 1])
    }

    pub fn knots(&self) -> &[f64] {
        &self.x
    }

    pub fn values(&self) -> &[f64] {
        &self.y
    }

    pub fn extrapolation(&self) -> Extrapolation {
        self.extrapolation
    }

    /// Evaluate the interpolant at `x`.
    pub fn eval(&self, x: f64) -> CosmoResult<f64> {
        let (lo, hi) = self.domain();
        if !x.is_finite() {
            return Err(CosmoError::InterpolationDomain { z: x, min: lo, max: hi });
        }

        let n = self.x.len();
        if x < lo || x > hi {
            return match self.extrapolation {
                Extrapolation::Forbid => Err(CosmoError::InterpolationDomain { z: x, min: lo, max: hi }),
                Extrapolation::Linear if x < lo => Ok(self.y[0] + self.slopes[0] * (x - lo)),
                Extrapolation::Linear => Ok(self.y[n - 1] + self.slopes[n - 1] * (x - hi)),
            };
        }

        // First knot strictly greater than x, minus one; clamp onto the last interval.
        let k = self.x.partition_point(|&xi| xi <= x).saturating_sub(1).min(n - 2);
        Ok(self.hermite(k, x))
    }

    /// Evaluate at many points; fails on the first out-of-domain query.
    pub fn eval_many(&self, xs: &[f64]) -> CosmoResult<Vec<f64>> {
        xs.iter().map(|&x| self.eval(x)).collect()
    }

    fn hermite(&self, k: usize, x: f64) -> f64 {
        let x0 = self.x[k];
        let h = self.x[k + 1] - x0;
        let t = (x - x0) / h;
        let t2 = t * t;
        let one_minus = 1.0 - t;

        let h00 = (1.0 + 2.0 * t) * one_minus * one_minus;
        let h10 = t * one_minus * one_minus;
        let h01 = t2 * (3.0 - 2.0 * t);
        let h11 = t2 * (t - 1.0);

        h00 * self.y[k] + h10 * h * self.slopes[k] + h01 * self.y[k + 1] + h11 * h * self.slopes[k + 1]
    }
}

fn pchip_slopes(x: &[f64], y: &[f64]) -> Vec<f64> {
    let n = x.len();
    let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
    let delta: Vec<f64> = (0..n - 1).map(|k| (y[k + 1] - y[k]) / h[k]).collect();

    if n == 2 {
        return vec![delta[0], delta[0]];
    }

    let mut d = vec![0.0; n];
    for k in 1..n - 1 {
        let (d0, d1) = (delta[k - 1], delta[k]);
        if d0 * d1 <= 0.0 {
            continue;
        }
        let w1 = 2.0 * h[k] + h[k - 1];
        let w2 = h[k] + 2.0 * h[k - 1];
        d[k] = (w1 + w2) / (w1 / d0 + w2 / d1);
    }

    d[0] = end_slope(h[0], h[1], delta[0], delta[1]);
    d[n - 1] = end_slope(h[n - 2], h[n - 3], delta[n - 2], delta[n - 3]);
    d
}

fn end_slope(h0: f64, h1: f64, m0: f64, m1: f64) -> f64 {
    let d = ((2.0 * h0 + h1) * m0 - h0 * m1) / (h0 + h1);
    if d.signum() != m0.signum() || m0 == 0.0 {
        0.0
    } else if m0.signum() != m1.signum() && d.abs() > 3.0 * m0.abs() {
        3.0 * m0
    } else {
        d
    }
}
