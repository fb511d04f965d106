//! Redshift grid construction.
//!
//! The grid is `z = 0` followed by `n - 1` log-spaced points in `[1e-3, 5]`:
//!
//! - log spacing concentrates resolution at low redshift, where the
//!   distance-modulus sample is densest and `Dc(z)` is nearly linear in `z`
//! - the explicit `z = 0` anchor makes `Dc(0) = 0` and `H(0) = H0` table values
//!   rather than extrapolations
//!
//! The grid is built once at process start and shared read-only (`Arc`) by every
//! `ExpansionHistory`.

use std::sync::Arc;

use crate::error::{CosmoError, CosmoResult};
use crate::math::log_space;

/// Default number of grid points (including the `z = 0` anchor).
pub const DEFAULT_GRID_POINTS: usize = 1000;

/// Smallest non-zero redshift on the default grid.
pub const Z_LOG_MIN: f64 = 1e-3;

/// Upper redshift bound of the default grid.
pub const Z_MAX: f64 = 5.0;

const MIN_GRID_POINTS: usize = 3;

#[derive(Debug, Clone)]
pub struct RedshiftGrid {
    z: Arc<[f64]>,
}

impl RedshiftGrid {
    /// Build the default layout with `n_points` total points.
    pub fn new(n_points: usize) -> CosmoResult<Self> {
        if n_points < MIN_GRID_POINTS {
            return Err(CosmoError::InvalidGrid {
                reason: format!("need at least {MIN_GRID_POINTS} points, got {n_points}"),
            });
        }

        let mut z = Vec::with_capacity(n_points);
        z.push(0.0);
        z.extend(log_space(Z_LOG_MIN, Z_MAX, n_points - 1)?);
        Self::from_values(z)
    }

    /// Wrap caller-provided redshifts.
    ///
    /// Values must be finite, non-negative, and strictly increasing.
    pub fn from_values(z: Vec<f64>) -> CosmoResult<Self> {
        if z.len() < MIN_GRID_POINTS {
            return Err(CosmoError::InvalidGrid {
                reason: format!("need at least {MIN_GRID_POINTS} points, got {}", z.len()),
            });
        }
        if let Some(idx) = z.iter().position(|v| !v.is_finite() || *v < 0.0) {
            return Err(CosmoError::InvalidGrid {
                reason: format!("z[{idx}]={} is negative or not finite", z[idx]),
            });
        }
        if let Some(idx) = z.windows(2).position(|w| w[1] <= w[0]) {
            return Err(CosmoError::InvalidGrid {
                reason: format!("not strictly increasing at index {}", idx + 1),
            });
        }
        Ok(Self { z: Arc::from(z) })
    }

    pub fn len(&self) -> usize {
        self.z.len()
    }

    pub fn is_empty(&self) -> bool {
        self.z.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.z
    }

    /// Shared handle to the knots, for interpolators that close over the grid.
    pub fn shared(&self) -> Arc<[f64]> {
        Arc::clone(&self.z)
    }

    pub fn z_min(&self) -> f64 {
        self.z[0]
    }

    pub fn z_max(&self) -> f64 {
        self.z[self.z.len() - 1]
    }

    pub fn contains(&self, z: f64) -> bool {
        z >= self.z_min() && z <= self.z_max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_is_anchored_and_increasing() {
        let grid = RedshiftGrid::new(DEFAULT_GRID_POINTS).unwrap();
        assert_eq!(grid.len(), DEFAULT_GRID_POINTS);
        assert_eq!(grid.z_min(), 0.0);
        assert_eq!(grid.values()[1], Z_LOG_MIN);
        assert_eq!(grid.z_max(), Z_MAX);
        assert!(grid.values().windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn rejects_degenerate_grids() {
        assert!(RedshiftGrid::new(2).is_err());
        assert!(RedshiftGrid::from_values(vec![0.0, 0.5, 0.5]).is_err());
        assert!(RedshiftGrid::from_values(vec![-0.1, 0.5, 1.0]).is_err());
        assert!(RedshiftGrid::from_values(vec![0.0, 0.5, f64::INFINITY]).is_err());
    }

    #[test]
    fn shared_handle_points_at_same_knots() {
        let grid = RedshiftGrid::new(10).unwrap();
        let knots = grid.shared();
        assert_eq!(&knots[..], grid.values());
        assert!(grid.contains(2.0));
        assert!(!grid.contains(5.5));
    }
}
