//! Phenomenological structure-growth observable `fσ8(z)`.
//!
//! This is NOT a solution of the linear growth equation. It combines two standard
//! fitting-formula shortcuts:
//!
//! - growth rate `f(z) ≈ Ωm(z)^γ`
//! - growth suppression `D(z) ≈ Ωm(z)^(3/7)`
//!
//! so `fσ8(z) = Ωm(z)^γ · Ωm(z)^(3/7) · σ8`, with `Ωm(z) = Ωm / (a³ (H(z)/H0)²)`
//! read off the engine's cached `H(z)`.
//!
//! The growth indices (0.55 for the cosmological-constant model, 0.52 for the
//! interacting one) are fixed phenomenological choices, kept configurable.

use serde::{Deserialize, Serialize};

use crate::domain::ModelKind;
use crate::engine::ExpansionHistory;
use crate::error::{CosmoError, CosmoResult};

/// General-relativity growth index.
pub const GAMMA_BASELINE: f64 = 0.55;

/// Suppressed growth index used for the interacting model.
pub const GAMMA_INTERACTING: f64 = 0.52;

/// Exponent of the `D(z) ≈ Ωm(z)^p` approximation.
pub const GROWTH_SUPPRESSION_EXPONENT: f64 = 3.0 / 7.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthIndex {
    pub baseline: f64,
    pub interacting: f64,
    pub suppression_exponent: f64,
}

impl Default for GrowthIndex {
    fn default() -> Self {
        Self {
            baseline: GAMMA_BASELINE,
            interacting: GAMMA_INTERACTING,
            suppression_exponent: GROWTH_SUPPRESSION_EXPONENT,
        }
    }
}

impl GrowthIndex {
    pub fn gamma(&self, kind: ModelKind) -> f64 {
        match kind {
            ModelKind::Baseline => self.baseline,
            ModelKind::Interacting => self.interacting,
        }
    }
}

/// Redshift-dependent matter fraction `Ωm(z) = Ωm / (a³ E(z)²)`.
pub fn matter_fraction(history: &ExpansionHistory, z: f64) -> CosmoResult<f64> {
    let params = history.params();
    let a = 1.0 / (1.0 + z);
    let e = history.hubble(z)? / params.h0;
    let value = params.omega_m / (a.powi(3) * e * e);
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CosmoError::NonFiniteObservable {
            name: "omega_m(z)",
            z,
        })
    }
}

/// `fσ8(z) = Ωm(z)^γ · Ωm(z)^p · σ8`.
pub fn growth_rate_fs8(
    history: &ExpansionHistory,
    gamma: f64,
    suppression_exponent: f64,
    z: f64,
) -> CosmoResult<f64> {
    let om_z = matter_fraction(history, z)?;
    let value = om_z.powf(gamma) * om_z.powf(suppression_exponent) * history.params().sigma8;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CosmoError::NonFiniteObservable { name: "fs8", z })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::ModelParameters;
    use crate::grid::{DEFAULT_GRID_POINTS, RedshiftGrid};

    fn history(params: ModelParameters) -> ExpansionHistory {
        let grid = Arc::new(RedshiftGrid::new(DEFAULT_GRID_POINTS).unwrap());
        ExpansionHistory::new(params, grid).unwrap()
    }

    #[test]
    fn baseline_fs8_regression_at_z_038() {
        // Pinned from the closed form: Ωm(0.38) = 0.547210..., exponent 0.55 + 3/7.
        let eh = history(ModelParameters::baseline(67.8, 0.315, 0.811));
        let fs8 = growth_rate_fs8(&eh, GAMMA_BASELINE, GROWTH_SUPPRESSION_EXPONENT, 0.38).unwrap();
        assert!((fs8 - 0.44956).abs() < 1e-4, "fs8(0.38) = {fs8}");
    }

    #[test]
    fn matter_fraction_is_omega_m_today_and_grows() {
        let eh = history(ModelParameters::baseline(67.8, 0.315, 0.811));
        assert!((matter_fraction(&eh, 0.0).unwrap() - 0.315).abs() < 1e-12);
        let high = matter_fraction(&eh, 3.0).unwrap();
        assert!(high > 0.9 && high < 1.0, "omega_m(3) = {high}");
    }

    #[test]
    fn lower_gamma_raises_fs8_when_matter_fraction_below_one() {
        let eh = history(ModelParameters::baseline(67.8, 0.315, 0.811));
        let a = growth_rate_fs8(&eh, GAMMA_BASELINE, GROWTH_SUPPRESSION_EXPONENT, 0.5).unwrap();
        let b = growth_rate_fs8(&eh, GAMMA_INTERACTING, GROWTH_SUPPRESSION_EXPONENT, 0.5).unwrap();
        assert!(b > a);
    }

    #[test]
    fn zero_sigma8_gives_zero_growth() {
        let eh = history(ModelParameters::baseline(67.8, 0.315, 0.0));
        assert_eq!(growth_rate_fs8(&eh, GAMMA_BASELINE, GROWTH_SUPPRESSION_EXPONENT, 1.0).unwrap(), 0.0);
    }

    #[test]
    fn default_growth_index_selects_by_kind() {
        let g = GrowthIndex::default();
        assert_eq!(g.gamma(ModelKind::Baseline), 0.55);
        assert_eq!(g.gamma(ModelKind::Interacting), 0.52);
    }
}
