//! Expansion-history engine.
//!
//! Given `ModelParameters` and the shared `RedshiftGrid`, construction:
//!
//! 1. evaluates `a = 1/(1+z)`, `w(a) = w0 + wa (1 - a)` and
//!    `ρ_DE(a) = a^(-3 (1 + w(a) + xi))` at every grid point
//! 2. tabulates `H(a) = H0 sqrt(Ωm / a³ + (1 - Ωm) ρ_DE(a))`
//! 3. integrates `1/H` with the cumulative trapezoid rule (`Dc(0) = 0`)
//! 4. builds three interpolators that live as long as the engine:
//!    comoving distance and luminosity distance (PCHIP, no extrapolation) and
//!    Hubble rate (PCHIP, linear extrapolation)
//!
//! Every later evaluation goes through the cached interpolators; nothing is
//! re-integrated per call.
//!
//! Numerical notes:
//! - The radicand is evaluated as `1 + Ωm (a⁻³ - 1) + (1 - Ωm)(ρ_DE - 1)`. This is the
//!   same quantity, but it is exactly `1` at `a = 1` (so `H(0) = H0` bit-for-bit)
//!   and avoids cancellation in `Ωm + (1 - Ωm)` at low redshift.
//! - A negative, zero, or non-finite radicand anywhere on the grid is a hard
//!   `InvalidParameters` failure; values are never clamped.

use std::sync::Arc;

use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::domain::ModelParameters;
use crate::error::{CosmoError, CosmoResult};
use crate::grid::RedshiftGrid;
use crate::math::{Extrapolation, Pchip, cumulative_trapezoid};

/// Speed of light in km/s.
pub const SPEED_OF_LIGHT_KM_S: f64 = 299_792.458;

/// Batch sizes above this are evaluated with rayon.
const PAR_THRESHOLD: usize = 512;

/// Raw engine output at one redshift.
///
/// `dc` is the unscaled integral `∫ dz/H` (Mpc per km/s); `dl` is in Mpc.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExpansionSample {
    pub z: f64,
    pub h: f64,
    pub dc: f64,
    pub dl: f64,
}

#[derive(Debug, Clone)]
pub struct ExpansionHistory {
    params: ModelParameters,
    grid: Arc<RedshiftGrid>,
    comoving: Pchip,
    luminosity: Pchip,
    hubble: Pchip,
}

impl ExpansionHistory {
    pub fn new(params: ModelParameters, grid: Arc<RedshiftGrid>) -> CosmoResult<Self> {
        params.validate()?;

        let z = grid.values();
        let mut hubble = Vec::with_capacity(z.len());
        for &zi in z {
            let a = 1.0 / (1.0 + zi);
            let e2 = e_squared(a, &params);
            if !(e2.is_finite() && e2 > 0.0) {
                return Err(CosmoError::invalid_parameters(format!(
                    "H(z)^2/H0^2 = {e2} at z={zi}; the expansion rate is undefined there"
                )));
            }
            hubble.push(params.h0 * e2.sqrt());
        }

        let inv_h: Vec<f64> = hubble.iter().map(|h| 1.0 / h).collect();
        let dc = cumulative_trapezoid(z, &inv_h)?;
        let dl: Vec<f64> = z
            .iter()
            .zip(&dc)
            .map(|(zi, d)| (1.0 + zi) * SPEED_OF_LIGHT_KM_S * d)
            .collect();

        let knots = grid.shared();
        let comoving = Pchip::new(Arc::clone(&knots), dc, Extrapolation::Forbid)?;
        let luminosity = Pchip::new(Arc::clone(&knots), dl, Extrapolation::Forbid)?;
        let hubble = Pchip::new(knots, hubble, Extrapolation::Linear)?;

        debug!(
            h0 = params.h0,
            omega_m = params.omega_m,
            w0 = params.w0,
            wa = params.wa,
            xi = params.xi,
            grid_points = grid.len(),
            "built expansion history"
        );

        Ok(Self {
            params,
            grid,
            comoving,
            luminosity,
            hubble,
        })
    }

    pub fn params(&self) -> &ModelParameters {
        &self.params
    }

    pub fn grid(&self) -> &RedshiftGrid {
        &self.grid
    }

    /// `H(z)` in km/s/Mpc. Extrapolates linearly outside the grid.
    pub fn hubble(&self, z: f64) -> CosmoResult<f64> {
        self.hubble.eval(z)
    }

    /// `∫₀^z dz'/H(z')`. Fails outside the grid.
    pub fn comoving(&self, z: f64) -> CosmoResult<f64> {
        self.comoving.eval(z)
    }

    /// Luminosity distance `(1+z) c Dc(z)` in Mpc. Fails outside the grid.
    pub fn luminosity_distance(&self, z: f64) -> CosmoResult<f64> {
        self.luminosity.eval(z)
    }

    pub fn evaluate(&self, z: f64) -> CosmoResult<ExpansionSample> {
        Ok(ExpansionSample {
            z,
            h: self.hubble(z)?,
            dc: self.comoving(z)?,
            dl: self.luminosity_distance(z)?,
        })
    }

    /// Evaluate a batch of redshifts, preserving order.
    pub fn evaluate_many(&self, zs: &[f64]) -> CosmoResult<Vec<ExpansionSample>> {
        if zs.len() > PAR_THRESHOLD {
            zs.par_iter().map(|&z| self.evaluate(z)).collect()
        } else {
            zs.iter().map(|&z| self.evaluate(z)).collect()
        }
    }

    /// Tabulated `H` on the grid.
    pub fn hubble_table(&self) -> &[f64] {
        self.hubble.values()
    }

    /// Tabulated `∫ dz/H` on the grid.
    pub fn comoving_table(&self) -> &[f64] {
        self.comoving.values()
    }

    /// Tabulated luminosity distance (Mpc) on the grid.
    pub fn luminosity_table(&self) -> &[f64] {
        self.luminosity.values()
    }
}

/// Dark-energy density relative to today, `a^(-3 (1 + w(a) + xi))`.
pub fn dark_energy_density(a: f64, params: &ModelParameters) -> f64 {
    let w = params.w0 + params.wa * (1.0 - a);
    a.powf(-3.0 * (1.0 + w + params.xi))
}

/// `(H/H0)²` at scale factor `a`.
pub fn e_squared(a: f64, params: &ModelParameters) -> f64 {
    let om = params.omega_m;
    let matter = om * (a.powi(-3) - 1.0);
    let dark = (1.0 - om) * (dark_energy_density(a, params) - 1.0);
    1.0 + matter + dark
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::grid::DEFAULT_GRID_POINTS;

    fn grid() -> Arc<RedshiftGrid> {
        Arc::new(RedshiftGrid::new(DEFAULT_GRID_POINTS).unwrap())
    }

    fn lcdm() -> ModelParameters {
        ModelParameters::baseline(67.8, 0.315, 0.811)
    }

    fn dut() -> ModelParameters {
        ModelParameters::interacting(69.2, 0.298, -1.05, 0.08, 0.035, 0.795)
    }

    /// Independent reference: composite Simpson on `1/H` from the closed form.
    fn simpson_dc(params: &ModelParameters, z: f64) -> f64 {
        let n = 4000;
        let h = z / n as f64;
        let f = |zz: f64| 1.0 / (params.h0 * e_squared(1.0 / (1.0 + zz), params).sqrt());
        let mut acc = f(0.0) + f(z);
        for i in 1..n {
            let w = if i % 2 == 1 { 4.0 } else { 2.0 };
            acc += w * f(i as f64 * h);
        }
        acc * h / 3.0
    }

    #[test]
    fn h_at_zero_equals_h0_exactly() {
        let eh = ExpansionHistory::new(lcdm(), grid()).unwrap();
        assert_eq!(eh.hubble(0.0).unwrap(), 67.8);
    }

    #[test]
    fn comoving_distance_is_anchored_at_zero() {
        let eh = ExpansionHistory::new(dut(), grid()).unwrap();
        assert_eq!(eh.comoving(0.0).unwrap(), 0.0);
        assert_eq!(eh.comoving_table()[0], 0.0);
        assert_eq!(eh.luminosity_distance(0.0).unwrap(), 0.0);
    }

    #[test]
    fn interacting_reference_parameters_build() {
        assert!(ExpansionHistory::new(dut(), grid()).is_ok());
    }

    #[test]
    fn invalid_matter_density_fails_construction() {
        let params = ModelParameters::baseline(67.8, 1.5, 0.811);
        let err = ExpansionHistory::new(params, grid()).unwrap_err();
        assert!(matches!(err, CosmoError::InvalidParameters { .. }));
    }

    #[test]
    fn overflowing_dark_energy_is_rejected_not_clamped() {
        // A huge w0 overflows ρ_DE at the top of the grid.
        let params = ModelParameters::interacting(70.0, 0.3, 400.0, 0.0, 0.0, 0.8);
        let err = ExpansionHistory::new(params, grid()).unwrap_err();
        assert!(matches!(err, CosmoError::InvalidParameters { .. }));
    }

    #[test]
    fn baseline_hubble_rate_is_non_decreasing_for_random_parameters() {
        let mut rng = StdRng::seed_from_u64(7);
        let grid = grid();
        for _ in 0..50 {
            let om = rng.gen_range(0.01..0.99);
            let h0 = rng.gen_range(40.0..100.0);
            let eh = ExpansionHistory::new(ModelParameters::baseline(h0, om, 0.8), Arc::clone(&grid)).unwrap();
            let table = eh.hubble_table();
            assert!(
                table.windows(2).all(|w| w[1] >= w[0]),
                "H(z) decreased for h0={h0}, omega_m={om}"
            );
        }
    }

    #[test]
    fn comoving_distance_is_non_decreasing_for_random_parameters() {
        let mut rng = StdRng::seed_from_u64(11);
        let grid = grid();
        for _ in 0..50 {
            let params = ModelParameters::interacting(
                rng.gen_range(50.0..90.0),
                rng.gen_range(0.05..0.95),
                rng.gen_range(-1.5..-0.5),
                rng.gen_range(-0.5..0.5),
                rng.gen_range(-0.1..0.1),
                rng.gen_range(0.6..1.0),
            );
            let eh = ExpansionHistory::new(params, Arc::clone(&grid)).unwrap();
            assert_eq!(eh.comoving(0.0).unwrap(), 0.0);
            assert!(eh.comoving_table().windows(2).all(|w| w[1] >= w[0]));

            // Between knots as well: PCHIP must not overshoot the monotone table.
            let mut prev = 0.0;
            for i in 0..=400 {
                let z = 5.0 * i as f64 / 400.0;
                let d = eh.comoving(z).unwrap();
                assert!(d >= prev, "Dc decreased at z={z} for {params:?}");
                prev = d;
            }
        }
    }

    #[test]
    fn luminosity_distance_matches_definition_on_grid() {
        for params in [lcdm(), dut()] {
            let eh = ExpansionHistory::new(params, grid()).unwrap();
            for (i, &z) in eh.grid().values().iter().enumerate() {
                let dl = eh.luminosity_distance(z).unwrap();
                let expected = (1.0 + z) * SPEED_OF_LIGHT_KM_S * eh.comoving_table()[i];
                if expected == 0.0 {
                    assert_eq!(dl, 0.0);
                } else {
                    assert!(((dl - expected) / expected).abs() < 1e-9, "z={z}");
                }
            }
        }
    }

    #[test]
    fn trapezoid_table_agrees_with_simpson_reference() {
        let params = lcdm();
        let eh = ExpansionHistory::new(params, grid()).unwrap();
        for &z in &[0.1, 0.5, 1.0, 2.3, 4.9] {
            let reference = simpson_dc(&params, z);
            let got = eh.comoving(z).unwrap();
            assert!(((got - reference) / reference).abs() < 5e-5, "z={z}: {got} vs {reference}");
        }
    }

    #[test]
    fn distances_refuse_to_extrapolate_but_hubble_does() {
        let eh = ExpansionHistory::new(lcdm(), grid()).unwrap();
        assert!(matches!(
            eh.comoving(5.2),
            Err(CosmoError::InterpolationDomain { .. })
        ));
        assert!(eh.luminosity_distance(-0.01).is_err());
        let h_edge = eh.hubble(5.0).unwrap();
        let h_beyond = eh.hubble(5.2).unwrap();
        assert!(h_beyond > h_edge);
        assert!(eh.evaluate(5.2).is_err());
    }

    #[test]
    fn batch_evaluation_matches_scalar_evaluation() {
        let eh = ExpansionHistory::new(dut(), grid()).unwrap();
        let zs: Vec<f64> = (0..1000).map(|i| 4.0 * i as f64 / 999.0).collect();
        let batch = eh.evaluate_many(&zs).unwrap();
        assert_eq!(batch.len(), zs.len());
        for (s, &z) in batch.iter().zip(&zs) {
            assert_eq!(*s, eh.evaluate(z).unwrap());
        }
        assert!(eh.evaluate_many(&[0.5, 6.0]).is_err());
    }
}
