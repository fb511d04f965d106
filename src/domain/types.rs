//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during evaluation
//! - exported to JSON/CSV
//! - reloaded later for plotting

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{CosmoError, CosmoResult};
use crate::models::GrowthIndex;

/// Which expansion-history policy to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    /// Cosmological constant: `w0 = -1`, `wa = 0`, `xi = 0`.
    Baseline,
    /// Free CPL equation of state plus a matter/dark-energy interaction `xi`.
    Interacting,
}

impl ModelKind {
    pub const ALL: [ModelKind; 2] = [ModelKind::Baseline, ModelKind::Interacting];

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            ModelKind::Baseline => "ΛCDM",
            ModelKind::Interacting => "DUT",
        }
    }

    /// Stable ASCII identifier used in exports.
    pub fn id(self) -> &'static str {
        match self {
            ModelKind::Baseline => "lcdm",
            ModelKind::Interacting => "dut",
        }
    }

    /// Number of free parameters, for information criteria.
    pub fn param_count(self) -> usize {
        match self {
            ModelKind::Baseline => 3,
            ModelKind::Interacting => 6,
        }
    }
}

/// Derived quantity selectable for plotting and residual diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Observable {
    /// `H(z)` in km/s/Mpc.
    Hubble,
    /// Distance modulus `μ(z)` in mag.
    Mu,
    /// BAO volume-averaged distance `D_V(z)` in Mpc.
    Dv,
    /// Growth observable `fσ8(z)`.
    Fs8,
}

impl Observable {
    pub const ALL: [Observable; 4] = [
        Observable::Hubble,
        Observable::Mu,
        Observable::Dv,
        Observable::Fs8,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Observable::Hubble => "H(z) [km/s/Mpc]",
            Observable::Mu => "mu(z) [mag]",
            Observable::Dv => "D_V(z) [Mpc]",
            Observable::Fs8 => "f*sigma8(z)",
        }
    }

    /// Pick this observable out of an evaluated curve point.
    pub fn select(self, point: &CurvePoint) -> f64 {
        match self {
            Observable::Hubble => point.h,
            Observable::Mu => point.mu,
            Observable::Dv => point.dv,
            Observable::Fs8 => point.fs8,
        }
    }
}

/// Scalar cosmological parameters.
///
/// `h0` is in km/s/Mpc. `w0`/`wa` parameterize `w(a) = w0 + wa (1 - a)` and `xi` is the
/// phenomenological matter/dark-energy interaction strength (`xi = 0` is uncoupled).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelParameters {
    pub h0: f64,
    pub omega_m: f64,
    pub w0: f64,
    pub wa: f64,
    pub xi: f64,
    pub sigma8: f64,
}

impl ModelParameters {
    /// Cosmological-constant parameters.
    pub fn baseline(h0: f64, omega_m: f64, sigma8: f64) -> Self {
        Self {
            h0,
            omega_m,
            w0: -1.0,
            wa: 0.0,
            xi: 0.0,
            sigma8,
        }
    }

    pub fn interacting(h0: f64, omega_m: f64, w0: f64, wa: f64, xi: f64, sigma8: f64) -> Self {
        Self {
            h0,
            omega_m,
            w0,
            wa,
            xi,
            sigma8,
        }
    }

    /// Check the scalar constraints: `h0 > 0`, `0 < omega_m < 1`, `sigma8 >= 0`,
    /// everything finite.
    pub fn validate(&self) -> CosmoResult<()> {
        let named = [
            ("h0", self.h0),
            ("omega_m", self.omega_m),
            ("w0", self.w0),
            ("wa", self.wa),
            ("xi", self.xi),
            ("sigma8", self.sigma8),
        ];
        if let Some((name, value)) = named.iter().find(|(_, v)| !v.is_finite()) {
            return Err(CosmoError::invalid_parameters(format!("{name}={value} is not finite")));
        }
        if self.h0 <= 0.0 {
            return Err(CosmoError::invalid_parameters(format!("h0={} must be > 0", self.h0)));
        }
        if !(self.omega_m > 0.0 && self.omega_m < 1.0) {
            return Err(CosmoError::invalid_parameters(format!(
                "omega_m={} must lie in (0, 1)",
                self.omega_m
            )));
        }
        if self.sigma8 < 0.0 {
            return Err(CosmoError::invalid_parameters(format!(
                "sigma8={} must be >= 0",
                self.sigma8
            )));
        }
        Ok(())
    }

    /// Exact-bits memo key.
    pub fn key(&self) -> ParamKey {
        ParamKey([
            self.h0.to_bits(),
            self.omega_m.to_bits(),
            self.w0.to_bits(),
            self.wa.to_bits(),
            self.xi.to_bits(),
            self.sigma8.to_bits(),
        ])
    }
}

/// Bit-exact parameter tuple used to memoize expansion histories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamKey([u64; 6]);

/// One row of evaluated observables.
///
/// Distances are in Mpc; `h` in km/s/Mpc.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub z: f64,
    pub h: f64,
    pub dc: f64,
    pub dl: f64,
    pub mu: f64,
    pub dv: f64,
    pub fs8: f64,
}

/// Evaluated curve for one model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelCurve {
    pub model: ModelKind,
    pub parameters: ModelParameters,
    pub gamma: f64,
    pub points: Vec<CurvePoint>,
}

/// A saved curve file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub grid_points: usize,
    pub curves: Vec<ModelCurve>,
}

/// Runtime configuration assembled from CLI arguments and the environment.
#[derive(Debug, Clone)]
pub struct EvalConfig {
    /// Points on the shared redshift grid (including the `z = 0` anchor).
    pub grid_points: usize,

    pub z_min: f64,
    pub z_max: f64,
    pub n_points: usize,

    pub growth: GrowthIndex,

    pub plot: Option<Observable>,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_csv: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_constructor_pins_dark_energy() {
        let p = ModelParameters::baseline(67.8, 0.315, 0.811);
        assert_eq!((p.w0, p.wa, p.xi), (-1.0, 0.0, 0.0));
        assert!(p.validate().is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range_values() {
        let ok = ModelParameters::baseline(67.8, 0.315, 0.811);
        for bad in [
            ModelParameters { omega_m: 1.5, ..ok },
            ModelParameters { omega_m: 0.0, ..ok },
            ModelParameters { omega_m: 1.0, ..ok },
            ModelParameters { h0: 0.0, ..ok },
            ModelParameters { h0: -70.0, ..ok },
            ModelParameters { sigma8: -0.1, ..ok },
            ModelParameters { wa: f64::NAN, ..ok },
        ] {
            assert!(
                matches!(bad.validate(), Err(CosmoError::InvalidParameters { .. })),
                "{bad:?} should be rejected"
            );
        }
        assert!(ModelParameters { sigma8: 0.0, ..ok }.validate().is_ok());
    }

    #[test]
    fn key_is_bit_exact() {
        let a = ModelParameters::baseline(67.8, 0.315, 0.811);
        let b = ModelParameters::baseline(67.8, 0.315, 0.811);
        let c = ModelParameters::baseline(67.8, 0.315 + 1e-15, 0.811);
        assert_eq!(a.key(), b.key());
        assert_ne!(a.key(), c.key());
    }

    #[test]
    fn observable_selects_matching_field() {
        let p = CurvePoint {
            z: 0.5,
            h: 90.0,
            dc: 1900.0,
            dl: 2850.0,
            mu: 42.3,
            dv: 1950.0,
            fs8: 0.46,
        };
        assert_eq!(Observable::Hubble.select(&p), 90.0);
        assert_eq!(Observable::Mu.select(&p), 42.3);
        assert_eq!(Observable::Dv.select(&p), 1950.0);
        assert_eq!(Observable::Fs8.select(&p), 0.46);
    }
}
