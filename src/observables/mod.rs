//! Derived distance observables.
//!
//! Pure functions over an already-built `ExpansionHistory`; they only read its cached
//! interpolators. All distances are in Mpc.
//!
//! - comoving distance `c Dc(z)`
//! - angular-diameter distance `DA(z) = c Dc(z) / (1+z)`
//! - distance modulus `μ(z) = 5 log10(DL / Mpc) + 25`
//! - BAO volume distance `D_V(z) = [(1+z)² DA² c z / H(z)]^(1/3)`
//!
//! Out-of-grid redshifts propagate `InterpolationDomain`; a non-finite result (e.g.
//! `μ` at `z = 0` where `DL = 0`) is `NonFiniteObservable`, never NaN or ∞.

use crate::domain::{CurvePoint, Observable};
use crate::engine::{ExpansionHistory, SPEED_OF_LIGHT_KM_S};
use crate::error::{CosmoError, CosmoResult};
use crate::models::Model;

pub fn comoving_distance_mpc(history: &ExpansionHistory, z: f64) -> CosmoResult<f64> {
    finite("comoving distance", z, SPEED_OF_LIGHT_KM_S * history.comoving(z)?)
}

pub fn angular_diameter_distance(history: &ExpansionHistory, z: f64) -> CosmoResult<f64> {
    let dc = comoving_distance_mpc(history, z)?;
    finite("angular diameter distance", z, dc / (1.0 + z))
}

/// Angular-diameter distance in Gpc (the unit CMB priors are quoted in).
pub fn angular_diameter_distance_gpc(history: &ExpansionHistory, z: f64) -> CosmoResult<f64> {
    Ok(angular_diameter_distance(history, z)? / 1e3)
}

pub fn distance_modulus(history: &ExpansionHistory, z: f64) -> CosmoResult<f64> {
    let dl = history.luminosity_distance(z)?;
    finite("distance modulus", z, 5.0 * dl.log10() + 25.0)
}

pub fn volume_distance(history: &ExpansionHistory, z: f64) -> CosmoResult<f64> {
    let da = angular_diameter_distance(history, z)?;
    let h = history.hubble(z)?;
    let opz = 1.0 + z;
    let cube = opz * opz * da * da * SPEED_OF_LIGHT_KM_S * z / h;
    finite("volume distance", z, cube.cbrt())
}

/// Evaluate every observable at `z`.
pub fn curve_point(model: &Model, z: f64) -> CosmoResult<CurvePoint> {
    let history = model.history();
    Ok(CurvePoint {
        z,
        h: history.hubble(z)?,
        dc: comoving_distance_mpc(history, z)?,
        dl: history.luminosity_distance(z)?,
        mu: distance_modulus(history, z)?,
        dv: volume_distance(history, z)?,
        fs8: model.fs8(z)?,
    })
}

/// Evaluate a single observable at `z`.
pub fn evaluate(model: &Model, observable: Observable, z: f64) -> CosmoResult<f64> {
    let history = model.history();
    match observable {
        Observable::Hubble => history.hubble(z),
        Observable::Mu => distance_modulus(history, z),
        Observable::Dv => volume_distance(history, z),
        Observable::Fs8 => model.fs8(z),
    }
}

fn finite(name: &'static str, z: f64, value: f64) -> CosmoResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CosmoError::NonFiniteObservable { name, z })
    }
}
