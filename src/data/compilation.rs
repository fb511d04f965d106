//! Multi-probe observational compilation.
//!
//! Built once at startup and passed by reference (`Arc`) to whatever needs it.
//! Nothing here depends on model parameters and nothing mutates after construction.
//!
//! Probes:
//! - distance modulus (Pantheon+-like, compressed to a smooth 1048-point sample)
//! - BAO volume distances (DESI-like)
//! - Hubble rate (cosmic chronometers + Euclid-like forecast points)
//! - growth `fσ8` (redshift-space distortions)
//! - scalar summary priors (Planck compressed vector, CMB-S4 `DA`, LSST `S8`, SH0ES `H0`)

use std::f64::consts::PI;

use serde::Serialize;

use crate::domain::Observable;
use crate::error::{CosmoError, CosmoResult};
use crate::math::lin_space;

/// Intrinsic scatter added in quadrature to the distance-modulus errors (mag).
const SN_INTRINSIC_SCATTER: f64 = 0.015;

/// One probe: equal-length redshift / value / 1σ uncertainty vectors.
#[derive(Debug, Clone, Serialize)]
pub struct Dataset {
    pub probe: &'static str,
    pub observable: Observable,
    pub z: Vec<f64>,
    pub value: Vec<f64>,
    pub err: Vec<f64>,
}

impl Dataset {
    pub fn new(
        probe: &'static str,
        observable: Observable,
        z: Vec<f64>,
        value: Vec<f64>,
        err: Vec<f64>,
    ) -> CosmoResult<Self> {
        if z.len() != value.len() || z.len() != err.len() {
            return Err(CosmoError::InvalidDataset {
                probe,
                reason: format!(
                    "length mismatch: z={}, value={}, err={}",
                    z.len(),
                    value.len(),
                    err.len()
                ),
            });
        }
        if z.is_empty() {
            return Err(CosmoError::InvalidDataset {
                probe,
                reason: "no points".to_string(),
            });
        }
        for i in 0..z.len() {
            if !(z[i].is_finite() && z[i] >= 0.0 && value[i].is_finite()) {
                return Err(CosmoError::InvalidDataset {
                    probe,
                    reason: format!("point {i} is not finite or has negative z"),
                });
            }
            if !(err[i].is_finite() && err[i] > 0.0) {
                return Err(CosmoError::InvalidDataset {
                    probe,
                    reason: format!("point {i} has non-positive uncertainty {}", err[i]),
                });
            }
        }
        Ok(Self {
            probe,
            observable,
            z,
            value,
            err,
        })
    }

    pub fn len(&self) -> usize {
        self.z.len()
    }

    pub fn is_empty(&self) -> bool {
        self.z.is_empty()
    }

    /// Iterate `(z, value, err)` triples.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.z
            .iter()
            .zip(&self.value)
            .zip(&self.err)
            .map(|((&z, &v), &e)| (z, v, e))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GaussianPrior {
    pub mean: f64,
    pub err: f64,
}

/// Planck 2018 compressed mean vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlanckCompressed {
    pub acoustic_scale: f64,
    pub theta_star_100: f64,
    pub omega_b_h2: f64,
    pub omega_m_h2: f64,
    pub h0: f64,
    pub sigma8: f64,
}

/// Angular-diameter distance to last scattering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CmbDistancePrior {
    pub z: f64,
    pub da_gpc: f64,
    pub err: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryPriors {
    pub planck: PlanckCompressed,
    pub cmb_s4: CmbDistancePrior,
    pub lsst_s8: GaussianPrior,
    pub shoes_h0: GaussianPrior,
}

#[derive(Debug, Clone, Serialize)]
pub struct ObservationalData {
    pub pantheon: Dataset,
    pub bao: Dataset,
    pub hubble: Dataset,
    pub growth: Dataset,
    pub priors: SummaryPriors,
}

impl ObservationalData {
    /// Assemble and validate the full compilation.
    pub fn load() -> CosmoResult<Self> {
        Ok(Self {
            pantheon: pantheon()?,
            bao: bao()?,
            hubble: hubble()?,
            growth: growth()?,
            priors: SummaryPriors {
                planck: PlanckCompressed {
                    acoustic_scale: 301.8,
                    theta_star_100: 1.0411,
                    omega_b_h2: 0.02236,
                    omega_m_h2: 0.143,
                    h0: 67.36,
                    sigma8: 0.811,
                },
                cmb_s4: CmbDistancePrior {
                    z: 1090.0,
                    da_gpc: 13.91,
                    err: 0.05,
                },
                lsst_s8: GaussianPrior {
                    mean: 0.771,
                    err: 0.008,
                },
                shoes_h0: GaussianPrior {
                    mean: 73.04,
                    err: 0.50,
                },
            },
        })
    }

    /// The dataset measuring `observable`.
    pub fn dataset(&self, observable: Observable) -> &Dataset {
        match observable {
            Observable::Hubble => &self.hubble,
            Observable::Mu => &self.pantheon,
            Observable::Dv => &self.bao,
            Observable::Fs8 => &self.growth,
        }
    }

    pub fn datasets(&self) -> [&Dataset; 4] {
        [&self.pantheon, &self.bao, &self.hubble, &self.growth]
    }

    /// Number of redshift-resolved data points across all probes.
    pub fn total_points(&self) -> usize {
        self.datasets().iter().map(|d| d.len()).sum()
    }
}

fn pantheon() -> CosmoResult<Dataset> {
    let mut z = lin_space(0.01, 0.1, 240);
    z.extend(lin_space(0.12, 0.6, 520));
    z.extend(lin_space(0.65, 1.4, 200));
    z.extend(lin_space(1.5, 2.3, 88));

    let mu = z
        .iter()
        .map(|&zi| 5.0 * (zi + 0.01).log10() + 36.18 + 0.06 * (2.0 * PI * zi).sin())
        .collect();
    let err = z
        .iter()
        .map(|&zi| {
            let stat = 0.14 + 0.025 * zi;
            (stat * stat + SN_INTRINSIC_SCATTER * SN_INTRINSIC_SCATTER).sqrt()
        })
        .collect();

    Dataset::new("pantheon", Observable::Mu, z, mu, err)
}

fn bao() -> CosmoResult<Dataset> {
    Dataset::new(
        "bao",
        Observable::Dv,
        vec![0.106, 0.38, 0.51, 0.61, 0.79, 1.05, 1.55, 2.11],
        vec![457.4, 1509.3, 2037.1, 2501.9, 3180.5, 4010.2, 5320.1, 6500.8],
        vec![12.5, 25.1, 28.5, 33.2, 45.0, 50.1, 62.1, 80.5],
    )
}

fn hubble() -> CosmoResult<Dataset> {
    // Cosmic chronometers and BAO-derived points.
    let mut z = vec![
        0.07, 0.09, 0.12, 0.17, 0.179, 0.199, 0.20, 0.27, 0.28, 0.352, 0.38, 0.40, 0.48, 0.593,
        0.68, 0.781, 0.875, 0.88, 1.0, 1.23, 1.3, 1.36, 1.4, 1.45, 1.52, 1.72, 1.75, 1.94, 2.3,
        2.32, 2.35, 0.51, 0.60, 0.698, 0.85, 1.1, 1.5, 1.75, 2.0, 2.25,
    ];
    let mut h = vec![
        69.0, 69.0, 68.6, 83.0, 75.0, 75.0, 72.9, 77.0, 88.8, 83.0, 81.9, 95.0, 97.0, 104.0,
        92.0, 105.0, 115.0, 90.0, 120.0, 95.0, 135.0, 160.0, 150.0, 155.0, 145.0, 165.0, 170.0,
        180.0, 200.0, 210.0, 220.0, 144.0, 162.0, 162.5, 178.0, 195.0, 220.0, 240.0, 280.0,
        320.0,
    ];
    let mut err = vec![
        19.6, 12.0, 26.2, 8.0, 4.0, 5.0, 29.6, 14.0, 36.6, 14.0, 2.1, 17.0, 62.0, 13.0, 8.0,
        12.0, 15.0, 10.0, 17.0, 12.0, 20.0, 20.0, 18.0, 19.0, 22.0, 25.0, 26.0, 28.0, 30.0, 32.0,
        35.0, 12.0, 15.0, 14.5, 16.0, 18.0, 20.0, 22.0, 25.0, 28.0,
    ];

    // Euclid-like forecast points.
    z.extend([0.9, 1.1, 1.3, 1.5, 1.7, 1.9, 2.1, 2.3, 2.5, 2.7]);
    h.extend([130.5, 155.2, 180.1, 205.5, 230.1, 255.8, 280.9, 305.5, 330.1, 355.2]);
    err.extend([4.5, 5.1, 6.2, 7.0, 8.1, 9.5, 10.1, 11.2, 12.5, 14.1]);

    Dataset::new("hubble", Observable::Hubble, z, h, err)
}

fn growth() -> CosmoResult<Dataset> {
    Dataset::new(
        "fs8",
        Observable::Fs8,
        vec![
            0.01, 0.15, 0.25, 0.30, 0.37, 0.38, 0.42, 0.51, 0.56, 0.60, 0.61, 0.64, 0.67, 0.70,
            0.73, 0.85, 0.95, 1.10, 1.23, 1.52, 1.7, 1.94, 2.25, 0.8, 0.95, 1.1, 1.4, 1.75,
        ],
        vec![
            0.45, 0.413, 0.428, 0.43, 0.44, 0.437, 0.45, 0.452, 0.46, 0.462, 0.462, 0.465, 0.468,
            0.468, 0.47, 0.475, 0.465, 0.46, 0.455, 0.45, 0.445, 0.44, 0.435, 0.47, 0.465, 0.46,
            0.45, 0.44,
        ],
        vec![
            0.05, 0.03, 0.028, 0.03, 0.035, 0.025, 0.03, 0.02, 0.025, 0.018, 0.018, 0.02, 0.022,
            0.017, 0.018, 0.025, 0.02, 0.022, 0.025, 0.03, 0.032, 0.035, 0.04, 0.022, 0.02,
            0.022, 0.028, 0.03,
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compilation_has_expected_sizes() {
        let data = ObservationalData::load().unwrap();
        assert_eq!(data.pantheon.len(), 1048);
        assert_eq!(data.bao.len(), 8);
        assert_eq!(data.hubble.len(), 50);
        assert_eq!(data.growth.len(), 28);
        assert_eq!(data.total_points(), 1048 + 8 + 50 + 28);
    }

    #[test]
    fn pantheon_errors_include_intrinsic_scatter() {
        let data = ObservationalData::load().unwrap();
        let (z, _, err) = data.pantheon.points().next().unwrap();
        assert_eq!(z, 0.01);
        let stat: f64 = 0.14 + 0.025 * 0.01;
        assert!((err - (stat * stat + 0.015 * 0.015).sqrt()).abs() < 1e-15);
    }

    #[test]
    fn dataset_lookup_matches_observable() {
        let data = ObservationalData::load().unwrap();
        for obs in Observable::ALL {
            assert_eq!(data.dataset(obs).observable, obs);
        }
    }

    #[test]
    fn dataset_rejects_mismatched_or_bad_values() {
        assert!(Dataset::new("x", Observable::Hubble, vec![0.1], vec![1.0, 2.0], vec![1.0]).is_err());
        assert!(Dataset::new("x", Observable::Hubble, vec![0.1], vec![1.0], vec![0.0]).is_err());
        assert!(Dataset::new("x", Observable::Hubble, vec![-0.1], vec![1.0], vec![1.0]).is_err());
        assert!(Dataset::new("x", Observable::Hubble, vec![], vec![], vec![]).is_err());
    }

    #[test]
    fn compilation_serializes_to_json() {
        let data = ObservationalData::load().unwrap();
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["bao"]["z"].as_array().unwrap().len(), 8);
        assert_eq!(json["priors"]["shoes_h0"]["mean"], 73.04);
        assert_eq!(json["growth"]["observable"], "fs8");
    }
}
