//! Published best-fit parameter sets.
//!
//! These come from an external analysis and are reported as-is; nothing in this crate
//! fits them.

use serde::Serialize;

use crate::domain::{ModelKind, ModelParameters};
use crate::models::variant::ModelVariant;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BestFit {
    pub model: ModelKind,
    pub parameters: ModelParameters,
    pub n_params: usize,
    pub description: &'static str,
}

impl BestFit {
    pub fn variant(&self) -> ModelVariant {
        ModelVariant::new(self.model, self.parameters)
    }
}

pub const BEST_FIT_BASELINE: BestFit = BestFit {
    model: ModelKind::Baseline,
    parameters: ModelParameters {
        h0: 67.8,
        omega_m: 0.315,
        w0: -1.0,
        wa: 0.0,
        xi: 0.0,
        sigma8: 0.811,
    },
    n_params: 3,
    description: "Standard ΛCDM cosmology",
};

pub const BEST_FIT_INTERACTING: BestFit = BestFit {
    model: ModelKind::Interacting,
    parameters: ModelParameters {
        h0: 69.2,
        omega_m: 0.298,
        w0: -1.05,
        wa: 0.08,
        xi: 0.035,
        sigma8: 0.795,
    },
    n_params: 6,
    description: "Dark energy with matter interaction (DUT model)",
};

pub fn best_fit(kind: ModelKind) -> &'static BestFit {
    match kind {
        ModelKind::Baseline => &BEST_FIT_BASELINE,
        ModelKind::Interacting => &BEST_FIT_INTERACTING,
    }
}
