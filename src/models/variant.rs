//! Model variants: baseline (cosmological constant) vs interacting dark energy.
//!
//! A `ModelVariant` is parameters plus policy. `Model` binds a variant to a built
//! (usually cached) expansion history and exposes the growth observable; distance
//! observables live in `crate::observables`.

use std::sync::Arc;

use crate::domain::{ModelKind, ModelParameters};
use crate::engine::{EngineCache, ExpansionHistory};
use crate::error::CosmoResult;
use crate::grid::RedshiftGrid;
use crate::models::growth::{GrowthIndex, growth_rate_fs8};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelVariant {
    kind: ModelKind,
    params: ModelParameters,
    growth: GrowthIndex,
}

impl ModelVariant {
    /// Build a variant of the given kind.
    ///
    /// For `Baseline` the equation-of-state fields of `params` are overridden with
    /// `w0 = -1`, `wa = 0`, `xi = 0`.
    pub fn new(kind: ModelKind, params: ModelParameters) -> Self {
        let params = match kind {
            ModelKind::Baseline => ModelParameters::baseline(params.h0, params.omega_m, params.sigma8),
            ModelKind::Interacting => params,
        };
        Self {
            kind,
            params,
            growth: GrowthIndex::default(),
        }
    }

    pub fn baseline(h0: f64, omega_m: f64, sigma8: f64) -> Self {
        Self::new(ModelKind::Baseline, ModelParameters::baseline(h0, omega_m, sigma8))
    }

    pub fn interacting(params: ModelParameters) -> Self {
        Self::new(ModelKind::Interacting, params)
    }

    pub fn with_growth(mut self, growth: GrowthIndex) -> Self {
        self.growth = growth;
        self
    }

    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    pub fn params(&self) -> &ModelParameters {
        &self.params
    }

    pub fn growth(&self) -> &GrowthIndex {
        &self.growth
    }

    pub fn gamma(&self) -> f64 {
        self.growth.gamma(self.kind)
    }

    /// Bind to a memoized expansion history.
    pub fn instantiate(&self, cache: &EngineCache) -> CosmoResult<Model> {
        let history = cache.get_or_build(&self.params)?;
        Ok(Model {
            variant: *self,
            history,
        })
    }

    /// Bind to a freshly built expansion history (no memoization).
    pub fn instantiate_uncached(&self, grid: Arc<RedshiftGrid>) -> CosmoResult<Model> {
        let history = Arc::new(ExpansionHistory::new(self.params, grid)?);
        Ok(Model {
            variant: *self,
            history,
        })
    }
}

/// A variant bound to its expansion history.
#[derive(Debug, Clone)]
pub struct Model {
    variant: ModelVariant,
    history: Arc<ExpansionHistory>,
}

impl Model {
    pub fn variant(&self) -> &ModelVariant {
        &self.variant
    }

    pub fn kind(&self) -> ModelKind {
        self.variant.kind
    }

    pub fn history(&self) -> &ExpansionHistory {
        &self.history
    }

    /// Phenomenological `fσ8(z)` with this variant's growth index.
    pub fn fs8(&self, z: f64) -> CosmoResult<f64> {
        growth_rate_fs8(
            &self.history,
            self.variant.gamma(),
            self.variant.growth.suppression_exponent,
            z,
        )
    }
}
