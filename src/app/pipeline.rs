//! Shared evaluation pipeline used by every CLI command.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! parameters -> (cached) expansion history -> observables at the requested redshifts
//!
//! The CLI handlers can then focus on presentation (tables, plots, exports).

use std::sync::Arc;

use tracing::{debug, warn};

use crate::data::ObservationalData;
use crate::domain::{CurvePoint, EvalConfig, ModelCurve};
use crate::engine::EngineCache;
use crate::error::{AppError, CosmoError, CosmoResult};
use crate::grid::RedshiftGrid;
use crate::math::lin_space;
use crate::models::{BEST_FIT_BASELINE, BEST_FIT_INTERACTING, Model, ModelVariant};
use crate::observables::curve_point;

/// Process-wide immutable resources plus the engine memo.
#[derive(Debug)]
pub struct Context {
    pub grid: Arc<RedshiftGrid>,
    pub data: Arc<ObservationalData>,
    pub cache: EngineCache,
}

impl Context {
    pub fn new(grid_points: usize) -> CosmoResult<Self> {
        let grid = Arc::new(RedshiftGrid::new(grid_points)?);
        let data = Arc::new(ObservationalData::load()?);
        debug!(
            grid_points = grid.len(),
            data_points = data.total_points(),
            "context ready"
        );
        Ok(Self {
            cache: EngineCache::new(Arc::clone(&grid)),
            grid,
            data,
        })
    }

    /// Bind a variant to its memoized expansion history.
    pub fn model(&self, variant: &ModelVariant) -> Result<Model, AppError> {
        variant.instantiate(&self.cache).map_err(|err| {
            warn!(model = variant.kind().id(), params = ?variant.params(), %err, "rejected parameter set");
            AppError::from(err)
        })
    }
}

/// Validated evaluation range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveRequest {
    pub z_min: f64,
    pub z_max: f64,
    pub n_points: usize,
}

impl CurveRequest {
    pub fn new(z_min: f64, z_max: f64, n_points: usize) -> CosmoResult<Self> {
        if !(z_min.is_finite() && z_max.is_finite()) {
            return Err(CosmoError::InvalidRange {
                reason: format!("z_min={z_min}, z_max={z_max} must be finite"),
            });
        }
        if z_min < 0.0 || z_max < z_min {
            return Err(CosmoError::InvalidRange {
                reason: format!("need 0 <= z_min <= z_max, got z_min={z_min}, z_max={z_max}"),
            });
        }
        if n_points == 0 {
            return Err(CosmoError::InvalidRange {
                reason: "n_points must be >= 1".to_string(),
            });
        }
        Ok(Self {
            z_min,
            z_max,
            n_points,
        })
    }

    pub fn from_config(config: &EvalConfig) -> CosmoResult<Self> {
        Self::new(config.z_min, config.z_max, config.n_points)
    }

    pub fn redshifts(&self) -> Vec<f64> {
        lin_space(self.z_min, self.z_max, self.n_points)
    }
}

/// Evaluate every observable of `model` on the request's redshifts, in order.
pub fn evaluate_curve(model: &Model, request: &CurveRequest) -> CosmoResult<Vec<CurvePoint>> {
    request
        .redshifts()
        .into_iter()
        .map(|z| curve_point(model, z))
        .collect()
}

/// Evaluate one variant and package the result.
pub fn run_model(ctx: &Context, variant: &ModelVariant, request: &CurveRequest) -> Result<ModelCurve, AppError> {
    let model = ctx.model(variant)?;
    let points = evaluate_curve(&model, request)?;
    Ok(ModelCurve {
        model: variant.kind(),
        parameters: *variant.params(),
        gamma: variant.gamma(),
        points,
    })
}

/// Evaluate both variants concurrently (they share nothing mutable).
pub fn run_comparison(
    ctx: &Context,
    baseline: &ModelVariant,
    interacting: &ModelVariant,
    request: &CurveRequest,
) -> Result<Vec<ModelCurve>, AppError> {
    let (a, b) = rayon::join(
        || run_model(ctx, baseline, request),
        || run_model(ctx, interacting, request),
    );
    Ok(vec![a?, b?])
}

/// The published best-fit variants with the configured growth indices.
pub fn best_fit_variants(config: &EvalConfig) -> (ModelVariant, ModelVariant) {
    (
        BEST_FIT_BASELINE.variant().with_growth(config.growth),
        BEST_FIT_INTERACTING.variant().with_growth(config.growth),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ModelKind;
    use crate::models::GrowthIndex;

    fn config() -> EvalConfig {
        EvalConfig {
            grid_points: 400,
            z_min: 0.01,
            z_max: 2.5,
            n_points: 100,
            growth: GrowthIndex::default(),
            plot: None,
            plot_width: 80,
            plot_height: 20,
            export_csv: None,
            export_json: None,
        }
    }

    #[test]
    fn request_validation() {
        assert!(CurveRequest::new(0.01, 2.5, 100).is_ok());
        assert!(CurveRequest::new(0.5, 0.5, 1).is_ok());
        assert!(CurveRequest::new(-0.1, 2.5, 100).is_err());
        assert!(CurveRequest::new(2.0, 1.0, 100).is_err());
        assert!(CurveRequest::new(0.0, 1.0, 0).is_err());
        assert!(CurveRequest::new(0.0, f64::NAN, 10).is_err());
    }

    #[test]
    fn comparison_returns_both_models_in_order() {
        let cfg = config();
        let ctx = Context::new(cfg.grid_points).unwrap();
        let (lcdm, dut) = best_fit_variants(&cfg);
        let request = CurveRequest::from_config(&cfg).unwrap();
        let curves = run_comparison(&ctx, &lcdm, &dut, &request).unwrap();

        assert_eq!(curves.len(), 2);
        assert_eq!(curves[0].model, ModelKind::Baseline);
        assert_eq!(curves[1].model, ModelKind::Interacting);
        for curve in &curves {
            assert_eq!(curve.points.len(), 100);
            assert_eq!(curve.points[0].z, 0.01);
            assert_eq!(curve.points[99].z, 2.5);
            assert!(curve.points.windows(2).all(|w| w[1].z > w[0].z));
        }
        assert_eq!(ctx.cache.len(), 2);

        // A second request reuses both histories.
        run_comparison(&ctx, &lcdm, &dut, &request).unwrap();
        assert_eq!(ctx.cache.len(), 2);
    }

    #[test]
    fn range_past_the_grid_is_a_domain_error() {
        let ctx = Context::new(400).unwrap();
        let (lcdm, _) = best_fit_variants(&config());
        let request = CurveRequest::new(0.1, 6.0, 10).unwrap();
        let err = run_model(&ctx, &lcdm, &request).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn z_min_zero_is_rejected_through_distance_modulus() {
        let ctx = Context::new(400).unwrap();
        let (lcdm, _) = best_fit_variants(&config());
        let request = CurveRequest::new(0.0, 1.0, 5).unwrap();
        assert!(run_model(&ctx, &lcdm, &request).is_err());
    }

    #[test]
    fn invalid_parameters_surface_as_usage_error() {
        let ctx = Context::new(400).unwrap();
        let bad = ModelVariant::baseline(67.8, 1.5, 0.811);
        let err = ctx.model(&bad).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
