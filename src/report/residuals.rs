//! Model-vs-data residual diagnostics.
//!
//! For each data point we report the model prediction, the residual
//! (`observed - predicted`) and the pull (`residual / err`). This is a diagnostic
//! view only; nothing here is minimised.

use serde::Serialize;

use crate::data::Dataset;
use crate::domain::{ModelKind, Observable};
use crate::error::CosmoResult;
use crate::models::Model;
use crate::observables::evaluate;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Residual {
    pub z: f64,
    pub observed: f64,
    pub err: f64,
    pub predicted: f64,
    pub residual: f64,
    pub pull: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProbeResiduals {
    pub probe: &'static str,
    pub observable: Observable,
    pub model: ModelKind,
    pub rows: Vec<Residual>,
    pub rms_pull: f64,
}

/// Compare `model` against every point of `dataset`.
pub fn compute_residuals(model: &Model, dataset: &Dataset) -> CosmoResult<ProbeResiduals> {
    let mut rows = Vec::with_capacity(dataset.len());
    for (z, observed, err) in dataset.points() {
        let predicted = evaluate(model, dataset.observable, z)?;
        let residual = observed - predicted;
        rows.push(Residual {
            z,
            observed,
            err,
            predicted,
            residual,
            pull: residual / err,
        });
    }

    let rms_pull = if rows.is_empty() {
        0.0
    } else {
        (rows.iter().map(|r| r.pull * r.pull).sum::<f64>() / rows.len() as f64).sqrt()
    };

    Ok(ProbeResiduals {
        probe: dataset.probe,
        observable: dataset.observable,
        model: model.kind(),
        rows,
        rms_pull,
    })
}

/// The `top_n` points with the largest absolute pull, largest first.
pub fn rank_outliers(residuals: &ProbeResiduals, top_n: usize) -> Vec<Residual> {
    let mut sorted = residuals.rows.clone();
    sorted.sort_by(|a, b| {
        b.pull
            .abs()
            .partial_cmp(&a.pull.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    sorted.truncate(top_n);
    sorted
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::grid::RedshiftGrid;
    use crate::models::ModelVariant;

    fn model() -> Model {
        ModelVariant::baseline(67.8, 0.315, 0.811)
            .instantiate_uncached(Arc::new(RedshiftGrid::new(500).unwrap()))
            .unwrap()
    }

    #[test]
    fn residuals_follow_the_model() {
        let m = model();
        let h1 = m.history().hubble(1.0).unwrap();
        let ds = Dataset::new(
            "toy",
            Observable::Hubble,
            vec![0.0, 1.0],
            vec![67.8, h1 + 10.0],
            vec![1.0, 5.0],
        )
        .unwrap();

        let res = compute_residuals(&m, &ds).unwrap();
        assert_eq!(res.rows.len(), 2);
        assert!(res.rows[0].residual.abs() < 1e-12);
        assert!((res.rows[1].residual - 10.0).abs() < 1e-9);
        assert!((res.rows[1].pull - 2.0).abs() < 1e-9);
        assert!((res.rms_pull - (2.0f64).sqrt()).abs() < 1e-9);
        assert_eq!(res.model, ModelKind::Baseline);
    }

    #[test]
    fn outliers_are_ranked_by_absolute_pull() {
        let m = model();
        let ds = Dataset::new(
            "toy",
            Observable::Hubble,
            vec![0.0, 0.0, 0.0],
            vec![67.8 + 1.0, 67.8 - 3.0, 67.8 + 2.0],
            vec![1.0, 1.0, 1.0],
        )
        .unwrap();
        let res = compute_residuals(&m, &ds).unwrap();
        let top = rank_outliers(&res, 2);
        assert_eq!(top.len(), 2);
        assert!((top[0].pull + 3.0).abs() < 1e-9);
        assert!((top[1].pull - 2.0).abs() < 1e-9);
    }

    #[test]
    fn residuals_propagate_domain_errors() {
        let m = model();
        let ds = Dataset::new("toy", Observable::Dv, vec![6.0], vec![1.0], vec![1.0]).unwrap();
        assert!(compute_residuals(&m, &ds).is_err());
    }
}
