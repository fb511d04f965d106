//! Published model-comparison numbers.
//!
//! χ², information criteria, and Bayesian evidences come from an external
//! nested-sampling analysis. They are reported verbatim; the only things derived here
//! are χ²/dof and the Jeffreys-scale wording.

use serde::Serialize;

use crate::domain::ModelKind;

/// Data-point count the published χ² values were computed with (SNe + H(z) + fσ8 + BAO).
pub const PUBLISHED_N_DATA: usize = 1048 + 49 + 28 + 8;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitStatistic {
    pub model: ModelKind,
    pub chi2_min: f64,
    pub n_params: usize,
    pub chi2_dof: f64,
}

impl FitStatistic {
    fn new(model: ModelKind, chi2_min: f64) -> Self {
        let n_params = model.param_count();
        Self {
            model,
            chi2_min,
            n_params,
            chi2_dof: chi2_min / (PUBLISHED_N_DATA - n_params) as f64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PublishedMetrics {
    pub n_data: usize,
    pub baseline: FitStatistic,
    pub interacting: FitStatistic,
    pub delta_chi2: f64,
    pub delta_aic: f64,
    pub delta_bic: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EvidenceEntry {
    pub model: ModelKind,
    pub log_evidence: f64,
    pub log_evidence_err: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PublishedEvidence {
    pub baseline: EvidenceEntry,
    pub interacting: EvidenceEntry,
    pub log_bayes_factor: f64,
    pub bayes_factor: f64,
    pub jeffreys_scale: &'static str,
    pub preferred: ModelKind,
}

pub fn published_metrics() -> PublishedMetrics {
    PublishedMetrics {
        n_data: PUBLISHED_N_DATA,
        baseline: FitStatistic::new(ModelKind::Baseline, 2891.1),
        interacting: FitStatistic::new(ModelKind::Interacting, 2883.5),
        delta_chi2: -7.6,
        delta_aic: -1.6,
        delta_bic: 8.9,
    }
}

pub fn published_evidence() -> PublishedEvidence {
    let log_bayes_factor = 4.14;
    PublishedEvidence {
        baseline: EvidenceEntry {
            model: ModelKind::Baseline,
            log_evidence: -1456.32,
            log_evidence_err: 0.15,
        },
        interacting: EvidenceEntry {
            model: ModelKind::Interacting,
            log_evidence: -1452.18,
            log_evidence_err: 0.18,
        },
        log_bayes_factor,
        bayes_factor: 62.8,
        jeffreys_scale: jeffreys_scale(log_bayes_factor),
        preferred: if log_bayes_factor >= 0.0 {
            ModelKind::Interacting
        } else {
            ModelKind::Baseline
        },
    }
}

/// Jeffreys-scale wording for `|ln B|`.
pub fn jeffreys_scale(log_bayes_factor: f64) -> &'static str {
    let b = log_bayes_factor.abs();
    if b < 1.0 {
        "Inconclusive (|ln(B)| < 1)"
    } else if b < 2.5 {
        "Weak evidence (1 < |ln(B)| < 2.5)"
    } else if b < 5.0 {
        "Strong evidence (|ln(B)| > 2.5)"
    } else {
        "Decisive evidence (|ln(B)| > 5)"
    }
}

/// Verdicts per criterion, in the sign convention `interacting - baseline`.
pub fn interpretation(metrics: &PublishedMetrics) -> [(&'static str, String); 3] {
    let favour = |delta: f64| {
        if delta < 0.0 {
            ModelKind::Interacting.display_name()
        } else {
            ModelKind::Baseline.display_name()
        }
    };
    [
        (
            "chi2",
            format!("{} fits better (Δχ² = {:+.1})", favour(metrics.delta_chi2), metrics.delta_chi2),
        ),
        (
            "aic",
            format!("{} preferred (ΔAIC = {:+.1})", favour(metrics.delta_aic), metrics.delta_aic),
        ),
        (
            "bic",
            format!("{} preferred (ΔBIC = {:+.1})", favour(metrics.delta_bic), metrics.delta_bic),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chi2_dof_uses_published_data_count() {
        let m = published_metrics();
        assert_eq!(m.n_data, 1133);
        assert!((m.baseline.chi2_dof - 2891.1 / 1130.0).abs() < 1e-12);
        assert!((m.interacting.chi2_dof - 2883.5 / 1127.0).abs() < 1e-12);
    }

    #[test]
    fn evidence_verdict_matches_bayes_factor() {
        let e = published_evidence();
        assert_eq!(e.preferred, ModelKind::Interacting);
        assert!(e.jeffreys_scale.starts_with("Strong"));
        assert!((e.log_bayes_factor - (e.interacting.log_evidence - e.baseline.log_evidence)).abs() < 1e-9);
    }

    #[test]
    fn jeffreys_scale_thresholds() {
        assert!(jeffreys_scale(0.3).starts_with("Inconclusive"));
        assert!(jeffreys_scale(-1.5).starts_with("Weak"));
        assert!(jeffreys_scale(6.0).starts_with("Decisive"));
    }

    #[test]
    fn interpretation_signs() {
        let verdicts = interpretation(&published_metrics());
        assert!(verdicts[0].1.starts_with("DUT"));
        assert!(verdicts[2].1.starts_with("ΛCDM"));
    }
}
