//! Plain-text tables for terminal output.

use crate::data::ObservationalData;
use crate::domain::{EvalConfig, ModelCurve, ModelKind};
use crate::grid::RedshiftGrid;
use crate::models::BestFit;
use crate::report::published::{PublishedEvidence, PublishedMetrics, interpretation};
use crate::report::residuals::{ProbeResiduals, rank_outliers};

/// Startup-style banner: dataset sizes, grid resolution, models on offer.
pub fn format_summary(data: &ObservationalData, grid: &RedshiftGrid, config: &EvalConfig) -> String {
    let mut out = String::new();

    out.push_str("=== cosmo - Expansion History Curves ===\n");
    out.push_str("Datasets:\n");
    for ds in data.datasets() {
        out.push_str(&format!(
            "- {:<10} {:>5} points | {}\n",
            ds.probe,
            ds.len(),
            ds.observable.label()
        ));
    }
    out.push_str(&format!("  total: {} points\n", data.total_points()));

    out.push_str(&format!(
        "Grid: n={} | z=[{:.3}, {:.3}]\n",
        grid.len(),
        grid.z_min(),
        grid.z_max()
    ));
    out.push_str(&format!(
        "Growth index: gamma_lcdm={:.3} gamma_dut={:.3}\n",
        config.growth.baseline, config.growth.interacting
    ));
    out.push_str(&format!(
        "Models: {}\n",
        ModelKind::ALL
            .iter()
            .map(|k| k.display_name())
            .collect::<Vec<_>>()
            .join(", ")
    ));
    out
}

/// One table per model: `z, H, Dc, DL, mu, D_V, fs8`.
pub fn format_curve_table(curves: &[ModelCurve]) -> String {
    let mut out = String::new();

    for curve in curves {
        let p = &curve.parameters;
        out.push_str(&format!(
            "{} (H0={:.2}, Om={:.3}, w0={:.3}, wa={:.3}, xi={:.3}, s8={:.3}, gamma={:.2})\n",
            curve.model.display_name(),
            p.h0,
            p.omega_m,
            p.w0,
            p.wa,
            p.xi,
            p.sigma8,
            curve.gamma
        ));
        out.push_str(
            format!(
                "{:>8} {:>10} {:>12} {:>12} {:>9} {:>12} {:>8}",
                "z", "H", "Dc[Mpc]", "DL[Mpc]", "mu", "D_V[Mpc]", "fs8"
            )
            .trim_end(),
        );
        out.push('\n');
        out.push_str(&format!(
            "{:-<8} {:-<10} {:-<12} {:-<12} {:-<9} {:-<12} {:-<8}\n",
            "", "", "", "", "", "", ""
        ));
        for pt in &curve.points {
            out.push_str(&format!(
                "{:>8.4} {:>10.3} {:>12.2} {:>12.2} {:>9.4} {:>12.2} {:>8.5}\n",
                pt.z, pt.h, pt.dc, pt.dl, pt.mu, pt.dv, pt.fs8
            ));
        }
        out.push('\n');
    }

    out
}

pub fn format_parameters(fits: &[&BestFit]) -> String {
    let mut out = String::new();
    out.push_str("Best-fit parameters:\n");
    for fit in fits {
        let p = &fit.parameters;
        out.push_str(&format!(
            "- {} ({} params): {}\n",
            fit.model.display_name(),
            fit.n_params,
            fit.description
        ));
        out.push_str(&format!("    H0      = {:.2} km/s/Mpc\n", p.h0));
        out.push_str(&format!("    Omega_m = {:.3}\n", p.omega_m));
        if fit.model == ModelKind::Interacting {
            out.push_str(&format!("    w0      = {:.3}\n", p.w0));
            out.push_str(&format!("    wa      = {:.3}\n", p.wa));
            out.push_str(&format!("    xi      = {:.3}\n", p.xi));
        }
        out.push_str(&format!("    sigma8  = {:.3}\n", p.sigma8));
    }
    out
}

pub fn format_metrics(metrics: &PublishedMetrics) -> String {
    let mut out = String::new();
    out.push_str(&format!("Fit statistics (n_data={}):\n", metrics.n_data));
    for stat in [&metrics.baseline, &metrics.interacting] {
        out.push_str(&format!(
            "  {:<6} chi2={:.1} k={} chi2/dof={:.4}\n",
            stat.model.display_name(),
            stat.chi2_min,
            stat.n_params,
            stat.chi2_dof
        ));
    }
    out.push_str(&format!(
        "Comparison (DUT - ΛCDM): Δχ²={:+.1} ΔAIC={:+.1} ΔBIC={:+.1}\n",
        metrics.delta_chi2, metrics.delta_aic, metrics.delta_bic
    ));
    for (criterion, verdict) in interpretation(metrics) {
        out.push_str(&format!("  {criterion:<4} {verdict}\n"));
    }
    out
}

pub fn format_evidence(evidence: &PublishedEvidence) -> String {
    let mut out = String::new();
    out.push_str("Bayesian evidence:\n");
    for e in [&evidence.baseline, &evidence.interacting] {
        out.push_str(&format!(
            "  {:<6} ln Z = {:.2} ± {:.2}\n",
            e.model.display_name(),
            e.log_evidence,
            e.log_evidence_err
        ));
    }
    out.push_str(&format!(
        "ln(B) = {:.2} | B = {:.1}\n",
        evidence.log_bayes_factor, evidence.bayes_factor
    ));
    out.push_str(&format!("Jeffreys scale: {}\n", evidence.jeffreys_scale));
    out.push_str(&format!("Preferred: {}\n", evidence.preferred.display_name()));
    out
}

/// Per-probe pull summaries plus the `top_n` largest pulls of each.
pub fn format_residuals(results: &[ProbeResiduals], top_n: usize) -> String {
    let mut out = String::new();

    for res in results {
        out.push_str(&format!(
            "{} vs {} ({} points): rms pull={:.3}\n",
            res.model.display_name(),
            res.probe,
            res.rows.len(),
            res.rms_pull
        ));
        if top_n == 0 {
            continue;
        }
        out.push_str(
            format!(
                "  {:>8} {:>12} {:>12} {:>10} {:>8}",
                "z", "observed", "predicted", "residual", "pull"
            )
            .trim_end(),
        );
        out.push('\n');
        for r in rank_outliers(res, top_n) {
            out.push_str(&format!(
                "  {:>8.4} {:>12.4} {:>12.4} {:>+10.4} {:>+8.2}\n",
                r.z, r.observed, r.predicted, r.residual, r.pull
            ));
        }
    }

    out
}
