//! Command-line parsing for the `cosmo` binary.
//!
//! Argument parsing stays separate from command dispatch (`app`) and from the
//! numerical code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{ModelKind, Observable};
use crate::grid::DEFAULT_GRID_POINTS;
use crate::models::{GAMMA_BASELINE, GAMMA_INTERACTING};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "cosmo", version, about = "Expansion-history curves: ΛCDM vs interacting dark energy (DUT)")]
pub struct Cli {
    /// Points on the shared redshift grid (including the z=0 anchor).
    #[arg(long, global = true, env = "COSMO_GRID_POINTS", default_value_t = DEFAULT_GRID_POINTS)]
    pub grid_points: usize,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate both best-fit models and print the comparison tables.
    Curves(CurvesArgs),
    /// Evaluate one model with explicit parameters.
    Eval(EvalArgs),
    /// Dump the observational compilation as JSON.
    Data(DataArgs),
    /// Print the best-fit parameter sets.
    Params(JsonArgs),
    /// Print the published χ²/AIC/BIC comparison.
    Metrics(JsonArgs),
    /// Print the published Bayesian evidence and Bayes factor.
    Evidence(JsonArgs),
    /// Residual and pull diagnostics of the best-fit models against the data.
    Residuals(ResidualsArgs),
    /// ASCII plot of one observable for both models over the matching data.
    Plot(PlotArgs),
    /// Dataset sizes, grid resolution, and available models.
    Summary(GrowthArgs),
}

/// Evaluation range.
#[derive(Debug, Args, Clone)]
pub struct RangeArgs {
    /// Lowest redshift to evaluate.
    #[arg(long, default_value_t = 0.01)]
    pub z_min: f64,

    /// Highest redshift to evaluate.
    #[arg(long, default_value_t = 2.5)]
    pub z_max: f64,

    /// Number of evenly spaced redshifts in `[z_min, z_max]`.
    #[arg(short = 'n', long, default_value_t = 100)]
    pub n_points: usize,
}

/// Growth-index overrides.
#[derive(Debug, Args, Clone)]
pub struct GrowthArgs {
    /// Growth index γ for ΛCDM.
    #[arg(long, default_value_t = GAMMA_BASELINE)]
    pub gamma_baseline: f64,

    /// Growth index γ for DUT.
    #[arg(long, default_value_t = GAMMA_INTERACTING)]
    pub gamma_interacting: f64,
}

/// Terminal plot and export options.
#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    /// Render an ASCII plot of this observable after the tables.
    #[arg(long, value_enum)]
    pub plot: Option<Observable>,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Export curves to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export curves (parameters + points + metadata) to JSON.
    #[arg(long = "export-json")]
    pub export_json: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct CurvesArgs {
    #[command(flatten)]
    pub range: RangeArgs,

    #[command(flatten)]
    pub growth: GrowthArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Options for evaluating a custom parameter set.
///
/// Unset parameters fall back to the model's published best fit.
#[derive(Debug, Args, Clone)]
pub struct EvalArgs {
    /// Which model policy to apply.
    #[arg(long, value_enum, default_value_t = ModelKind::Interacting)]
    pub model: ModelKind,

    /// Hubble constant (km/s/Mpc).
    #[arg(long)]
    pub h0: Option<f64>,

    /// Present-day matter density Ωm.
    #[arg(long)]
    pub omega_m: Option<f64>,

    /// CPL w0 (ignored for baseline).
    #[arg(long, allow_hyphen_values = true)]
    pub w0: Option<f64>,

    /// CPL wa (ignored for baseline).
    #[arg(long, allow_hyphen_values = true)]
    pub wa: Option<f64>,

    /// Interaction strength ξ (ignored for baseline).
    #[arg(long, allow_hyphen_values = true)]
    pub xi: Option<f64>,

    /// Clustering amplitude σ8.
    #[arg(long)]
    pub sigma8: Option<f64>,

    #[command(flatten)]
    pub range: RangeArgs,

    #[command(flatten)]
    pub growth: GrowthArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args, Clone)]
pub struct DataArgs {
    /// Write to this file instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct JsonArgs {
    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct ResidualsArgs {
    /// Restrict to one model (default: both).
    #[arg(long, value_enum)]
    pub model: Option<ModelKind>,

    /// Restrict to one probe, selected by the observable it measures (default: all).
    #[arg(long, value_enum)]
    pub observable: Option<Observable>,

    /// Show the N largest pulls per probe.
    #[arg(long, default_value_t = 5)]
    pub top: usize,

    #[command(flatten)]
    pub growth: GrowthArgs,
}

/// Options for plotting.
#[derive(Debug, Args, Clone)]
pub struct PlotArgs {
    /// Observable to plot.
    #[arg(long, value_enum, default_value_t = Observable::Mu)]
    pub observable: Observable,

    /// Curve JSON produced by `cosmo curves --export-json`; evaluated fresh when omitted.
    #[arg(long, value_name = "JSON")]
    pub curve: Option<PathBuf>,

    /// Do not overlay the observational data.
    #[arg(long)]
    pub no_data: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    #[command(flatten)]
    pub range: RangeArgs,

    #[command(flatten)]
    pub growth: GrowthArgs,
}
