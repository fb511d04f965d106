//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and installs logging
//! - parses CLI arguments into an `EvalConfig`
//! - evaluates curves through the shared pipeline
//! - prints tables/plots and writes optional exports

use clap::Parser;
use tracing::debug;

use crate::cli::{Cli, Command, CurvesArgs, DataArgs, EvalArgs, GrowthArgs, JsonArgs, OutputArgs, PlotArgs, RangeArgs, ResidualsArgs};
use crate::data::ObservationalData;
use crate::domain::{EvalConfig, ModelCurve, ModelKind};
use crate::error::AppError;
use crate::models::{BEST_FIT_BASELINE, BEST_FIT_INTERACTING, GrowthIndex, ModelVariant, best_fit};
use crate::report::{
    compute_residuals, format_curve_table, format_evidence, format_metrics, format_parameters, format_residuals,
    format_summary, published_evidence, published_metrics,
};

pub mod pipeline;

use pipeline::{Context, CurveRequest};

const DEFAULT_PLOT_WIDTH: usize = 100;
const DEFAULT_PLOT_HEIGHT: usize = 25;

/// Entry point for the `cosmo` binary.
pub fn run() -> Result<(), AppError> {
    // A missing .env is the common case.
    let _ = dotenvy::dotenv();
    // Already installed when embedded in another process; keep going either way.
    let _ = crate::logging::init_tracing();

    dispatch(Cli::parse())
}

/// Execute a parsed command line.
pub fn dispatch(cli: Cli) -> Result<(), AppError> {
    let grid_points = cli.grid_points;
    match cli.command {
        Command::Curves(args) => handle_curves(grid_points, args),
        Command::Eval(args) => handle_eval(grid_points, args),
        Command::Data(args) => handle_data(args),
        Command::Params(args) => handle_params(args),
        Command::Metrics(args) => handle_metrics(args),
        Command::Evidence(args) => handle_evidence(args),
        Command::Residuals(args) => handle_residuals(grid_points, args),
        Command::Plot(args) => handle_plot(grid_points, args),
        Command::Summary(args) => handle_summary(grid_points, args),
    }
}

fn handle_curves(grid_points: usize, args: CurvesArgs) -> Result<(), AppError> {
    let config = eval_config_from_args(grid_points, &args.range, &args.growth, Some(&args.output));
    let ctx = Context::new(config.grid_points)?;
    let request = CurveRequest::from_config(&config)?;

    let (lcdm, dut) = pipeline::best_fit_variants(&config);
    let curves = pipeline::run_comparison(&ctx, &lcdm, &dut, &request)?;
    debug!(n_points = request.n_points, cached = ctx.cache.len(), "curves evaluated");

    println!("{}", format_curve_table(&curves));
    emit_outputs(&ctx, &config, curves)
}

fn handle_eval(grid_points: usize, args: EvalArgs) -> Result<(), AppError> {
    let config = eval_config_from_args(grid_points, &args.range, &args.growth, Some(&args.output));
    let ctx = Context::new(config.grid_points)?;
    let request = CurveRequest::from_config(&config)?;

    let variant = variant_from_args(&args, config.growth);
    let curve = pipeline::run_model(&ctx, &variant, &request)?;

    println!("{}", format_curve_table(std::slice::from_ref(&curve)));
    emit_outputs(&ctx, &config, vec![curve])
}

fn handle_data(args: DataArgs) -> Result<(), AppError> {
    let data = ObservationalData::load()?;
    match &args.out {
        Some(path) => {
            crate::io::write_json(path, &data)?;
            eprintln!("Wrote {} data points to {}", data.total_points(), path.display());
        }
        None => println!("{}", crate::io::to_json_string(&data)?),
    }
    Ok(())
}

fn handle_params(args: JsonArgs) -> Result<(), AppError> {
    let fits = [&BEST_FIT_BASELINE, &BEST_FIT_INTERACTING];
    if args.json {
        println!("{}", crate::io::to_json_string(&fits)?);
    } else {
        print!("{}", format_parameters(&fits));
    }
    Ok(())
}

fn handle_metrics(args: JsonArgs) -> Result<(), AppError> {
    let metrics = published_metrics();
    if args.json {
        println!("{}", crate::io::to_json_string(&metrics)?);
    } else {
        print!("{}", format_metrics(&metrics));
    }
    Ok(())
}

fn handle_evidence(args: JsonArgs) -> Result<(), AppError> {
    let evidence = published_evidence();
    if args.json {
        println!("{}", crate::io::to_json_string(&evidence)?);
    } else {
        print!("{}", format_evidence(&evidence));
    }
    Ok(())
}

fn handle_residuals(grid_points: usize, args: ResidualsArgs) -> Result<(), AppError> {
    let ctx = Context::new(grid_points)?;
    let growth = growth_from_args(&args.growth);

    let kinds: Vec<ModelKind> = match args.model {
        Some(kind) => vec![kind],
        None => ModelKind::ALL.to_vec(),
    };

    let mut results = Vec::new();
    for kind in kinds {
        let model = ctx.model(&best_fit(kind).variant().with_growth(growth))?;
        for dataset in ctx.data.datasets() {
            if args.observable.is_some_and(|o| o != dataset.observable) {
                continue;
            }
            results.push(compute_residuals(&model, dataset)?);
        }
    }

    print!("{}", format_residuals(&results, args.top));
    Ok(())
}

fn handle_plot(grid_points: usize, args: PlotArgs) -> Result<(), AppError> {
    let ctx = Context::new(grid_points)?;

    let curves = match &args.curve {
        Some(path) => crate::io::read_curve_json(path)?.curves,
        None => {
            let config = eval_config_from_args(grid_points, &args.range, &args.growth, None);
            let request = CurveRequest::from_config(&config)?;
            let (lcdm, dut) = pipeline::best_fit_variants(&config);
            pipeline::run_comparison(&ctx, &lcdm, &dut, &request)?
        }
    };

    let data = (!args.no_data).then(|| ctx.data.dataset(args.observable));
    println!(
        "{}",
        crate::plot::render_comparison_plot(&curves, args.observable, data, args.width, args.height)
    );
    Ok(())
}

fn handle_summary(grid_points: usize, args: GrowthArgs) -> Result<(), AppError> {
    let ctx = Context::new(grid_points)?;
    let config = eval_config_from_args(grid_points, &default_range(), &args, None);

    println!("{}", format_summary(&ctx.data, &ctx.grid, &config));
    print!("{}", format_parameters(&[&BEST_FIT_BASELINE, &BEST_FIT_INTERACTING]));
    Ok(())
}

/// Plot and export according to `config`.
fn emit_outputs(ctx: &Context, config: &EvalConfig, curves: Vec<ModelCurve>) -> Result<(), AppError> {
    if let Some(observable) = config.plot {
        let plot = crate::plot::render_comparison_plot(
            &curves,
            observable,
            Some(ctx.data.dataset(observable)),
            config.plot_width,
            config.plot_height,
        );
        println!("{plot}");
    }

    if let Some(path) = &config.export_csv {
        crate::io::write_curves_csv(path, &curves)?;
    }
    if let Some(path) = &config.export_json {
        let file = crate::io::curve_file(curves, config.grid_points);
        crate::io::write_curve_json(path, &file)?;
    }

    Ok(())
}

fn growth_from_args(args: &GrowthArgs) -> GrowthIndex {
    GrowthIndex {
        baseline: args.gamma_baseline,
        interacting: args.gamma_interacting,
        ..GrowthIndex::default()
    }
}

fn default_range() -> RangeArgs {
    RangeArgs {
        z_min: 0.01,
        z_max: 2.5,
        n_points: 100,
    }
}

/// Map CLI args into an `EvalConfig`.
pub fn eval_config_from_args(
    grid_points: usize,
    range: &RangeArgs,
    growth: &GrowthArgs,
    output: Option<&OutputArgs>,
) -> EvalConfig {
    EvalConfig {
        grid_points,
        z_min: range.z_min,
        z_max: range.z_max,
        n_points: range.n_points,
        growth: growth_from_args(growth),
        plot: output.and_then(|o| o.plot),
        plot_width: output.map_or(DEFAULT_PLOT_WIDTH, |o| o.width),
        plot_height: output.map_or(DEFAULT_PLOT_HEIGHT, |o| o.height),
        export_csv: output.and_then(|o| o.export.clone()),
        export_json: output.and_then(|o| o.export_json.clone()),
    }
}

/// Best-fit parameters of `args.model` with any explicit overrides applied.
fn variant_from_args(args: &EvalArgs, growth: GrowthIndex) -> ModelVariant {
    let mut params = best_fit(args.model).parameters;
    if let Some(v) = args.h0 {
        params.h0 = v;
    }
    if let Some(v) = args.omega_m {
        params.omega_m = v;
    }
    if let Some(v) = args.w0 {
        params.w0 = v;
    }
    if let Some(v) = args.wa {
        params.wa = v;
    }
    if let Some(v) = args.xi {
        params.xi = v;
    }
    if let Some(v) = args.sigma8 {
        params.sigma8 = v;
    }
    ModelVariant::new(args.model, params).with_growth(growth)
}
