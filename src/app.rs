//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and sets up logging
//! - builds the API client
//! - runs the estimation pipeline
//! - prints the CSV (stdout) and optional plot/summary (stderr)
//! - writes optional exports

use chrono::Local;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, EstimateArgs, PlotArgs};
use crate::data::ProxycurlClient;
use crate::domain::{EstimateConfig, sample_limit_from_arg};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `headcount` binary.
pub fn run() -> Result<(), AppError> {
    // `headcount <url> ...` behaves like `headcount estimate <url> ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);
    init_logging(cli.verbose);

    match cli.command {
        Command::Estimate(args) => handle_estimate(args),
        Command::Plot(args) => handle_plot(args),
    }
}

/// Log to stderr so stdout stays machine-readable CSV.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // A second initialization (e.g. from tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_estimate(args: EstimateArgs) -> Result<(), AppError> {
    let config = config_from_args(&args)?;
    config.validate()?;

    let client = ProxycurlClient::from_key_or_env(args.api_key.clone())?
        .with_concurrency(config.concurrency)
        .with_all_pages(config.all_pages)
        .with_page_size(config.page_size);

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let today = Local::now().date_naive();
    info!(company_url = %config.company_url, months = config.month_count, %today, "estimating headcount");

    let run = pipeline::run_estimate(&client, &config, today, &mut rng)?;

    println!("{}", crate::report::format_csv(&run.report.points));

    if config.plot {
        eprintln!("{}", crate::report::format_run_summary(&run.report));
        eprint!(
            "{}",
            crate::plot::render_trend_plot(&run.report.points, config.plot_width, config.plot_height)
        );
    }

    if let Some(path) = &config.export_csv {
        crate::io::export::write_series_csv(path, &run.report.points)?;
    }
    if let Some(path) = &config.export_json {
        crate::io::report::write_report_json(path, &run.report)?;
    }

    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let report = crate::io::report::read_report_json(&args.report)?;
    println!("{}", crate::report::format_run_summary(&report));
    print!("{}", crate::plot::render_trend_plot(&report.points, args.width, args.height));
    Ok(())
}

pub fn config_from_args(args: &EstimateArgs) -> Result<EstimateConfig, AppError> {
    Ok(EstimateConfig {
        company_url: args.company_url.clone(),
        month_count: args.months,
        sample_limit: sample_limit_from_arg(args.limit)?,
        seed: args.seed,
        concurrency: args.concurrency,
        all_pages: args.all_pages,
        page_size: args.page_size,
        plot: args.plot,
        plot_width: args.width,
        plot_height: args.height,
        export_csv: args.export.clone(),
        export_json: args.export_json.clone(),
    })
}

/// Rewrite argv so `headcount <url>` defaults to `headcount estimate <url>`.
///
/// Rules:
/// - `headcount <url> ...`            -> `headcount estimate <url> ...`
/// - `headcount -v <url> ...`         -> `headcount -v estimate <url> ...`
/// - subcommands, `--help/--version`  -> unchanged
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    // Skip leading verbosity flags; they are global.
    let first = argv
        .iter()
        .skip(1)
        .position(|a| !is_verbose_flag(a))
        .map(|p| p + 1);
    let Some(idx) = first else {
        return argv;
    };

    let arg = argv[idx].as_str();
    let is_help_or_version = matches!(arg, "-h" | "--help" | "-V" | "--version" | "help");
    let is_subcommand = matches!(arg, "estimate" | "plot");
    if is_help_or_version || is_subcommand {
        return argv;
    }

    argv.insert(idx, "estimate".to_string());
    argv
}

fn is_verbose_flag(arg: &str) -> bool {
    arg == "--verbose" || (arg.len() > 1 && arg.starts_with('-') && arg[1..].chars().all(|c| c == 'v'))
}
