//! Command-line parsing for the headcount trend estimator.
//!
//! The goal of this module is to keep **argument parsing** separate from the pipeline.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::domain::{DEFAULT_CONCURRENCY, DEFAULT_MONTH_COUNT, DEFAULT_SAMPLE_LIMIT};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "headcount", version, about = "Historic employee headcount estimator")]
pub struct Cli {
    /// Increase log verbosity on stderr (-v info, -vv debug). `RUST_LOG` overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Estimate monthly headcount and print `date,total_employees` CSV.
    Estimate(EstimateArgs),
    /// Plot a previously exported report JSON.
    Plot(PlotArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct EstimateArgs {
    /// Company profile URL, e.g. https://www.linkedin.com/company/acme
    pub company_url: String,

    /// API key; falls back to PROXYCURL_API_KEY (environment or .env).
    #[arg(long)]
    pub api_key: Option<String>,

    /// Number of full calendar months to look back.
    #[arg(short = 'm', long, default_value_t = DEFAULT_MONTH_COUNT)]
    pub months: u32,

    /// Maximum number of profiles to fetch (-1 for all candidates).
    #[arg(short = 'l', long, default_value_t = DEFAULT_SAMPLE_LIMIT, allow_negative_numbers = true)]
    pub limit: i64,

    /// Seed for profile sampling (random if omitted).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Concurrent profile lookups.
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Follow every page of the employee listing (slow, costs credits).
    #[arg(long)]
    pub all_pages: bool,

    /// Listing page size.
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Also write the CSV to a file.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Write the full run report as JSON.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,

    /// Render an ASCII plot and run summary on stderr.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 16)]
    pub height: usize,
}

/// Options for plotting a saved report.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Report JSON file produced by `headcount estimate --export-json`.
    #[arg(long, value_name = "JSON")]
    pub report: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 16)]
    pub height: usize,
}
