//! The estimation pipeline, independent of how data is fetched or shown.
//!
//! current count -> candidate URLs -> sample -> profiles -> tenures -> raw series -> rescale
//!
//! The CLI passes a `ProxycurlClient`; tests pass an in-memory `EmployeeSource`.

use chrono::NaiveDate;
use rand::Rng;
use tracing::info;

use crate::data::EmployeeSource;
use crate::domain::{EstimateConfig, HeadcountPoint, HeadcountReport, MonthWindow};
use crate::error::AppError;
use crate::trend::{
    AdjustedSeries, RawMonthlySeries, aggregate_tenures, build_month_windows, company_identifier, rescale,
    sample_urls, scale_factor,
};

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub windows: Vec<MonthWindow>,
    pub raw: RawMonthlySeries,
    pub adjusted: AdjustedSeries,
    pub report: HeadcountReport,
}

/// Execute the full pipeline against `source`.
///
/// Fails before any listing or profile requests when the current count is zero.
pub fn run_estimate<S, R>(
    source: &S,
    config: &EstimateConfig,
    today: NaiveDate,
    rng: &mut R,
) -> Result<RunOutput, AppError>
where
    S: EmployeeSource + ?Sized,
    R: Rng + ?Sized,
{
    config.validate()?;
    let windows = build_month_windows(config.month_count, today)?;

    // 1) Anchor numerator.
    let current_total = source.current_employee_count(&config.company_url)?;
    if current_total == 0 {
        return Err(AppError::no_current_data(&config.company_url));
    }

    // 2) Candidates and sample.
    let candidates = source.employee_profile_urls(&config.company_url)?;
    let sampled = sample_urls(&candidates, config.sample_limit, rng);
    info!(candidates = candidates.len(), sampled = sampled.len(), "sampled candidate profiles");

    // 3) Profiles.
    let lookups = source.fetch_profiles(&sampled);
    let resolved = lookups.iter().filter(|l| l.profile().is_some()).count();

    // 4) Tenures and rescaling.
    let company_id = company_identifier(&config.company_url);
    let raw = aggregate_tenures(&lookups, &windows, company_id, today);
    let adjusted = rescale(&raw, current_total);
    info!(
        resolved,
        anchor = raw[0],
        current_total,
        scale = scale_factor(&raw, current_total).unwrap_or(0.0),
        "rescaled headcount trend"
    );

    let report = HeadcountReport {
        tool: "headcount".to_string(),
        company_url: config.company_url.clone(),
        asof_date: today,
        current_total,
        anchor: raw[0],
        candidates: candidates.len(),
        sampled: sampled.len(),
        resolved,
        points: headcount_points(&windows, &adjusted),
    };

    Ok(RunOutput {
        windows,
        raw,
        adjusted,
        report,
    })
}

/// Pair each full month's end date with its estimate, newest first, skipping the anchor.
pub fn headcount_points(windows: &[MonthWindow], adjusted: &[u64]) -> Vec<HeadcountPoint> {
    windows
        .iter()
        .zip(adjusted)
        .skip(1)
        .map(|(w, &total_employees)| HeadcountPoint {
            date: w.end,
            total_employees,
        })
        .collect()
}
