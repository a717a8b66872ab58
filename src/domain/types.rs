//! Shared domain types.
//!
//! Records mirror the people-data API's JSON so they deserialize directly; outputs are
//! serializable so a run can be exported as JSON.

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Default look-back, in full calendar months.
pub const DEFAULT_MONTH_COUNT: u32 = 36;
/// Default number of profiles to sample from the candidate list.
pub const DEFAULT_SAMPLE_LIMIT: i64 = 3000;
/// Sample limit meaning "use every candidate".
pub const UNLIMITED: i64 = -1;
/// Default number of concurrent profile lookups.
pub const DEFAULT_CONCURRENCY: usize = 10;

/// An inclusive calendar bucket `[start, end]`.
///
/// Windows are ordered newest-first. Index 0 is the partial current month (1st through
/// today) and only serves as the scaling anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl MonthWindow {
    pub fn day_count(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// A date as the API reports it (`{"day": 1, "month": 6, "year": 2021}`).
///
/// Any part may be `null` or missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateParts {
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub month: Option<u32>,
    #[serde(default)]
    pub day: Option<u32>,
}

impl DateParts {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self {
            year: Some(year),
            month: Some(month),
            day: Some(day),
        }
    }

    /// Missing month or day means the 1st; `None` without a year or when the parts do not
    /// name a real Gregorian date.
    pub fn to_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year?, self.month.unwrap_or(1), self.day.unwrap_or(1))
    }
}

impl From<NaiveDate> for DateParts {
    fn from(date: NaiveDate) -> Self {
        use chrono::Datelike;
        Self::new(date.year(), date.month(), date.day())
    }
}

/// One work-history entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    #[serde(default)]
    pub company_linkedin_profile_url: Option<String>,
    #[serde(default)]
    pub starts_at: Option<DateParts>,
    /// `None` means the position is ongoing.
    #[serde(default)]
    pub ends_at: Option<DateParts>,
}

/// A resolved employee profile; only the work history is needed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    #[serde(default)]
    pub experiences: Vec<Experience>,
}

/// Outcome of a single profile lookup in a bulk fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileLookup {
    Found(EmployeeProfile),
    /// Not found, or the lookup failed; expected for a share of any sample.
    Absent,
}

impl ProfileLookup {
    pub fn profile(&self) -> Option<&EmployeeProfile> {
        match self {
            ProfileLookup::Found(profile) => Some(profile),
            ProfileLookup::Absent => None,
        }
    }
}

/// Validated run configuration.
#[derive(Debug, Clone)]
pub struct EstimateConfig {
    pub company_url: String,
    pub month_count: u32,
    /// `None` means every candidate is fetched.
    pub sample_limit: Option<usize>,
    pub seed: Option<u64>,
    pub concurrency: usize,
    pub all_pages: bool,
    pub page_size: Option<u32>,
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
    pub export_csv: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}

impl EstimateConfig {
    /// Config with defaults for everything but the company.
    pub fn for_company(company_url: impl Into<String>) -> Self {
        Self {
            company_url: company_url.into(),
            month_count: DEFAULT_MONTH_COUNT,
            sample_limit: Some(DEFAULT_SAMPLE_LIMIT as usize),
            seed: None,
            concurrency: DEFAULT_CONCURRENCY,
            all_pages: false,
            page_size: None,
            plot: false,
            plot_width: 72,
            plot_height: 16,
            export_csv: None,
            export_json: None,
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.company_url.trim().is_empty() {
            return Err(AppError::new(2, "Company URL must not be empty."));
        }
        if self.month_count == 0 {
            return Err(AppError::new(2, "Month count must be >= 1."));
        }
        if self.concurrency == 0 {
            return Err(AppError::new(2, "Concurrency must be >= 1."));
        }
        if self.page_size == Some(0) {
            return Err(AppError::new(2, "Page size must be >= 1."));
        }
        Ok(())
    }
}

/// Convert the CLI's signed limit (`-1` = unlimited) into an optional cap.
pub fn sample_limit_from_arg(limit: i64) -> Result<Option<usize>, AppError> {
    match limit {
        UNLIMITED => Ok(None),
        l if l < UNLIMITED => Err(AppError::new(
            2,
            format!("Invalid sample limit {l}; use -1 for unlimited."),
        )),
        l => usize::try_from(l)
            .map(Some)
            .map_err(|_| AppError::new(2, format!("Sample limit {l} is too large."))),
    }
}

/// One output row: headcount at the end of a full calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadcountPoint {
    pub date: NaiveDate,
    pub total_employees: u64,
}

/// Everything a run produced, in a shape suitable for JSON export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadcountReport {
    pub tool: String,
    pub company_url: String,
    pub asof_date: NaiveDate,
    pub current_total: u64,
    /// Raw sampled count for the partial current month.
    pub anchor: u64,
    pub candidates: usize,
    pub sampled: usize,
    pub resolved: usize,
    /// Newest first; the partial current month is not included.
    pub points: Vec<HeadcountPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_parts_deserialize_from_api_shape() {
        let parts: DateParts = serde_json::from_str(r#"{"day": 15, "month": 3, "year": 2021}"#).unwrap();
        assert_eq!(parts.to_date(), NaiveDate::from_ymd_opt(2021, 3, 15));

        let partial: DateParts = serde_json::from_str(r#"{"year": 2019}"#).unwrap();
        assert_eq!(partial.to_date(), NaiveDate::from_ymd_opt(2019, 1, 1));

        let null_day: DateParts = serde_json::from_str(r#"{"day": null, "month": 3, "year": 2015}"#).unwrap();
        assert_eq!(null_day.to_date(), NaiveDate::from_ymd_opt(2015, 3, 1));

        let no_year: DateParts = serde_json::from_str(r#"{"day": 4, "month": 3, "year": null}"#).unwrap();
        assert_eq!(no_year.to_date(), None);

        assert_eq!(DateParts::new(2023, 2, 30).to_date(), None);
    }

    #[test]
    fn profile_tolerates_nulls_and_extra_fields() {
        let raw = r#"{
            "full_name": "Jane Doe",
            "experiences": [
                {"company": "Acme", "company_linkedin_profile_url": null, "starts_at": null, "ends_at": null},
                {"company_linkedin_profile_url": "https://www.linkedin.com/company/acme/",
                 "starts_at": {"day": 1, "month": 1, "year": 2020}, "ends_at": null}
            ]
        }"#;
        let profile: EmployeeProfile = serde_json::from_str(raw).unwrap();
        assert_eq!(profile.experiences.len(), 2);
        assert!(profile.experiences[0].company_linkedin_profile_url.is_none());
        assert!(profile.experiences[1].ends_at.is_none());

        let empty: EmployeeProfile = serde_json::from_str("{}").unwrap();
        assert!(empty.experiences.is_empty());
    }

    #[test]
    fn null_date_part_in_one_entry_keeps_the_employee() {
        let raw = r#"{"experiences": [
            {"company_linkedin_profile_url": "https://www.linkedin.com/company/other",
             "starts_at": {"day": null, "month": 3, "year": 2015}, "ends_at": {"day": null, "month": null, "year": null}},
            {"company_linkedin_profile_url": "https://www.linkedin.com/company/acme",
             "starts_at": {"day": 1, "month": 1, "year": 2020}, "ends_at": null}
        ]}"#;
        let profile: EmployeeProfile = serde_json::from_str(raw).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let windows = crate::trend::build_month_windows(3, today).unwrap();
        assert_eq!(crate::trend::tenure_vector(&profile, &windows, "acme", today), vec![1, 1, 1, 1]);
    }

    #[test]
    fn sample_limit_arg_conversion() {
        assert_eq!(sample_limit_from_arg(-1).unwrap(), None);
        assert_eq!(sample_limit_from_arg(0).unwrap(), Some(0));
        assert_eq!(sample_limit_from_arg(3000).unwrap(), Some(3000));
        assert!(sample_limit_from_arg(-2).is_err());
    }

    #[test]
    fn config_validation_rejects_bad_values() {
        let ok = EstimateConfig::for_company("https://www.linkedin.com/company/acme");
        assert!(ok.validate().is_ok());

        let mut bad = ok.clone();
        bad.month_count = 0;
        assert!(bad.validate().is_err());

        let mut bad = ok.clone();
        bad.concurrency = 0;
        assert!(bad.validate().is_err());

        let mut bad = ok;
        bad.company_url = "  ".to_string();
        assert!(bad.validate().is_err());
    }
}
