//! Per-employee tenure extraction.

use chrono::NaiveDate;
use tracing::debug;

use crate::domain::{EmployeeProfile, MonthWindow};

/// 0/1 per month window: was the employee at the target company during that window.
pub type TenureVector = Vec<u8>;

/// Normalized company identifier: the last non-empty path segment of a profile URL.
///
/// `https://www.linkedin.com/company/acme` and `https://www.linkedin.com/company/acme/`
/// both yield `acme`.
pub fn company_identifier(url: &str) -> &str {
    url.trim_end_matches('/').rsplit('/').next().unwrap_or("")
}

/// Closed-interval overlap: touching boundaries count as active.
pub fn active_during(window: &MonthWindow, starts_at: NaiveDate, ends_at: NaiveDate) -> bool {
    ends_at >= window.start && window.end >= starts_at
}

/// Mark every window overlapped by any of the employee's stints at `company_id`.
///
/// Entries without a company URL, for another company, or without a usable start date are
/// skipped. Ongoing positions run until `today`.
pub fn tenure_vector(
    profile: &EmployeeProfile,
    windows: &[MonthWindow],
    company_id: &str,
    today: NaiveDate,
) -> TenureVector {
    let mut tenure = vec![0u8; windows.len()];

    for exp in &profile.experiences {
        let Some(url) = exp.company_linkedin_profile_url.as_deref() else {
            continue;
        };
        if company_identifier(url) != company_id {
            continue;
        }
        let Some(starts_at) = exp.starts_at.and_then(|d| d.to_date()) else {
            debug!(company = company_id, "skipping experience without a usable start date");
            continue;
        };
        let ends_at = match exp.ends_at {
            Some(parts) => match parts.to_date() {
                Some(date) => date,
                None => {
                    debug!(company = company_id, ?parts, "skipping experience with an invalid end date");
                    continue;
                }
            },
            None => today,
        };

        for (slot, window) in tenure.iter_mut().zip(windows) {
            if active_during(window, starts_at, ends_at) {
                *slot = 1;
            }
        }
    }

    tenure
}
