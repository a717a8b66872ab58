//! Sum tenure vectors across the sampled employees.

use chrono::NaiveDate;
use tracing::debug;

use crate::domain::{MonthWindow, ProfileLookup};
use crate::trend::tenure::tenure_vector;

/// Sampled headcount per month window (same order as the windows).
pub type RawMonthlySeries = Vec<u64>;

/// Count, for every window, how many resolved profiles were at `company_id`.
///
/// Absent lookups contribute nothing; the result does not depend on input order.
pub fn aggregate_tenures(
    lookups: &[ProfileLookup],
    windows: &[MonthWindow],
    company_id: &str,
    today: NaiveDate,
) -> RawMonthlySeries {
    let mut totals = vec![0u64; windows.len()];
    let mut absent = 0usize;

    for lookup in lookups {
        let Some(profile) = lookup.profile() else {
            absent += 1;
            continue;
        };
        let tenure = tenure_vector(profile, windows, company_id, today);
        for (total, active) in totals.iter_mut().zip(tenure) {
            *total += u64::from(active);
        }
    }

    debug!(profiles = lookups.len(), absent, "aggregated tenures");
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DateParts, EmployeeProfile, Experience};
    use crate::trend::build_month_windows;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn employee(company: &str, start: NaiveDate, end: Option<NaiveDate>) -> ProfileLookup {
        ProfileLookup::Found(EmployeeProfile {
            experiences: vec![Experience {
                company_linkedin_profile_url: Some(format!("https://www.linkedin.com/company/{company}")),
                starts_at: Some(DateParts::from(start)),
                ends_at: end.map(DateParts::from),
            }],
        })
    }

    #[test]
    fn absent_and_empty_records_are_skipped() {
        let today = ymd(2024, 6, 15);
        let windows = build_month_windows(3, today).unwrap();
        let lookups = vec![
            ProfileLookup::Absent,
            ProfileLookup::Found(EmployeeProfile::default()),
            employee("acme", ymd(2024, 4, 1), None),
            ProfileLookup::Absent,
        ];
        assert_eq!(aggregate_tenures(&lookups, &windows, "acme", today), vec![1, 1, 1, 0]);
    }

    #[test]
    fn empty_sample_gives_zero_series() {
        let today = ymd(2024, 6, 15);
        let windows = build_month_windows(5, today).unwrap();
        assert_eq!(aggregate_tenures(&[], &windows, "acme", today), vec![0; 6]);
    }

    #[test]
    fn counts_overlapping_employees() {
        let today = ymd(2024, 6, 15);
        let windows = build_month_windows(4, today).unwrap();
        let lookups = vec![
            employee("acme", ymd(2020, 1, 1), None),
            employee("acme", ymd(2024, 3, 10), Some(ymd(2024, 4, 30))),
            employee("acme", ymd(2024, 2, 1), Some(ymd(2024, 2, 29))),
            employee("globex", ymd(2020, 1, 1), None),
        ];
        // Windows: Jun (partial), May, Apr, Mar, Feb.
        assert_eq!(aggregate_tenures(&lookups, &windows, "acme", today), vec![1, 1, 2, 2, 2]);
    }

    proptest! {
        #[test]
        fn aggregation_is_order_independent(
            stints in proptest::collection::vec((0i64..1500, 0i64..400, any::<bool>()), 0..40),
            seed in any::<u64>(),
        ) {
            let today = ymd(2024, 6, 15);
            let windows = build_month_windows(36, today).unwrap();
            let origin = ymd(2020, 1, 1);
            let mut lookups: Vec<ProfileLookup> = stints
                .iter()
                .map(|&(start, len, ongoing)| {
                    let start = origin + chrono::Duration::days(start);
                    let end = (!ongoing).then(|| start + chrono::Duration::days(len));
                    employee("acme", start, end)
                })
                .collect();
            lookups.push(ProfileLookup::Absent);

            let expected = aggregate_tenures(&lookups, &windows, "acme", today);
            let mut rng = StdRng::seed_from_u64(seed);
            lookups.shuffle(&mut rng);
            prop_assert_eq!(aggregate_tenures(&lookups, &windows, "acme", today), expected);
        }
    }
}
