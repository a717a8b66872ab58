//! Text output: the `date,total_employees` CSV and a short run summary.

use crate::domain::{HeadcountPoint, HeadcountReport};

pub const CSV_HEADER: &str = "date,total_employees";

/// Render points as CSV with a header row, one point per line, in the given order.
pub fn format_csv(points: &[HeadcountPoint]) -> String {
    let mut lines = Vec::with_capacity(points.len() + 1);
    lines.push(CSV_HEADER.to_string());
    for p in points {
        lines.push(format!("{},{}", p.date.format("%Y-%m-%d"), p.total_employees));
    }
    lines.join("\n")
}

/// Human-readable description of how the estimate was produced.
pub fn format_run_summary(report: &HeadcountReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== headcount trend: {} ===\n", report.company_url));
    out.push_str(&format!("As-of: {}\n", report.asof_date));
    out.push_str(&format!("Current employees: {}\n", report.current_total));
    out.push_str(&format!(
        "Profiles: {} candidates, {} sampled, {} resolved\n",
        report.candidates, report.sampled, report.resolved
    ));
    if report.anchor > 0 {
        out.push_str(&format!(
            "Anchor: {} sampled this month (x{:.2})\n",
            report.anchor,
            report.current_total as f64 / report.anchor as f64
        ));
    } else {
        out.push_str("Anchor: 0 sampled this month (series is all zero)\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn point(y: i32, m: u32, d: u32, total: u64) -> HeadcountPoint {
        HeadcountPoint {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            total_employees: total,
        }
    }

    #[test]
    fn csv_golden() {
        let points = vec![point(2024, 5, 31, 120), point(2024, 4, 30, 118), point(2024, 3, 31, 0)];
        let expected = concat!(
            "date,total_employees\n",
            "2024-05-31,120\n",
            "2024-04-30,118\n",
            "2024-03-31,0",
        );
        assert_eq!(format_csv(&points), expected);
    }

    #[test]
    fn csv_without_points_is_header_only() {
        assert_eq!(format_csv(&[]), CSV_HEADER);
    }

    #[test]
    fn summary_mentions_scale() {
        let report = HeadcountReport {
            tool: "headcount".to_string(),
            company_url: "https://www.linkedin.com/company/acme".to_string(),
            asof_date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            current_total: 500,
            anchor: 200,
            candidates: 900,
            sampled: 300,
            resolved: 280,
            points: vec![],
        };
        let txt = format_run_summary(&report);
        assert!(txt.contains("900 candidates, 300 sampled, 280 resolved"));
        assert!(txt.contains("x2.50"));
    }
}
