//! Calendar-month windows for bucketing tenures.
//!
//! The list is built backwards from today: each full month ends the day before the newer
//! month starts, and starts that month's day-count earlier.

use chrono::{Datelike, Duration, NaiveDate};

use crate::domain::MonthWindow;
use crate::error::AppError;

/// Build `month_count + 1` windows, newest first.
///
/// Index 0 is the partial current month (`1st..=today`); indexes `1..=month_count` are the
/// preceding full calendar months.
pub fn build_month_windows(month_count: u32, today: NaiveDate) -> Result<Vec<MonthWindow>, AppError> {
    if month_count == 0 {
        return Err(AppError::new(2, "Month count must be >= 1."));
    }

    let current_start = today
        .with_day(1)
        .ok_or_else(|| AppError::new(2, format!("Cannot find the first of the month for {today}.")))?;

    let mut windows = Vec::with_capacity(month_count as usize + 1);
    windows.push(MonthWindow {
        start: current_start,
        end: today,
    });

    let mut next_start = current_start;
    for _ in 0..month_count {
        let window = month_before(next_start)?;
        next_start = window.start;
        windows.push(window);
    }

    Ok(windows)
}

/// The full calendar month ending the day before `first_of_next_month`.
fn month_before(first_of_next_month: NaiveDate) -> Result<MonthWindow, AppError> {
    let end = first_of_next_month
        .pred_opt()
        .ok_or_else(|| AppError::new(2, "Month windows run past the supported date range."))?;
    // `end` is the month's last day, so its day-of-month is the month's length.
    let start = first_of_next_month
        .checked_sub_signed(Duration::days(i64::from(end.day())))
        .ok_or_else(|| AppError::new(2, "Month windows run past the supported date range."))?;
    Ok(MonthWindow { start, end })
}
