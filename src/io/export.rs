//! Export the headcount series to CSV.
//!
//! Same format as the terminal output, so files can be diffed against piped stdout.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::HeadcountPoint;
use crate::error::AppError;
use crate::report::format_csv;

/// Write `date,total_employees` rows to a CSV file.
pub fn write_series_csv(path: &Path, points: &[HeadcountPoint]) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    writeln!(file, "{}", format_csv(points))
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV: {e}")))?;

    Ok(())
}
