//! Input/output helpers.
//!
//! - CSV export of the headcount series (`export`)
//! - JSON report read/write (`report`)

pub mod export;
pub mod report;

pub use export::*;
pub use report::*;
