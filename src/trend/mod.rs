//! Tenure aggregation and trend extrapolation.
//!
//! Responsibilities:
//!
//! - build newest-first calendar-month windows (`months`)
//! - turn one employee's work history into a 0/1 tenure vector (`tenure`)
//! - sum tenure vectors over the sample (`aggregate`)
//! - scale sampled counts to the known current total (`rescale`)
//! - subsample large candidate lists (`sample`)
//!
//! Everything here is pure and synchronous; network access lives in `data`.

pub mod aggregate;
pub mod months;
pub mod rescale;
pub mod sample;
pub mod tenure;

pub use aggregate::*;
pub use months::*;
pub use rescale::*;
pub use sample::*;
pub use tenure::*;
