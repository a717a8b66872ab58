//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - calendar buckets (`MonthWindow`)
//! - employee records as returned by the people-data API (`EmployeeProfile`, `Experience`)
//! - per-item fetch results (`ProfileLookup`)
//! - run configuration and outputs (`EstimateConfig`, `HeadcountReport`)

pub mod types;

pub use types::*;
