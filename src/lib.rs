//! `headcount-trend` library crate.
//!
//! The binary (`headcount`) is a thin wrapper around this library so that:
//!
//! - the trend pipeline is testable without network access or spawning processes
//! - the people-data client can be swapped for any `EmployeeSource`

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod plot;
pub mod report;
pub mod trend;
