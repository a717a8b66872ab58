//! People-data access.
//!
//! The trend pipeline only sees the `EmployeeSource` trait; `ProxycurlClient` is the
//! HTTP implementation used by the binary.

pub mod proxycurl;
pub mod retry;

pub use proxycurl::*;
pub use retry::*;

use crate::domain::ProfileLookup;
use crate::error::AppError;

/// What the pipeline needs from the outside world.
pub trait EmployeeSource {
    /// Authoritative count of current employees (including unscrapable profiles).
    fn current_employee_count(&self, company_url: &str) -> Result<u64, AppError>;

    /// Profile URLs of past and current employees.
    fn employee_profile_urls(&self, company_url: &str) -> Result<Vec<String>, AppError>;

    /// Resolve every URL; the output has the same length and order as the input.
    ///
    /// Individual failures come back as `ProfileLookup::Absent` instead of aborting the batch.
    fn fetch_profiles(&self, profile_urls: &[String]) -> Vec<ProfileLookup>;
}
