//! Proxycurl people-data API client.
//!
//! Three endpoints are used:
//!
//! - employee count (the scaling anchor's numerator)
//! - employee listing (candidate profile URLs, optionally paginated)
//! - person profile (work history for one candidate)

use std::time::Duration;

use rayon::prelude::*;
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::data::EmployeeSource;
use crate::data::retry::{RetryError, RetryPolicy};
use crate::domain::{DEFAULT_CONCURRENCY, EmployeeProfile, ProfileLookup};
use crate::error::AppError;

const COUNT_ENDPOINT: &str = "https://nubela.co/proxycurl/api/linkedin/company/employees/count";
const LISTING_ENDPOINT: &str = "https://nubela.co/proxycurl/api/linkedin/company/employees/";
const PERSON_ENDPOINT: &str = "https://nubela.co/proxycurl/api/v2/linkedin";

pub const API_KEY_ENV: &str = "PROXYCURL_API_KEY";

pub struct ProxycurlClient {
    client: Client,
    api_key: String,
    page_retry: RetryPolicy,
    profile_retry: RetryPolicy,
    concurrency: usize,
    all_pages: bool,
    page_size: Option<u32>,
}

impl ProxycurlClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            page_retry: RetryPolicy::default(),
            profile_retry: RetryPolicy::quick(),
            concurrency: DEFAULT_CONCURRENCY,
            all_pages: false,
            page_size: None,
        }
    }

    /// Use `api_key` if given, else `PROXYCURL_API_KEY` from the environment (or `.env`).
    pub fn from_key_or_env(api_key: Option<String>) -> Result<Self, AppError> {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            return Ok(Self::new(key));
        }
        dotenvy::dotenv().ok();
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| AppError::new(2, format!("Missing API key: pass --api-key or set {API_KEY_ENV}.")))?;
        Ok(Self::new(api_key))
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Follow `next_page` links instead of stopping after the first listing page.
    pub fn with_all_pages(mut self, all_pages: bool) -> Self {
        self.all_pages = all_pages;
        self
    }

    pub fn with_page_size(mut self, page_size: Option<u32>) -> Self {
        self.page_size = page_size;
        self
    }

    fn get(&self, url: &str) -> RequestBuilder {
        self.client.get(url).bearer_auth(&self.api_key)
    }

    fn send_with_retry(
        &self,
        policy: &RetryPolicy,
        label: &str,
        build: impl Fn() -> RequestBuilder,
    ) -> Result<Response, AppError> {
        policy.run(label, || match build().send() {
            Ok(resp) if is_transient(resp.status()) => {
                Err(RetryError::Transient(format!("status {}", resp.status())))
            }
            Ok(resp) => Ok(resp),
            Err(e) => Err(RetryError::Transient(e.to_string())),
        })
    }

    /// One attempt at a `next_page` link; rate limits and backend errors are transient.
    fn fetch_listing_page(&self, url: &str) -> Result<ListingResponse, RetryError> {
        let resp = self
            .get(url)
            .send()
            .map_err(|e| RetryError::Transient(e.to_string()))?;
        let status = resp.status();
        if is_transient(status) {
            return Err(RetryError::Transient(format!("status {status}")));
        }
        if !status.is_success() {
            return Err(RetryError::Fatal(AppError::new(
                4,
                format!("Employee listing page failed with status {status}."),
            )));
        }
        resp.json()
            .map_err(|e| RetryError::Fatal(AppError::new(4, format!("Failed to parse employee listing page: {e}"))))
    }

    fn fetch_profile(&self, profile_url: &str) -> ProfileLookup {
        let resp = match self.send_with_retry(&self.profile_retry, "profile lookup", || {
            self.get(PERSON_ENDPOINT).query(&[("url", profile_url)])
        }) {
            Ok(resp) => resp,
            Err(e) => {
                warn!(profile_url, error = %e, "profile lookup failed");
                return ProfileLookup::Absent;
            }
        };

        match resp.status() {
            StatusCode::NOT_FOUND => {
                debug!(profile_url, "profile not found");
                ProfileLookup::Absent
            }
            status if !status.is_success() => {
                warn!(profile_url, %status, "profile lookup rejected");
                ProfileLookup::Absent
            }
            _ => match resp.json::<EmployeeProfile>() {
                Ok(profile) => ProfileLookup::Found(profile),
                Err(e) => {
                    warn!(profile_url, error = %e, "failed to parse profile");
                    ProfileLookup::Absent
                }
            },
        }
    }
}

impl EmployeeSource for ProxycurlClient {
    fn current_employee_count(&self, company_url: &str) -> Result<u64, AppError> {
        let resp = self
            .get(COUNT_ENDPOINT)
            .query(&[
                ("use_cache", "if-recent"),
                ("linkedin_employee_count", "include"),
                ("employment_status", "current"),
                ("url", company_url),
            ])
            .send()
            .map_err(|e| AppError::new(4, format!("Employee count request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::new(
                4,
                format!("Employee count request failed with status {}.", resp.status()),
            ));
        }

        let body: CountResponse = resp
            .json()
            .map_err(|e| AppError::new(4, format!("Failed to parse employee count response: {e}")))?;
        let count = body.linkedin_employee_count.unwrap_or(0);
        info!(company_url, count, "current employee count");
        Ok(count)
    }

    fn employee_profile_urls(&self, company_url: &str) -> Result<Vec<String>, AppError> {
        let mut req = self
            .get(LISTING_ENDPOINT)
            .query(&[("employment_status", "all"), ("url", company_url)]);
        if let Some(page_size) = self.page_size {
            req = req.query(&[("page_size", page_size.to_string())]);
        }

        let resp = req
            .send()
            .map_err(|e| AppError::new(4, format!("Employee listing request failed: {e}")))?;
        if resp.status() != StatusCode::OK {
            return Err(AppError::new(
                4,
                format!("Employee listing request failed with status {}.", resp.status()),
            ));
        }

        let first: ListingResponse = resp
            .json()
            .map_err(|e| AppError::new(4, format!("Failed to parse employee listing: {e}")))?;
        let urls = follow_pages(
            first,
            self.all_pages,
            &self.page_retry,
            |url| self.fetch_listing_page(url),
            std::thread::sleep,
        )?;

        info!(company_url, candidates = urls.len(), "collected candidate profiles");
        Ok(urls)
    }

    fn fetch_profiles(&self, profile_urls: &[String]) -> Vec<ProfileLookup> {
        let pool = match rayon::ThreadPoolBuilder::new()
            .num_threads(self.concurrency)
            .build()
        {
            Ok(pool) => pool,
            Err(e) => {
                warn!(error = %e, "could not build lookup pool; fetching sequentially");
                return profile_urls.iter().map(|u| self.fetch_profile(u)).collect();
            }
        };

        pool.install(|| profile_urls.par_iter().map(|u| self.fetch_profile(u)).collect())
    }
}

/// Collect profile URLs from `first` and, when `all_pages` is set, every page after it.
///
/// Each `next_page` link is fetched through `policy`; running out of retries is fatal.
fn follow_pages(
    first: ListingResponse,
    all_pages: bool,
    policy: &RetryPolicy,
    mut fetch_page: impl FnMut(&str) -> Result<ListingResponse, RetryError>,
    mut sleep: impl FnMut(Duration),
) -> Result<Vec<String>, AppError> {
    let mut page = first;
    let mut urls = page.take_profile_urls();

    while all_pages {
        let Some(next_page) = page.next_page.take() else {
            break;
        };
        debug!(next_page = %next_page, collected = urls.len(), "fetching next listing page");
        page = policy.run_with_sleep("employee listing page", || fetch_page(&next_page), &mut sleep)?;
        urls.extend(page.take_profile_urls());
    }

    Ok(urls)
}

/// Rate limiting and backend errors are worth retrying; other statuses are final.
fn is_transient(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

#[derive(Debug, Deserialize)]
struct CountResponse {
    #[serde(default)]
    linkedin_employee_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ListingResponse {
    #[serde(default)]
    employees: Vec<ListedEmployee>,
    #[serde(default)]
    next_page: Option<String>,
}

impl ListingResponse {
    /// Drain the page's profile URLs, skipping entries without one.
    fn take_profile_urls(&mut self) -> Vec<String> {
        self.employees
            .drain(..)
            .filter_map(|e| {
                if e.profile_url.is_none() {
                    debug!("skipping listed employee without a profile URL");
                }
                e.profile_url
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct ListedEmployee {
    #[serde(default)]
    profile_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_statuses() {
        assert!(is_transient(StatusCode::TOO_MANY_REQUESTS));
        assert!(is_transient(StatusCode::SERVICE_UNAVAILABLE));
        assert!(is_transient(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(!is_transient(StatusCode::NOT_FOUND));
        assert!(!is_transient(StatusCode::UNAUTHORIZED));
        assert!(!is_transient(StatusCode::OK));
    }

    #[test]
    fn listing_response_parses_pages() {
        let raw = r#"{
            "employees": [
                {"profile_url": "https://www.linkedin.com/in/a", "profile": null},
                {"profile_url": "https://www.linkedin.com/in/b", "profile": null}
            ],
            "next_page": "https://nubela.co/proxycurl/api/linkedin/company/employees/?after=b"
        }"#;
        let page: ListingResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(page.employees.len(), 2);
        assert_eq!(page.employees[1].profile_url.as_deref(), Some("https://www.linkedin.com/in/b"));
        assert!(page.next_page.is_some());

        let last: ListingResponse = serde_json::from_str(r#"{"employees": [], "next_page": null}"#).unwrap();
        assert!(last.next_page.is_none());
    }

    fn page(urls: &[&str], next_page: Option<&str>) -> ListingResponse {
        ListingResponse {
            employees: urls
                .iter()
                .map(|u| ListedEmployee {
                    profile_url: Some(u.to_string()),
                })
                .collect(),
            next_page: next_page.map(str::to_string),
        }
    }

    fn no_jitter() -> RetryPolicy {
        RetryPolicy {
            jitter_percent: 0,
            ..RetryPolicy::default()
        }
    }

    #[test]
    fn listing_entries_without_profile_url_are_skipped() {
        let raw = r#"{
            "employees": [
                {"profile_url": null},
                {"profile": null},
                {"profile_url": "https://www.linkedin.com/in/c"}
            ],
            "next_page": null
        }"#;
        let mut page: ListingResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(page.take_profile_urls(), vec!["https://www.linkedin.com/in/c".to_string()]);
    }

    #[test]
    fn follows_next_page_links_and_combines_pages() {
        let mut requested = Vec::new();
        let urls = follow_pages(
            page(&["a", "b"], Some("page-2")),
            true,
            &no_jitter(),
            |url| {
                requested.push(url.to_string());
                match url {
                    "page-2" => Ok(page(&["c"], Some("page-3"))),
                    "page-3" => Ok(page(&["d", "e"], None)),
                    other => panic!("unexpected page {other}"),
                }
            },
            |_| panic!("should not sleep"),
        )
        .unwrap();

        assert_eq!(urls, vec!["a", "b", "c", "d", "e"]);
        assert_eq!(requested, vec!["page-2", "page-3"]);
    }

    #[test]
    fn first_page_only_without_all_pages() {
        let urls = follow_pages(
            page(&["a"], Some("page-2")),
            false,
            &no_jitter(),
            |_| panic!("should not fetch more pages"),
            |_| {},
        )
        .unwrap();
        assert_eq!(urls, vec!["a"]);
    }

    #[test]
    fn rate_limited_page_is_retried() {
        let mut calls = 0;
        let mut slept = Vec::new();
        let urls = follow_pages(
            page(&["a"], Some("page-2")),
            true,
            &no_jitter(),
            |_| {
                calls += 1;
                if calls < 3 {
                    Err(RetryError::Transient("status 429 Too Many Requests".to_string()))
                } else {
                    Ok(page(&["b"], None))
                }
            },
            |d| slept.push(d),
        )
        .unwrap();
        assert_eq!(urls, vec!["a", "b"]);
        assert_eq!(slept, vec![Duration::from_secs(1), Duration::from_secs(2)]);
    }

    #[test]
    fn exhausted_page_retries_are_fatal() {
        let mut calls = 0;
        let mut waited = Duration::ZERO;
        let err = follow_pages(
            page(&["a"], Some("page-2")),
            true,
            &no_jitter(),
            |_| {
                calls += 1;
                Err(RetryError::Transient("status 503 Service Unavailable".to_string()))
            },
            |d| waited += d,
        )
        .unwrap_err();

        assert_eq!(err.exit_code(), 4);
        assert!(err.to_string().contains("503"));
        // 1 + 2 + ... + 256 seconds of waiting, one more attempt than waits.
        assert_eq!(waited, Duration::from_secs(511));
        assert_eq!(calls, 10);
    }

    #[test]
    fn null_count_reads_as_missing() {
        let body: CountResponse = serde_json::from_str(r#"{"linkedin_employee_count": null}"#).unwrap();
        assert_eq!(body.linkedin_employee_count, None);
        let body: CountResponse =
            serde_json::from_str(r#"{"linkedin_employee_count": 1234, "total_employee": 1300}"#).unwrap();
        assert_eq!(body.linkedin_employee_count, Some(1234));
    }

    #[test]
    fn explicit_key_wins_over_environment() {
        let client = ProxycurlClient::from_key_or_env(Some("secret".to_string())).unwrap();
        assert_eq!(client.api_key, "secret");
    }
}
