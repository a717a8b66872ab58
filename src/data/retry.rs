//! Exponential backoff for rate-limited API calls.
//!
//! The people-data API applies its rate limit in 5-minute bursts, so the default policy
//! keeps doubling the wait until the cumulative wait would pass 512 seconds.

use std::time::Duration;

use rand::Rng;
use tracing::warn;

use crate::error::AppError;

/// Why a single attempt did not produce a value.
#[derive(Debug)]
pub enum RetryError {
    /// Rate limiting, backend hiccups, transport errors: worth another try.
    Transient(String),
    /// Give up immediately.
    Fatal(AppError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub initial_delay: Duration,
    pub factor: u32,
    /// Retries stop once the next wait would push the total past this.
    pub max_total_wait: Duration,
    pub jitter_percent: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            factor: 2,
            max_total_wait: Duration::from_secs(512),
            jitter_percent: 10,
        }
    }
}

impl RetryPolicy {
    /// Short policy for per-profile lookups, where giving up only loses one sample.
    pub fn quick() -> Self {
        Self {
            max_total_wait: Duration::from_secs(30),
            ..Self::default()
        }
    }

    /// Base (un-jittered) wait before each retry.
    pub fn schedule(&self) -> Vec<Duration> {
        let mut out = Vec::new();
        let mut delay = self.initial_delay;
        let mut total = Duration::ZERO;
        while !delay.is_zero() {
            match total.checked_add(delay) {
                Some(next) if next <= self.max_total_wait => total = next,
                _ => break,
            }
            out.push(delay);
            delay = delay.saturating_mul(self.factor.max(1));
        }
        out
    }

    /// Run `op` until it succeeds, fails fatally, or the schedule is exhausted.
    pub fn run<T>(&self, label: &str, op: impl FnMut() -> Result<T, RetryError>) -> Result<T, AppError> {
        self.run_with_sleep(label, op, std::thread::sleep)
    }

    pub fn run_with_sleep<T>(
        &self,
        label: &str,
        mut op: impl FnMut() -> Result<T, RetryError>,
        mut sleep: impl FnMut(Duration),
    ) -> Result<T, AppError> {
        let schedule = self.schedule();
        let mut attempt = 0usize;
        loop {
            match op() {
                Ok(value) => return Ok(value),
                Err(RetryError::Fatal(err)) => return Err(err),
                Err(RetryError::Transient(reason)) => {
                    let Some(&delay) = schedule.get(attempt) else {
                        return Err(AppError::new(
                            4,
                            format!("{label} failed after {} attempts: {reason}", attempt + 1),
                        ));
                    };
                    attempt += 1;
                    let wait = jitter(delay, self.jitter_percent);
                    warn!(%label, attempt, wait_ms = wait.as_millis() as u64, %reason, "retrying after transient error");
                    sleep(wait);
                }
            }
        }
    }
}

/// `base` plus up to `jitter_percent` percent.
pub fn jitter(base: Duration, jitter_percent: u32) -> Duration {
    let base_ms = base.as_millis() as u64;
    let jitter_range = if jitter_percent == 0 {
        1
    } else {
        std::cmp::max(1, base_ms.saturating_mul(u64::from(jitter_percent)) / 100)
    };
    let mut rng = rand::thread_rng();
    Duration::from_millis(base_ms + rng.gen_range(0..jitter_range))
}
