//! Rate-limiting and retrying wrapper around the site client.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use bdelection_api::types::{District, Seat};
use bdelection_api::Client;
use rand::Rng;

use crate::error::ElectionError;

/// Default minimum gap between consecutive requests.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(1000);

/// Site client wrapper that spaces requests out and retries transient failures.
///
/// A randomized delay of 80-120% of the configured gap is enforced between
/// consecutive HTTP requests. The first request has no delay.
pub struct PoliteClient {
    inner: Client,
    delay: Duration,
    retry: RetryConfig,
    /// Tracks when the last HTTP request was sent, for rate limiting.
    last_request: Mutex<Option<Instant>>,
}

/// Exponential backoff settings for transient failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    pub max_retries: usize,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 2000,
            max_delay_ms: 30000,
        }
    }
}

impl RetryConfig {
    /// Reads `BDELECTION_RETRY_MAX`, `BDELECTION_RETRY_BASE_MS` and
    /// `BDELECTION_RETRY_MAX_MS`, falling back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_retries: env_usize("BDELECTION_RETRY_MAX", defaults.max_retries),
            base_delay_ms: env_u64("BDELECTION_RETRY_BASE_MS", defaults.base_delay_ms),
            max_delay_ms: env_u64("BDELECTION_RETRY_MAX_MS", defaults.max_delay_ms),
        }
    }

    fn delay_for_attempt(&self, attempt: usize) -> Duration {
        let shift = (attempt.saturating_sub(1)).min(30) as u32;
        let exp = 1u64 << shift;
        let base = self
            .base_delay_ms
            .saturating_mul(exp)
            .min(self.max_delay_ms);
        let jitter = rand::thread_rng().gen_range(0.8..1.2);
        Duration::from_millis((base as f64 * jitter) as u64)
    }
}

impl PoliteClient {
    /// Creates a client for the production site with retry settings from the environment.
    pub fn new(delay: Duration) -> Self {
        Self::from_client(Client::new(), delay)
    }

    /// Creates a client with a custom origin. Used for testing and mirrors.
    pub fn with_base_url(base_url: &str, delay: Duration) -> Self {
        Self::from_client(Client::with_base_url(base_url), delay)
    }

    fn from_client(inner: Client, delay: Duration) -> Self {
        Self {
            inner,
            delay,
            retry: RetryConfig::from_env(),
            last_request: Mutex::new(None),
        }
    }

    /// Replaces the retry settings.
    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn base_url(&self) -> &str {
        self.inner.base_url()
    }

    async fn rate_limit(&self) {
        let sleep_dur = {
            let last = self.last_request.lock().unwrap_or_else(|e| e.into_inner());
            match *last {
                Some(last_time) if !self.delay.is_zero() => {
                    let elapsed = last_time.elapsed();
                    let delay = self.delay.mul_f64(rand::thread_rng().gen_range(0.8..1.2));
                    delay.checked_sub(elapsed)
                }
                _ => None,
            }
        };
        if let Some(dur) = sleep_dur {
            tokio::time::sleep(dur).await;
        }
        *self.last_request.lock().unwrap_or_else(|e| e.into_inner()) = Some(Instant::now());
    }

    async fn with_retry<T, F, Fut>(&self, label: &str, mut f: F) -> Result<T, ElectionError>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, ElectionError>>,
    {
        let cfg = self.retry;
        let mut attempt = 0usize;
        loop {
            match f().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    attempt += 1;
                    if attempt > cfg.max_retries || !err.is_transient() {
                        return Err(err);
                    }
                    let delay = cfg.delay_for_attempt(attempt);
                    tracing::warn!(
                        "{} request failed (attempt {}/{}), retrying in {:.1}s",
                        label,
                        attempt,
                        cfg.max_retries,
                        delay.as_secs_f64()
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    /// Fetches the districts of a division.
    pub async fn get_districts(&self, division_id: &str) -> Result<Vec<District>, ElectionError> {
        self.with_retry("districts", || async {
            self.rate_limit().await;
            Ok(self.inner.get_districts(division_id).await?)
        })
        .await
    }

    /// Fetches the seats of a district.
    pub async fn get_seats(&self, district_id: &str) -> Result<Vec<Seat>, ElectionError> {
        self.with_retry("seats", || async {
            self.rate_limit().await;
            Ok(self.inner.get_seats(district_id).await?)
        })
        .await
    }

    /// Fetches the results page of a district.
    pub async fn get_district_page(
        &self,
        division_id: &str,
        district_id: &str,
    ) -> Result<String, ElectionError> {
        self.with_retry("district page", || async {
            self.rate_limit().await;
            Ok(self.inner.get_district_page(division_id, district_id).await?)
        })
        .await
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|val| val.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(key: &str, default: usize) -> usize {
    std::env::var(key)
        .ok()
        .and_then(|val| val.parse::<usize>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_grows_and_caps() {
        let cfg = RetryConfig {
            max_retries: 5,
            base_delay_ms: 1000,
            max_delay_ms: 3000,
        };
        let first = cfg.delay_for_attempt(1).as_millis();
        assert!((800..=1200).contains(&first));
        let second = cfg.delay_for_attempt(2).as_millis();
        assert!((1600..=2400).contains(&second));
        let capped = cfg.delay_for_attempt(10).as_millis();
        assert!((2400..=3600).contains(&capped));
    }

    #[test]
    fn default_retry_config() {
        let cfg = RetryConfig::default();
        assert_eq!(cfg.max_retries, 3);
        assert_eq!(cfg.base_delay_ms, 2000);
        assert_eq!(cfg.max_delay_ms, 30000);
    }

    #[tokio::test(start_paused = true)]
    async fn first_request_is_immediate_then_spaced() {
        let client = PoliteClient::with_base_url("http://localhost:1", Duration::from_secs(1));
        let start = tokio::time::Instant::now();
        client.rate_limit().await;
        assert!(start.elapsed() < Duration::from_millis(10));
        client.rate_limit().await;
        assert!(start.elapsed() >= Duration::from_millis(700));
    }

    #[tokio::test]
    async fn zero_delay_never_sleeps() {
        let client = PoliteClient::with_base_url("http://localhost:1", Duration::ZERO);
        let start = std::time::Instant::now();
        client.rate_limit().await;
        client.rate_limit().await;
        assert!(start.elapsed() < Duration::from_millis(500));
    }

    #[tokio::test]
    async fn permanent_errors_are_not_retried() {
        let client = PoliteClient::with_base_url("http://localhost:1", Duration::ZERO)
            .with_retry_config(RetryConfig {
                max_retries: 3,
                base_delay_ms: 1,
                max_delay_ms: 1,
            });
        let calls = std::sync::atomic::AtomicUsize::new(0);
        let result: Result<(), _> = client
            .with_retry("test", || async {
                calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                Err(ElectionError::Api(bdelection_api::Error::HttpStatus {
                    status: 404,
                    body: String::new(),
                }))
            })
            .await;
        assert!(result.is_err());
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn transient_errors_are_retried_up_to_max() {
        let client = PoliteClient::with_base_url("http://localhost:1", Duration::ZERO)
            .with_retry_config(RetryConfig {
                max_retries: 2,
                base_delay_ms: 1,
                max_delay_ms: 1,
            });
        let calls = std::sync::atomic::AtomicUsize::new(0);
        let result: Result<(), _> = client
            .with_retry("test", || async {
                calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                Err(ElectionError::Api(bdelection_api::Error::RequestFailed))
            })
            .await;
        assert!(result.is_err());
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 3);
    }
}
