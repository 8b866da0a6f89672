//! Runtime configuration read from `ROSTER_*` environment variables.

use std::time::Duration;

use roster_api::DEFAULT_BASE_URL;

/// Backoff settings for transient request failures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryConfig {
    pub max_retries: usize,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 500,
            max_delay_ms: 10_000,
        }
    }
}

/// Settings for the API client and for list views.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the console API.
    pub api_url: String,
    /// Bearer token sent with every request, if any.
    pub api_token: Option<String>,
    pub http_timeout: Duration,
    pub retry: RetryConfig,
    /// Initial page size for new list views.
    pub page_size: i64,
    /// Quiet interval before a typed search term triggers a fetch.
    pub search_debounce: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BASE_URL.to_string(),
            api_token: None,
            http_timeout: Duration::from_secs(30),
            retry: RetryConfig::default(),
            page_size: 10,
            search_debounce: Duration::from_millis(500),
        }
    }
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, falling back to the default
    /// for every variable that is missing or does not parse.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let u64_var = |key: &str, default: u64| {
            lookup(key)
                .and_then(|val| val.trim().parse::<u64>().ok())
                .unwrap_or(default)
        };
        let usize_var = |key: &str, default: usize| {
            lookup(key)
                .and_then(|val| val.trim().parse::<usize>().ok())
                .unwrap_or(default)
        };

        let page_size = lookup("ROSTER_PAGE_SIZE")
            .and_then(|val| val.trim().parse::<i64>().ok())
            .filter(|size| *size > 0)
            .unwrap_or(defaults.page_size);

        Self {
            api_url: lookup("ROSTER_API_URL")
                .filter(|url| !url.trim().is_empty())
                .unwrap_or(defaults.api_url),
            api_token: lookup("ROSTER_API_TOKEN").filter(|token| !token.is_empty()),
            http_timeout: Duration::from_secs(u64_var(
                "ROSTER_HTTP_TIMEOUT_SECS",
                defaults.http_timeout.as_secs(),
            )),
            retry: RetryConfig {
                max_retries: usize_var("ROSTER_RETRY_MAX", defaults.retry.max_retries),
                base_delay_ms: u64_var("ROSTER_RETRY_BASE_MS", defaults.retry.base_delay_ms),
                max_delay_ms: u64_var("ROSTER_RETRY_MAX_MS", defaults.retry.max_delay_ms),
            },
            page_size,
            search_debounce: Duration::from_millis(u64_var(
                "ROSTER_SEARCH_DEBOUNCE_MS",
                defaults.search_debounce.as_millis() as u64,
            )),
        }
    }
}
