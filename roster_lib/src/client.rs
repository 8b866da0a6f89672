//! Retrying wrapper around the API client, and the [`RecordSource`] seam
//! list views fetch through.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use roster_api::types::{PaginatedResponse, Resource, Response};
use roster_api::{Client, ListQuery};
use serde::de::DeserializeOwned;

use crate::config::{Config, RetryConfig};
use crate::error::RosterError;

/// Anything that can answer a [`ListQuery`] with one page of records.
pub trait RecordSource<T> {
    fn fetch_page(
        &self,
        query: &ListQuery,
    ) -> impl Future<Output = Result<PaginatedResponse<T>, RosterError>>;
}

/// API client wrapper that retries transient failures.
///
/// Network errors, HTTP 429 and 5xx responses are retried with exponential
/// backoff and +/-20% jitter; anything else is returned immediately.
pub struct RetryingClient {
    inner: Client,
    retry: RetryConfig,
}

impl RetryConfig {
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

impl RetryingClient {
    /// Builds a client for the configured API URL, token and timeout.
    pub fn new(config: &Config) -> Self {
        let mut inner = Client::with_base_url(&config.api_url).with_timeout(config.http_timeout);
        if let Some(token) = &config.api_token {
            inner = inner.with_token(token);
        }
        Self {
            inner,
            retry: config.retry.clone(),
        }
    }

    /// Creates a client with a custom base URL and default retry settings. Used for testing.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            inner: Client::with_base_url(base_url),
            retry: RetryConfig::default(),
        }
    }

    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    async fn with_retry<T, F, Fut>(&self, label: &str, mut f: F) -> Result<T, RosterError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, RosterError>>,
    {
        let mut attempt = 0usize;
        loop {
            match f().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    attempt += 1;
                    if attempt > self.retry.max_retries || !err.is_retryable() {
                        return Err(err);
                    }
                    let delay = self.retry.delay_for_attempt(attempt);
                    tracing::warn!(
                        "{} request failed (attempt {}/{}), retrying in {:.1}s",
                        label,
                        attempt,
                        self.retry.max_retries,
                        delay.as_secs_f64()
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    /// Fetches one page of `resource`.
    pub async fn list<T>(
        &self,
        resource: Resource,
        query: &ListQuery,
    ) -> Result<PaginatedResponse<T>, RosterError>
    where
        T: DeserializeOwned,
    {
        let label = resource.to_string();
        self.with_retry(&label, || async {
            Ok(self.inner.list::<T>(resource, query).await?)
        })
        .await
    }

    /// Fetches a single record of `resource` by identifier.
    pub async fn get_record<T>(&self, resource: Resource, id: &str) -> Result<Response<T>, RosterError>
    where
        T: DeserializeOwned,
    {
        let label = resource.to_string();
        self.with_retry(&label, || async {
            Ok(self.inner.get_record::<T>(resource, id).await?)
        })
        .await
    }

    /// A [`RecordSource`] bound to one resource.
    pub fn source(&self, resource: Resource) -> ResourceSource<'_> {
        ResourceSource {
            client: self,
            resource,
        }
    }
}

/// [`RetryingClient`] bound to one [`Resource`].
pub struct ResourceSource<'a> {
    client: &'a RetryingClient,
    resource: Resource,
}

impl<T> RecordSource<T> for ResourceSource<'_>
where
    T: DeserializeOwned,
{
    async fn fetch_page(&self, query: &ListQuery) -> Result<PaginatedResponse<T>, RosterError> {
        self.client.list::<T>(self.resource, query).await
    }
}
