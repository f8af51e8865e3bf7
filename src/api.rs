//! Transport layer: the [`BookingApi`] seam and its HTTP implementation.
//!
//! Every endpoint answers with a JSON envelope `{ "data": ... }`. A missing
//! `data` field, or one that does not decode into the expected shape, is a
//! malformed response. Network failures are retried with exponential backoff;
//! bad statuses and bad payloads are not.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::config::SyncConfig;
use crate::error::{DashboardError, Result};
use crate::models::{BookingRecord, MetricsSummary, TrendPoint};
use crate::request::{ApiEndpoint, RequestTarget};

/// Source of dashboard data.
///
/// The synchronizer only talks to this trait, so views share one fetch path
/// and tests can substitute an in-process implementation.
#[async_trait]
pub trait BookingApi: Send + Sync {
    async fn bookings(&self, target: &RequestTarget) -> Result<Vec<BookingRecord>>;

    async fn metrics(&self, target: &RequestTarget) -> Result<MetricsSummary>;

    async fn trends(&self, target: &RequestTarget) -> Result<Vec<TrendPoint>>;
}

// ---------------------------------------------------------------------------
// HttpApi
// ---------------------------------------------------------------------------

/// [`BookingApi`] backed by the remote REST endpoints.
pub struct HttpApi {
    client: Client,
    base_url: Url,
    timeout: Duration,
    max_retries: u32,
    retry_base_delay: Duration,
}

impl HttpApi {
    /// Create an HTTP transport from connection settings.
    pub fn new(config: &SyncConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            timeout: config.timeout,
            max_retries: config.max_retries,
            retry_base_delay: config.retry_base_delay,
        })
    }

    /// Fetch a target and decode its `data` field, retrying network errors.
    async fn get_data<T: DeserializeOwned>(&self, target: &RequestTarget) -> Result<T> {
        let mut attempt = 0;
        loop {
            match self.get_once(target).await {
                Err(err) if err.is_retryable() && attempt < self.max_retries => {
                    let delay = self.backoff(attempt);
                    attempt += 1;
                    warn!(
                        endpoint = %target.endpoint,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "retrying request"
                    );
                    tokio::time::sleep(delay).await;
                }
                result => return result,
            }
        }
    }

    async fn get_once<T: DeserializeOwned>(&self, target: &RequestTarget) -> Result<T> {
        let endpoint = target.endpoint;
        let url = target.url(&self.base_url)?;
        debug!(%endpoint, %url, "GET");

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.network_error(endpoint, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(DashboardError::Endpoint {
                endpoint,
                status: status.as_u16(),
            });
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| self.network_error(endpoint, e))?;
        decode_envelope(endpoint, &body)
    }

    fn network_error(&self, endpoint: ApiEndpoint, err: reqwest::Error) -> DashboardError {
        let reason = if err.is_timeout() {
            format!("request timed out after {:?}", self.timeout)
        } else {
            err.to_string()
        };
        DashboardError::Network { endpoint, reason }
    }

    /// Exponential backoff with up to 50% random jitter.
    fn backoff(&self, attempt: u32) -> Duration {
        let base = self.retry_base_delay.saturating_mul(1u32 << attempt.min(16));
        let jitter_cap = (base.as_millis() as u64) / 2;
        let jitter = if jitter_cap > 0 {
            rand::thread_rng().gen_range(0..=jitter_cap)
        } else {
            0
        };
        base + Duration::from_millis(jitter)
    }
}

#[async_trait]
impl BookingApi for HttpApi {
    async fn bookings(&self, target: &RequestTarget) -> Result<Vec<BookingRecord>> {
        self.get_data(target).await
    }

    async fn metrics(&self, target: &RequestTarget) -> Result<MetricsSummary> {
        let summary: MetricsSummary = self.get_data(target).await?;
        summary
            .validate()
            .map_err(|reason| DashboardError::MalformedResponse {
                endpoint: target.endpoint,
                reason,
            })?;
        Ok(summary)
    }

    async fn trends(&self, target: &RequestTarget) -> Result<Vec<TrendPoint>> {
        self.get_data(target).await
    }
}

/// Pull the `data` field out of a response body and decode it.
pub fn decode_envelope<T: DeserializeOwned>(endpoint: ApiEndpoint, body: &[u8]) -> Result<T> {
    let malformed = |reason: String| DashboardError::MalformedResponse { endpoint, reason };

    let envelope: Value =
        serde_json::from_slice(body).map_err(|e| malformed(format!("invalid JSON: {}", e)))?;
    let data = match envelope {
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Null) | None => return Err(malformed("missing `data` field".into())),
            Some(data) => data,
        },
        _ => return Err(malformed("response is not a JSON object".into())),
    };
    serde_json::from_value(data).map_err(|e| malformed(format!("unexpected `data` shape: {}", e)))
}
