//! HTTP layer: header attachment, status mapping, retry.
//!
//! This is the ONLY place for status code handling. client/mod.rs and the
//! query layer never interpret status codes.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::session::Session;

/// HTTP backend for making requests (holds reqwest client, session, config).
#[derive(Debug, Clone)]
pub(crate) struct HttpBackend {
    pub(crate) client: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) session: Session,
    pub(crate) config: ClientConfig,
}

impl HttpBackend {
    /// Join the base URL with a request path.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Dispatch with retry for retryable failures (gated reads go through
    /// this; mutations use [`Self::dispatch_once`]).
    pub(crate) async fn dispatch(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> ApiResult<reqwest::Response> {
        let mut retries = 0;
        let max_retries = self.config.max_retries;

        loop {
            let result = self.dispatch_once(method.clone(), path, body).await;

            match result {
                Ok(response) => return Ok(response),
                Err(e) if e.is_retryable() && retries < max_retries => {
                    retries += 1;

                    let backoff = retry_backoff(&e, retries);
                    warn!(
                        error = %e,
                        retry = retries,
                        max_retries = max_retries,
                        backoff_ms = backoff.as_millis() as u64,
                        "retrying request"
                    );

                    tokio::time::sleep(backoff).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Make a single request: attach headers, send, map status.
    ///
    /// A 401/403 invalidates the session before the error is returned.
    pub(crate) async fn dispatch_once(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> ApiResult<reqwest::Response> {
        let url = self.url(path);
        let snapshot = self.session.snapshot().await;

        let mut request = self
            .client
            .request(method, &url)
            .header(CONTENT_TYPE, "application/json");

        if let Some(token) = snapshot.bearer() {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        match status.as_u16() {
            200..=299 => Ok(response),

            401 | 403 => {
                self.session.invalidate().await;
                Err(ApiError::Auth {
                    status: status.as_u16(),
                    message: "invalid or expired token".to_string(),
                })
            }

            429 => {
                let retry_after = response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .map(Duration::from_secs);

                Err(ApiError::RateLimited { retry_after })
            }

            code => {
                let message = response.text().await.unwrap_or_else(|_| status.to_string());
                Err(ApiError::Server {
                    status: code,
                    message,
                })
            }
        }
    }

    /// Decode a response body as JSON.
    pub(crate) async fn decode<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ApiResult<T> {
        let status = response.status();
        response.json().await.map_err(|e| ApiError::InvalidResponse {
            message: format!("failed to decode response body (HTTP {}): {}", status, e),
        })
    }
}

/// Backoff for a retryable failure: honor Retry-After (capped) when the
/// server sent one, otherwise exponential with full jitter.
fn retry_backoff(error: &ApiError, retries: u32) -> Duration {
    use rand::Rng;

    match error {
        ApiError::RateLimited {
            retry_after: Some(retry_after),
        } => {
            let thirty_sec = Duration::from_secs(30);
            let capped = if *retry_after > thirty_sec {
                thirty_sec
            } else {
                *retry_after
            };
            let base_ms = capped.as_millis() as u64;
            let jitter_factor: f64 = rand::thread_rng().gen_range(0.9_f64..=1.1_f64);
            let jittered_ms = ((base_ms as f64) * jitter_factor).round() as u64;
            Duration::from_millis(jittered_ms.max(100))
        }
        _ => {
            let base_backoff = Duration::from_secs(1 << retries);
            let base_backoff = base_backoff.min(Duration::from_secs(30));
            let jittered_ms = rand::thread_rng().gen_range(0..=base_backoff.as_millis() as u64);
            Duration::from_millis(jittered_ms.max(10))
        }
    }
}
