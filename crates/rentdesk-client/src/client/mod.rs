//! Portal HTTP client.
//!
//! Public API: no status code knowledge. All HTTP/status mapping in http.rs.
//!
//! The methods here are the plain (non-cached, non-retried) request helpers
//! used for one-off mutations. Gated, cached reads go through
//! [`crate::query::QueryClient`], which shares this client's header and
//! status handling.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::query::QueryClient;
use crate::session::Session;
use crate::store::SessionStore;

mod http;

pub(crate) use http::HttpBackend;

/// User agent sent on every request.
pub const PORTAL_USER_AGENT: &str = concat!("rentdesk-client/", env!("CARGO_PKG_VERSION"));

/// Portal API client.
#[derive(Debug, Clone)]
pub struct PortalClient {
    http: HttpBackend,
    query: QueryClient,
}

impl PortalClient {
    /// Create a client with a fresh session (in `Bootstrapping` state).
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        Self::with_session(config, Session::new())
    }

    /// Create a client around an existing session handle.
    pub fn with_session(config: ClientConfig, session: Session) -> ApiResult<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(PORTAL_USER_AGENT));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(default_headers)
            .build()
            .map_err(|e| ApiError::Config {
                message: format!("failed to create HTTP client: {}", e),
            })?;

        let base_url = config.base_url.trim_end_matches('/').to_string();

        let http = HttpBackend {
            client,
            base_url,
            session,
            config,
        };
        let query = QueryClient::new(http.clone());

        Ok(Self { http, query })
    }

    /// Create a client from environment variables.
    pub fn from_env() -> ApiResult<Self> {
        Self::new(ClientConfig::from_env())
    }

    /// The session handle shared with the fetch layer.
    pub fn session(&self) -> &Session {
        &self.http.session
    }

    /// The auth-gated query layer.
    pub fn query(&self) -> &QueryClient {
        &self.query
    }

    /// Finish startup bootstrap from the session store.
    ///
    /// Loads the stored token (if any) and settles the session out of
    /// `Bootstrapping`. Gated queries stay disabled until this runs.
    pub async fn bootstrap(&self, store: &SessionStore) {
        let token = store.load_token().await;
        debug!(found = token.is_some(), "bootstrapping session from store");
        self.http.session.finish_bootstrap(token).await;
    }

    /// Install a fresh token and persist it (login).
    pub async fn login(&self, store: &SessionStore, token: &str) -> ApiResult<()> {
        if token.is_empty() {
            return Err(ApiError::Validation {
                field: "token".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        store.save_token(token).await?;
        self.http.session.authenticate(token).await;
        Ok(())
    }

    /// Drop the credential and clear the store (logout).
    ///
    /// In-flight gated requests from the old session discard their results.
    pub async fn logout(&self, store: &SessionStore) -> ApiResult<()> {
        self.http.session.invalidate().await;
        store.clear().await
    }

    /// Single GET, decoded from JSON. No retry, no caching.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        debug!(path, "GET");
        let response = self.http.dispatch_once(Method::GET, path, None).await?;
        self.http.decode(response).await
    }

    /// Single POST with a JSON body, decoded from JSON.
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        debug!(path, "POST");
        let body = encode_body(body)?;
        let response = self
            .http
            .dispatch_once(Method::POST, path, Some(&body))
            .await?;
        self.http.decode(response).await
    }

    /// Single PUT with a JSON body, decoded from JSON.
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        debug!(path, "PUT");
        let body = encode_body(body)?;
        let response = self
            .http
            .dispatch_once(Method::PUT, path, Some(&body))
            .await?;
        self.http.decode(response).await
    }

    /// Single PATCH with a JSON body, decoded from JSON.
    pub async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        debug!(path, "PATCH");
        let body = encode_body(body)?;
        let response = self
            .http
            .dispatch_once(Method::PATCH, path, Some(&body))
            .await?;
        self.http.decode(response).await
    }

    /// Single DELETE, decoded from JSON.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        debug!(path, "DELETE");
        let response = self.http.dispatch_once(Method::DELETE, path, None).await?;
        self.http.decode(response).await
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.http.base_url
    }
}

fn encode_body<B: Serialize>(body: &B) -> ApiResult<serde_json::Value> {
    serde_json::to_value(body).map_err(|e| ApiError::InvalidResponse {
        message: format!("failed to encode request body: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let config = ClientConfig::default().with_base_url("https://app.rentdesk.io/");
        let client = PortalClient::new(config).expect("failed to create client");
        assert_eq!(client.base_url(), "https://app.rentdesk.io");
    }

    #[tokio::test]
    async fn test_login_rejects_empty_token() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let store = SessionStore::with_dir(temp_dir.path());
        let client = PortalClient::new(ClientConfig::default()).unwrap();

        let result = client.login(&store, "").await;
        assert!(matches!(result, Err(ApiError::Validation { .. })));
    }
}
