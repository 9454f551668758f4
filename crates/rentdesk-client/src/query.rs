//! Auth-gated, cached fetch layer.
//!
//! A query is identified by a [`QueryKey`] (an ordered sequence of primitive
//! parts, the first conventionally the URL path). Fetches are gated on the
//! session: nothing dispatches while the session is bootstrapping,
//! unauthenticated, or holding an empty token — gated calls resolve to
//! [`FetchOutcome::NotEnabled`] instead of erroring.
//!
//! Results are cached per key: fresh for `stale_after` (no network call),
//! retained for `retain_for` after last use (served as a fallback when a
//! refresh fails with a retryable error). Concurrent fetches for the same
//! key share one in-flight request.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use reqwest::Method;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex as FlightMutex;
use tracing::{debug, warn};

use crate::client::HttpBackend;
use crate::error::{ApiError, ApiResult};

/// Default freshness window (5 minutes).
pub const DEFAULT_STALE_AFTER: Duration = Duration::from_secs(5 * 60);

/// Default retention window (10 minutes).
pub const DEFAULT_RETAIN_FOR: Duration = Duration::from_secs(10 * 60);

/// One part of a query key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyPart {
    Str(String),
    Int(i64),
    Bool(bool),
}

impl From<&str> for KeyPart {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for KeyPart {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<i64> for KeyPart {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for KeyPart {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<bool> for KeyPart {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl fmt::Display for KeyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(v) => write!(f, "{}", v),
            Self::Int(v) => write!(f, "{}", v),
            Self::Bool(v) => write!(f, "{}", v),
        }
    }
}

/// Cache key for a query: ordered primitive parts, first part the URL path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    parts: Vec<KeyPart>,
}

impl QueryKey {
    /// Create a key whose first part is a URL path.
    pub fn path(path: impl Into<String>) -> Self {
        Self {
            parts: vec![KeyPart::Str(path.into())],
        }
    }

    /// Append a discriminating part (page number, filter, flag).
    pub fn and(mut self, part: impl Into<KeyPart>) -> Self {
        self.parts.push(part.into());
        self
    }

    /// The URL path (first part), if this key starts with one.
    pub fn url_path(&self) -> Option<&str> {
        match self.parts.first() {
            Some(KeyPart::Str(path)) => Some(path),
            _ => None,
        }
    }

    /// All parts, in order.
    pub fn parts(&self) -> &[KeyPart] {
        &self.parts
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                write!(f, ":")?;
            }
            write!(f, "{}", part)?;
        }
        Ok(())
    }
}

/// Per-query overrides for freshness, retention, and enablement.
#[derive(Debug, Clone)]
pub struct QueryOptions {
    /// How long a cached result counts as fresh.
    pub stale_after: Duration,

    /// How long a cached result is retained after last use.
    pub retain_for: Duration,

    /// When false, the query never dispatches (caller-side gating on top of
    /// session gating).
    pub enabled: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            stale_after: DEFAULT_STALE_AFTER,
            retain_for: DEFAULT_RETAIN_FOR,
            enabled: true,
        }
    }
}

/// Outcome of a gated fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome<T> {
    /// Gating precondition not met; no network call was made.
    NotEnabled,

    /// Decoded value (from cache or network).
    Value(T),
}

impl<T> FetchOutcome<T> {
    /// The value, if the query was enabled.
    pub fn value(self) -> Option<T> {
        match self {
            Self::NotEnabled => None,
            Self::Value(v) => Some(v),
        }
    }

    /// True unless the query was gated off.
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Value(_))
    }
}

#[derive(Debug)]
struct CacheEntry {
    value: serde_json::Value,
    fetched_at: Instant,
    last_used: Instant,
    retain_for: Duration,
    epoch: u64,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<QueryKey, CacheEntry>,
    flights: HashMap<QueryKey, Arc<FlightMutex<()>>>,
}

/// Auth-gated query layer over the portal HTTP backend.
#[derive(Debug, Clone)]
pub struct QueryClient {
    backend: HttpBackend,
    state: Arc<Mutex<CacheState>>,
}

impl QueryClient {
    pub(crate) fn new(backend: HttpBackend) -> Self {
        Self {
            backend,
            state: Arc::new(Mutex::new(CacheState::default())),
        }
    }

    /// Options derived from the client configuration.
    pub fn default_options(&self) -> QueryOptions {
        QueryOptions {
            stale_after: Duration::from_secs(self.backend.config.stale_after_secs),
            retain_for: Duration::from_secs(self.backend.config.retain_for_secs),
            enabled: true,
        }
    }

    /// Gated, cached GET against the key's URL path.
    pub async fn fetch<T: DeserializeOwned>(&self, key: &QueryKey) -> ApiResult<FetchOutcome<T>> {
        self.fetch_with_options(key, self.default_options()).await
    }

    /// [`Self::fetch`] with per-query options.
    ///
    /// The default producer applies the client's retry budget; 401/403 are
    /// never retried.
    pub async fn fetch_with_options<T: DeserializeOwned>(
        &self,
        key: &QueryKey,
        options: QueryOptions,
    ) -> ApiResult<FetchOutcome<T>> {
        let path = key
            .url_path()
            .ok_or_else(|| ApiError::Config {
                message: format!("query key `{}` has no URL path", key),
            })?
            .to_string();
        let backend = self.backend.clone();

        self.fetch_with(key, options, move || async move {
            let response = backend.dispatch(Method::GET, &path, None).await?;
            backend.decode::<serde_json::Value>(response).await
        })
        .await
    }

    /// Gated, cached fetch with a caller-supplied producer.
    ///
    /// The producer only runs when the cache has no fresh value for the key
    /// and no identical fetch is already in flight.
    pub async fn fetch_with<T, F, Fut>(
        &self,
        key: &QueryKey,
        options: QueryOptions,
        fetch_fn: F,
    ) -> ApiResult<FetchOutcome<T>>
    where
        T: DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ApiResult<serde_json::Value>>,
    {
        let snapshot = self.backend.session.snapshot().await;
        if !options.enabled || !snapshot.is_ready() {
            debug!(key = %key, "query not enabled (session not ready)");
            return Ok(FetchOutcome::NotEnabled);
        }

        if let Some(value) = self.cached_fresh(key, &options, snapshot.epoch) {
            debug!(key = %key, "query served from cache");
            return decode_value(value);
        }

        // Single-flight: one producer per key at a time. Waiters re-check the
        // cache once the lock is theirs.
        let flight = self.flight(key);
        let _guard = flight.lock().await;

        let outcome = self
            .fetch_locked(key, &options, snapshot.epoch, fetch_fn)
            .await;
        self.finish_flight(key);
        outcome
    }

    async fn fetch_locked<T, F, Fut>(
        &self,
        key: &QueryKey,
        options: &QueryOptions,
        epoch: u64,
        fetch_fn: F,
    ) -> ApiResult<FetchOutcome<T>>
    where
        T: DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ApiResult<serde_json::Value>>,
    {
        if let Some(value) = self.cached_fresh(key, options, epoch) {
            debug!(key = %key, "query served from cache after in-flight fetch");
            return decode_value(value);
        }

        let result = fetch_fn().await;

        // The session may have been invalidated while the request was in
        // flight; the result belongs to a session that no longer exists.
        let current_epoch = self.backend.session.epoch().await;
        if current_epoch != epoch {
            debug!(key = %key, "discarding result from invalidated session");
            return Ok(FetchOutcome::NotEnabled);
        }

        match result {
            Ok(value) => {
                self.insert(key.clone(), value.clone(), options, epoch);
                debug!(key = %key, "query fetched and cached");
                decode_value(value)
            }
            Err(e) if e.is_retryable() => match self.cached_retained(key, epoch) {
                Some(stale) => {
                    warn!(key = %key, error = %e, "refresh failed, serving retained value");
                    decode_value(stale)
                }
                None => Err(e),
            },
            Err(e) => Err(e),
        }
    }

    /// Drop the cached value for a key (e.g. after a mutation touching it).
    pub fn invalidate(&self, key: &QueryKey) {
        let mut state = self.state.lock().unwrap();
        state.entries.remove(key);
    }

    /// Drop all cached values.
    pub fn clear(&self) {
        let mut state = self.state.lock().unwrap();
        state.entries.clear();
    }

    /// Number of retained cache entries (after a retention sweep).
    pub fn cached_len(&self) -> usize {
        let mut state = self.state.lock().unwrap();
        let now = Instant::now();
        state
            .entries
            .retain(|_, entry| now.duration_since(entry.last_used) <= entry.retain_for);
        state.entries.len()
    }

    fn cached_fresh(
        &self,
        key: &QueryKey,
        options: &QueryOptions,
        epoch: u64,
    ) -> Option<serde_json::Value> {
        let mut state = self.state.lock().unwrap();
        let now = Instant::now();
        state
            .entries
            .retain(|_, entry| now.duration_since(entry.last_used) <= entry.retain_for);

        let entry = state.entries.get_mut(key)?;
        if entry.epoch != epoch {
            return None;
        }
        if now.duration_since(entry.fetched_at) > options.stale_after {
            return None;
        }
        entry.last_used = now;
        Some(entry.value.clone())
    }

    fn cached_retained(&self, key: &QueryKey, epoch: u64) -> Option<serde_json::Value> {
        let mut state = self.state.lock().unwrap();
        let now = Instant::now();
        let entry = state.entries.get_mut(key)?;
        if entry.epoch != epoch || now.duration_since(entry.last_used) > entry.retain_for {
            return None;
        }
        entry.last_used = now;
        Some(entry.value.clone())
    }

    fn insert(&self, key: QueryKey, value: serde_json::Value, options: &QueryOptions, epoch: u64) {
        let now = Instant::now();
        let mut state = self.state.lock().unwrap();
        state.entries.insert(
            key,
            CacheEntry {
                value,
                fetched_at: now,
                last_used: now,
                retain_for: options.retain_for,
                epoch,
            },
        );
    }

    fn flight(&self, key: &QueryKey) -> Arc<FlightMutex<()>> {
        let mut state = self.state.lock().unwrap();
        state
            .flights
            .entry(key.clone())
            .or_insert_with(|| Arc::new(FlightMutex::new(())))
            .clone()
    }

    fn finish_flight(&self, key: &QueryKey) {
        let mut state = self.state.lock().unwrap();
        state.flights.remove(key);
    }
}

fn decode_value<T: DeserializeOwned>(value: serde_json::Value) -> ApiResult<FetchOutcome<T>> {
    serde_json::from_value(value)
        .map(FetchOutcome::Value)
        .map_err(|e| ApiError::InvalidResponse {
            message: format!("failed to decode response body: {}", e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_parts_and_display() {
        let key = QueryKey::path("/api/tenants").and("page").and(2i64).and(true);
        assert_eq!(key.url_path(), Some("/api/tenants"));
        assert_eq!(key.parts().len(), 4);
        assert_eq!(key.to_string(), "/api/tenants:page:2:true");
    }

    #[test]
    fn test_keys_with_same_parts_are_equal() {
        let a = QueryKey::path("/api/tenants").and(1i64);
        let b = QueryKey::path("/api/tenants").and(1i64);
        let c = QueryKey::path("/api/tenants").and(2i64);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_default_options() {
        let options = QueryOptions::default();
        assert_eq!(options.stale_after, Duration::from_secs(300));
        assert_eq!(options.retain_for, Duration::from_secs(600));
        assert!(options.enabled);
    }

    #[test]
    fn test_outcome_value() {
        let enabled: FetchOutcome<u32> = FetchOutcome::Value(7);
        let disabled: FetchOutcome<u32> = FetchOutcome::NotEnabled;
        assert!(enabled.is_enabled());
        assert_eq!(enabled.value(), Some(7));
        assert!(!disabled.is_enabled());
        assert_eq!(disabled.value(), None);
    }
}
