//! Auth-gated fetch and cache layer for the Rentdesk portal API.
//!
//! This crate implements the client side of the portal's REST surface,
//! providing:
//!
//! - Session state machine (bootstrapping → unauthenticated ⇄ authenticated)
//!   with an epoch guard for in-flight requests
//! - Auth-gated query layer: no request dispatches without a usable token,
//!   results are cached with freshness/retention windows, identical
//!   concurrent fetches share one network call
//! - Retry classification: 401/403 are terminal, transport and server
//!   failures retry with jittered exponential backoff
//! - Plain JSON request helpers for one-off mutations (no retry, no cache)
//! - On-disk session store for the token and cached profile record
//!
//! # Quick Start
//!
//! ```no_run
//! use rentdesk_client::{ClientConfig, PortalClient, QueryKey, SessionStore};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = PortalClient::new(ClientConfig::from_env())?;
//!
//! // Settle the session out of Bootstrapping before anything dispatches
//! let store = SessionStore::new()?;
//! client.bootstrap(&store).await;
//!
//! // Gated, cached read
//! let key = QueryKey::path("/api/tenants");
//! if let Some(tenants) = client.query().fetch::<serde_json::Value>(&key).await?.value() {
//!     println!("{} tenants", tenants.as_array().map_or(0, Vec::len));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `RENTDESK_API_URL` | Backend base URL (default: `https://app.rentdesk.io`) |
//! | `RENTDESK_API_TIMEOUT` | Request timeout in seconds (default: 30) |
//! | `RENTDESK_API_MAX_RETRIES` | Max retries for retryable failures (default: 2) |

pub mod client;
pub mod config;
pub mod error;
pub mod query;
pub mod session;
pub mod store;

// Re-export main types
pub use client::{PortalClient, PORTAL_USER_AGENT};
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult};
pub use query::{
    FetchOutcome, KeyPart, QueryClient, QueryKey, QueryOptions, DEFAULT_RETAIN_FOR,
    DEFAULT_STALE_AFTER,
};
pub use session::{Session, SessionSnapshot, SessionState};
pub use store::SessionStore;
