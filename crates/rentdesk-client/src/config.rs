//! Client configuration.

use serde::{Deserialize, Serialize};

/// Portal client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL for the portal backend.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries for retryable failures (attempts = 1 + retries).
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Seconds a cached query result counts as fresh.
    #[serde(default = "default_stale_after")]
    pub stale_after_secs: u64,

    /// Seconds a cached query result is retained after last use.
    #[serde(default = "default_retain_for")]
    pub retain_for_secs: u64,
}

fn default_base_url() -> String {
    "https://app.rentdesk.io".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    2
}

fn default_stale_after() -> u64 {
    5 * 60
}

fn default_retain_for() -> u64 {
    10 * 60
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            max_retries: default_max_retries(),
            stale_after_secs: default_stale_after(),
            retain_for_secs: default_retain_for(),
        }
    }
}

impl ClientConfig {
    /// Create config from environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `RENTDESK_API_URL` | Backend base URL |
    /// | `RENTDESK_API_TIMEOUT` | Request timeout in seconds |
    /// | `RENTDESK_API_MAX_RETRIES` | Max retries for retryable failures |
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("RENTDESK_API_URL").unwrap_or_else(|_| default_base_url()),
            timeout_secs: std::env::var("RENTDESK_API_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_timeout),
            max_retries: std::env::var("RENTDESK_API_MAX_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_max_retries),
            stale_after_secs: default_stale_after(),
            retain_for_secs: default_retain_for(),
        }
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the retry budget.
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the freshness window.
    pub fn with_stale_after(mut self, secs: u64) -> Self {
        self.stale_after_secs = secs;
        self
    }

    /// Set the retention window.
    pub fn with_retain_for(mut self, secs: u64) -> Self {
        self.retain_for_secs = secs;
        self
    }
}
