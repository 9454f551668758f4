//! Error types for the portal client.

use std::time::Duration;

/// Portal client errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Credential rejected (HTTP 401/403). Terminal: never retried.
    #[error("authentication failed (HTTP {status}): {message}")]
    Auth { status: u16, message: String },

    /// Transport failure (DNS, connect, timeout, body read).
    #[error("network error: {message}")]
    Network { message: String },

    /// Rate limit exceeded (HTTP 429).
    #[error("rate limited: retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    /// Any other non-2xx response.
    #[error("server error (HTTP {status}): {message}")]
    Server { status: u16, message: String },

    /// Response body could not be decoded.
    #[error("invalid response: {message}")]
    InvalidResponse { message: String },

    /// Form-level validation failure. Never dispatched to the network.
    #[error("validation failed for `{field}`: {message}")]
    Validation { field: String, message: String },

    /// Configuration error.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// Session store error.
    #[error("session store error: {message}")]
    Store { message: String },
}

impl ApiError {
    /// Whether the error is retryable.
    ///
    /// 401/403 are terminal; everything transport- or server-shaped may be
    /// retried within the retry budget.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Network { .. } | Self::RateLimited { .. } | Self::Server { .. }
        )
    }

    /// Whether the error invalidates the session (401/403).
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Auth { status, .. } | Self::Server { status, .. } => Some(*status),
            Self::RateLimited { .. } => Some(429),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network {
            message: err.to_string(),
        }
    }
}

/// Result type for portal operations.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_is_terminal() {
        let err = ApiError::Auth {
            status: 401,
            message: "expired".to_string(),
        };
        assert!(!err.is_retryable());
        assert!(err.is_auth());
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_server_and_network_are_retryable() {
        let server = ApiError::Server {
            status: 500,
            message: "boom".to_string(),
        };
        let network = ApiError::Network {
            message: "connection reset".to_string(),
        };
        assert!(server.is_retryable());
        assert!(network.is_retryable());
        assert!(!server.is_auth());
        assert_eq!(server.status(), Some(500));
        assert_eq!(network.status(), None);
    }

    #[test]
    fn test_rate_limited_carries_429() {
        let err = ApiError::RateLimited {
            retry_after: Some(Duration::from_secs(5)),
        };
        assert!(err.is_retryable());
        assert_eq!(err.status(), Some(429));
    }

    #[test]
    fn test_validation_is_local() {
        let err = ApiError::Validation {
            field: "amount".to_string(),
            message: "must be positive".to_string(),
        };
        assert!(!err.is_retryable());
        assert!(!err.is_auth());
        assert_eq!(err.status(), None);
    }
}
