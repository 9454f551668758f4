//! Session state shared between the fetch layer and the host application.
//!
//! The session is the only shared mutable resource in the client: one writer
//! (the auth layer, via the methods here), many readers (every gated
//! request). Readers take point-in-time [`SessionSnapshot`]s; they never hold
//! the lock across a network call.
//!
//! The epoch counter increments on every invalidation. A request that was
//! dispatched under epoch N and completes under epoch M != N belongs to a
//! session that no longer exists; the fetch layer discards its result.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

/// Authentication lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Startup: stored credentials are still being loaded. No gated request
    /// dispatches in this state.
    Bootstrapping,

    /// No valid credential present.
    Unauthenticated,

    /// A token is present and usable.
    Authenticated,
}

#[derive(Debug)]
struct SessionInner {
    state: SessionState,
    token: Option<String>,
    epoch: u64,
}

/// Shared session handle.
#[derive(Debug, Clone)]
pub struct Session {
    inner: Arc<RwLock<SessionInner>>,
}

/// Point-in-time view of the session.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    /// Lifecycle state at snapshot time.
    pub state: SessionState,

    /// Token at snapshot time.
    pub token: Option<String>,

    /// Invalidation epoch at snapshot time.
    pub epoch: u64,
}

impl SessionSnapshot {
    /// True when gated requests may dispatch: bootstrap finished, state is
    /// authenticated, and a non-empty token is present.
    pub fn is_ready(&self) -> bool {
        self.state == SessionState::Authenticated && self.bearer().is_some()
    }

    /// The bearer token, if non-empty.
    pub fn bearer(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }
}

impl Session {
    /// Create a session in the `Bootstrapping` state.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(SessionInner {
                state: SessionState::Bootstrapping,
                token: None,
                epoch: 0,
            })),
        }
    }

    /// Take a point-in-time snapshot.
    pub async fn snapshot(&self) -> SessionSnapshot {
        let inner = self.inner.read().await;
        SessionSnapshot {
            state: inner.state,
            token: inner.token.clone(),
            epoch: inner.epoch,
        }
    }

    /// Current lifecycle state.
    pub async fn state(&self) -> SessionState {
        self.inner.read().await.state
    }

    /// Current invalidation epoch.
    pub async fn epoch(&self) -> u64 {
        self.inner.read().await.epoch
    }

    /// Finish startup bootstrap with an optional stored token.
    ///
    /// A non-empty token moves the session to `Authenticated`; otherwise it
    /// settles in `Unauthenticated`.
    pub async fn finish_bootstrap(&self, token: Option<String>) {
        let mut inner = self.inner.write().await;
        match token.filter(|t| !t.is_empty()) {
            Some(token) => {
                inner.token = Some(token);
                inner.state = SessionState::Authenticated;
                debug!("session bootstrap complete: stored token found");
            }
            None => {
                inner.token = None;
                inner.state = SessionState::Unauthenticated;
                debug!("session bootstrap complete: no stored token");
            }
        }
    }

    /// Install a fresh token (login).
    pub async fn authenticate(&self, token: impl Into<String>) {
        let token = token.into();
        let mut inner = self.inner.write().await;
        inner.token = Some(token);
        inner.state = SessionState::Authenticated;
        info!("session authenticated");
    }

    /// Drop the credential (logout or 401/403 from a gated request).
    ///
    /// Bumps the epoch so in-flight results from the old session are
    /// discarded on completion.
    pub async fn invalidate(&self) {
        let mut inner = self.inner.write().await;
        inner.token = None;
        inner.state = SessionState::Unauthenticated;
        inner.epoch += 1;
        info!(epoch = inner.epoch, "session invalidated");
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_starts_bootstrapping() {
        let session = Session::new();
        assert_eq!(session.state().await, SessionState::Bootstrapping);
        assert!(!session.snapshot().await.is_ready());
    }

    #[tokio::test]
    async fn test_bootstrap_with_token() {
        let session = Session::new();
        session.finish_bootstrap(Some("abc123".to_string())).await;

        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.state, SessionState::Authenticated);
        assert!(snapshot.is_ready());
        assert_eq!(snapshot.bearer(), Some("abc123"));
    }

    #[tokio::test]
    async fn test_bootstrap_without_token() {
        let session = Session::new();
        session.finish_bootstrap(None).await;
        assert_eq!(session.state().await, SessionState::Unauthenticated);
        assert!(!session.snapshot().await.is_ready());
    }

    #[tokio::test]
    async fn test_empty_token_is_not_ready() {
        let session = Session::new();
        session.finish_bootstrap(Some(String::new())).await;
        assert_eq!(session.state().await, SessionState::Unauthenticated);

        session.authenticate("").await;
        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.state, SessionState::Authenticated);
        assert!(!snapshot.is_ready(), "empty token must not gate open");
    }

    #[tokio::test]
    async fn test_invalidate_bumps_epoch_and_drops_token() {
        let session = Session::new();
        session.authenticate("abc123").await;
        assert_eq!(session.epoch().await, 0);

        session.invalidate().await;
        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.state, SessionState::Unauthenticated);
        assert!(snapshot.token.is_none());
        assert_eq!(snapshot.epoch, 1);

        session.invalidate().await;
        assert_eq!(session.epoch().await, 2);
    }
}
