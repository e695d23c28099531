//! Authorization state for decoration fetches.

use parking_lot::RwLock;
use tracing::debug;

/// Holds the token/session context decoration fetches require.
///
/// The cache holds a shared reference and reads the token per fetch; this
/// state is the token's single owner. Teardown clears it and is safe to
/// call more than once.
#[derive(Debug, Default)]
pub struct AuthorizationState {
    token: RwLock<Option<String>>,
}

impl AuthorizationState {
    /// Create an unauthorized state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a state carrying a bearer token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }

    /// Replace the bearer token.
    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write() = Some(token.into());
    }

    /// The current bearer token, if any.
    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    /// Whether a token is currently held.
    pub fn is_authorized(&self) -> bool {
        self.token.read().is_some()
    }

    /// Drop the session context. Idempotent.
    pub fn teardown(&self) {
        let had_token = self.token.write().take().is_some();
        debug!(had_token, "authorization state torn down");
    }
}
