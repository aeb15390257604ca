use async_trait::async_trait;

use crate::modules::auth::application::domain::{AuthSession, SignedInSession};

//
// ──────────────────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthProviderError {
    #[error("Invalid email address")]
    InvalidEmail,

    /// The link token is unknown, expired, or already redeemed.
    #[error("Sign-in link is no longer valid")]
    LinkInvalid,

    #[error("Could not deliver sign-in email: {0}")]
    MailDelivery(String),

    #[error("Auth backend error: {0}")]
    Backend(String),
}

//
// ──────────────────────────────────────────────────────────
// Port (consumed capability)
// ──────────────────────────────────────────────────────────
//
// The publish pipeline only ever reads a session snapshot from this port.
// The sign-in link is an out-of-band side channel: completing it
// establishes a session, it never resumes an aborted publish.
//

#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Resolve a bearer token to its live session, if any.
    async fn session_for_token(
        &self,
        token: &str,
    ) -> Result<Option<AuthSession>, AuthProviderError>;

    /// Send a single-use sign-in link to `email`.
    async fn request_sign_in_link(&self, email: &str) -> Result<(), AuthProviderError>;

    /// Redeem a sign-in link token for a fresh session. The link token is
    /// consumed even when the caller discards the result.
    async fn complete_sign_in(&self, link_token: &str)
        -> Result<SignedInSession, AuthProviderError>;
}
