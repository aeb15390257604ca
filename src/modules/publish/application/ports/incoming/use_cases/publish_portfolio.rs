use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::modules::auth::application::domain::AuthSession;
use crate::modules::editor::application::domain::EditorState;
use crate::modules::publish::application::domain::{
    is_normalized_username, normalize_username, MAX_USERNAME_LEN,
};

//
// ──────────────────────────────────────────────────────────
// Command
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
pub struct PublishCommand {
    username: String,
    snapshot: EditorState,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum PublishCommandError {
    /// Nothing usable left after normalization.
    #[error("Username is required")]
    EmptyUsername,

    #[error("Username is longer than {MAX_USERNAME_LEN} characters")]
    UsernameTooLong,
}

impl PublishCommand {
    /// Normalize and validate up front so the uniqueness check and the
    /// storage key can never disagree about the name.
    pub fn new(raw_username: &str, snapshot: EditorState) -> Result<Self, PublishCommandError> {
        let username = normalize_username(raw_username);

        if username.is_empty() {
            return Err(PublishCommandError::EmptyUsername);
        }
        if !is_normalized_username(&username) {
            return Err(PublishCommandError::UsernameTooLong);
        }

        Ok(Self { username, snapshot })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn snapshot(&self) -> &EditorState {
        &self.snapshot
    }
}

//
// ──────────────────────────────────────────────────────────
// Errors / receipt
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, thiserror::Error)]
pub enum PublishError {
    /// No session: the attempt aborts cleanly before any quota or write.
    /// The caller prompts for sign-in; the user re-invokes publish after.
    #[error("Sign-in required to publish")]
    AuthRequired,

    #[error("Daily deployment limit reached")]
    QuotaExceeded,

    /// The quota store failed while recording the deployment. Fail-closed:
    /// nothing was published.
    #[error("Could not record deployment")]
    QuotaNotRecorded,

    #[error("Username already taken by another user")]
    UsernameTaken,

    /// Backend failure after the quota slot was consumed. The slot is not
    /// refunded; refunding would reopen the check/increment race.
    #[error("Save failed: {0}")]
    StorageFailure(String),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishReceipt {
    pub username: String,
    /// The live public URL.
    pub url: String,
    pub updated_at: DateTime<Utc>,
}

//
// ──────────────────────────────────────────────────────────
// Incoming Port (Use Case)
// ──────────────────────────────────────────────────────────
//

#[async_trait]
pub trait PublishPortfolioUseCase: Send + Sync {
    /// Run one publish attempt: validate, auth, quota check-and-increment,
    /// sanitize, ownership-gated upsert, strictly in that order.
    async fn execute(
        &self,
        session: Option<AuthSession>,
        command: PublishCommand,
    ) -> Result<PublishReceipt, PublishError>;
}
