use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::modules::auth::application::domain::UserId;

//
// ──────────────────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, thiserror::Error)]
pub enum PortfolioRepositoryError {
    /// The username is already claimed by a different owner.
    #[error("Username is owned by another user")]
    OwnedByAnotherUser,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

//
// ──────────────────────────────────────────────────────────
// Records
// ──────────────────────────────────────────────────────────
//

/// The canonical published record: one row per username, keyed by the
/// normalized name, holding the sanitized content snapshot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedPortfolio {
    pub username: String,
    pub user_id: UserId,
    pub data: Value,
    pub updated_at: DateTime<Utc>,
}

/// Write payload. `username` must already be normalized and `data` already
/// sanitized; the repository stores both verbatim.
#[derive(Debug, Clone)]
pub struct UpsertPortfolio {
    pub username: String,
    pub user_id: UserId,
    pub data: Value,
}

//
// ──────────────────────────────────────────────────────────
// Port
// ──────────────────────────────────────────────────────────
//

#[async_trait]
pub trait PortfolioRepository: Send + Sync {
    async fn get_by_username(
        &self,
        normalized_username: &str,
    ) -> Result<Option<PublishedPortfolio>, PortfolioRepositoryError>;

    /// Create or overwrite the record for `username`.
    ///
    /// Ownership-gated and atomic at the storage layer: the same owner
    /// overwrites freely (last writer wins), a different owner gets
    /// `OwnedByAnotherUser`, and two first claims for one name cannot both
    /// succeed.
    async fn upsert(
        &self,
        payload: UpsertPortfolio,
    ) -> Result<PublishedPortfolio, PortfolioRepositoryError>;
}
