use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::modules::editor::application::domain::EditorState;

//
// ──────────────────────────────────────────────────────────
// Errors / view
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, thiserror::Error)]
pub enum ResolveError {
    /// No published portfolio under that name.
    #[error("Portfolio not found")]
    NotFound,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

/// Everything a public renderer needs: the full snapshot as published,
/// plus freshness.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicPortfolioView {
    pub username: String,
    pub snapshot: EditorState,
    pub updated_at: DateTime<Utc>,
}

//
// ──────────────────────────────────────────────────────────
// Incoming Port (Use Case)
// ──────────────────────────────────────────────────────────
//

/// Resolve a public portfolio by username. The lookup normalizes its
/// input the same way publishing does, so any casing of a claimed name
/// resolves to the same record.
#[async_trait]
pub trait ResolvePublicPortfolioUseCase: Send + Sync {
    async fn execute(&self, raw_username: &str) -> Result<PublicPortfolioView, ResolveError>;
}
