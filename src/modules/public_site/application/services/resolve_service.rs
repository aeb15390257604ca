use async_trait::async_trait;
use tracing::error;

use crate::modules::editor::application::domain::EditorState;
use crate::modules::public_site::application::ports::incoming::use_cases::{
    PublicPortfolioView, ResolveError, ResolvePublicPortfolioUseCase,
};
use crate::modules::publish::application::domain::normalize_username;
use crate::modules::publish::application::ports::outgoing::PortfolioRepository;

/// Read side of the published store. Shares the publish module's
/// repository port so reads and writes can never disagree about keys.
pub struct PublicSiteService<R>
where
    R: PortfolioRepository + Send + Sync,
{
    repository: R,
}

impl<R> PublicSiteService<R>
where
    R: PortfolioRepository + Send + Sync,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> ResolvePublicPortfolioUseCase for PublicSiteService<R>
where
    R: PortfolioRepository + Send + Sync,
{
    async fn execute(&self, raw_username: &str) -> Result<PublicPortfolioView, ResolveError> {
        let username = normalize_username(raw_username);
        if username.is_empty() {
            return Err(ResolveError::NotFound);
        }

        let record = self
            .repository
            .get_by_username(&username)
            .await
            .map_err(|err| ResolveError::RepositoryError(err.to_string()))?
            .ok_or(ResolveError::NotFound)?;

        // A stored document this service cannot read back is a data bug,
        // not a missing page.
        let snapshot: EditorState = serde_json::from_value(record.data).map_err(|err| {
            error!("published document for '{username}' is unreadable: {err}");
            ResolveError::RepositoryError(format!("stored document is unreadable: {err}"))
        })?;

        Ok(PublicPortfolioView {
            username: record.username,
            snapshot,
            updated_at: record.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    use crate::modules::auth::application::domain::UserId;
    use crate::modules::editor::application::domain::default_editor_state;
    use crate::modules::editor::application::services::EditorSession;
    use crate::modules::publish::application::domain::sanitize_snapshot;
    use crate::modules::publish::application::ports::outgoing::{
        PublishedPortfolio, UpsertPortfolio,
    };
    use crate::tests::support::fakes::InMemoryPortfolioRepository;

    fn published(username: &str) -> UpsertPortfolio {
        UpsertPortfolio {
            username: username.to_string(),
            user_id: UserId::from(Uuid::new_v4()),
            data: sanitize_snapshot(&default_editor_state()).unwrap(),
        }
    }

    async fn seeded_service(username: &str) -> PublicSiteService<InMemoryPortfolioRepository> {
        let repo = InMemoryPortfolioRepository::default();
        use crate::modules::publish::application::ports::outgoing::PortfolioRepository as _;
        repo.upsert(published(username)).await.unwrap();
        PublicSiteService::new(repo)
    }

    #[tokio::test]
    async fn resolves_a_published_portfolio() {
        let service = seeded_service("ada").await;

        let view = service.execute("ada").await.unwrap();

        assert_eq!(view.username, "ada");
        assert_eq!(view.snapshot.portfolio_data.name, "Your Name");
    }

    #[tokio::test]
    async fn lookup_normalizes_like_publishing_does() {
        let service = seeded_service("ada").await;

        let view = service.execute("  ADA  ").await.unwrap();

        assert_eq!(view.username, "ada");
    }

    #[tokio::test]
    async fn unknown_username_is_not_found() {
        let service = seeded_service("ada").await;

        let result = service.execute("nobody").await;

        assert!(matches!(result, Err(ResolveError::NotFound)));
    }

    #[tokio::test]
    async fn unusable_raw_input_is_not_found_without_a_lookup() {
        let service = seeded_service("ada").await;

        let result = service.execute("  !!!  ").await;

        assert!(matches!(result, Err(ResolveError::NotFound)));
    }

    #[tokio::test]
    async fn unreadable_stored_document_is_a_repository_error() {
        let repo = InMemoryPortfolioRepository::default();
        repo.insert_raw(PublishedPortfolio {
            username: "ada".to_string(),
            user_id: UserId::from(Uuid::new_v4()),
            data: json!({"mode": 42}),
            updated_at: Utc::now(),
        });
        let service = PublicSiteService::new(repo);

        let result = service.execute("ada").await;

        assert!(matches!(result, Err(ResolveError::RepositoryError(_))));
    }

    #[tokio::test]
    async fn resolved_snapshot_seeds_a_read_only_editor() {
        let service = seeded_service("ada").await;

        let view = service.execute("ada").await.unwrap();
        let session = EditorSession::read_only(view.snapshot);

        assert_eq!(session.state().portfolio_data.name, "Your Name");
    }
}
