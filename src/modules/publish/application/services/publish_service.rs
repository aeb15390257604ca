use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::modules::auth::application::domain::AuthSession;
use crate::modules::publish::application::domain::sanitize_snapshot;
use crate::modules::publish::application::ports::incoming::use_cases::{
    PublishCommand, PublishError, PublishPortfolioUseCase, PublishReceipt,
};
use crate::modules::publish::application::ports::outgoing::{
    PortfolioRepository, PortfolioRepositoryError, QuotaStore, UpsertPortfolio,
};
use crate::modules::publish::application::services::DeploymentQuota;

/// Upper bound on each I/O step of a publish attempt. An unresponsive
/// backend reads as a failed step, never as a grant.
pub const PUBLISH_STEP_TIMEOUT: Duration = Duration::from_secs(10);

/// One publish attempt end to end.
///
/// Step order is fixed: validation at command construction, then auth,
/// then the atomic quota reservation, then sanitize, then the
/// ownership-gated upsert. Each
/// step runs only after the previous succeeded, and nothing here retries.
///
/// A quota slot consumed before a failed write stays consumed. Refunding
/// it would reintroduce the read-modify-write race the atomic reservation
/// exists to close, so the slot is the accepted cost of a failed save.
pub struct PublishService<S, R>
where
    S: QuotaStore + Send + Sync,
    R: PortfolioRepository + Send + Sync,
{
    quota: DeploymentQuota<S>,
    repository: R,
    public_base_url: String,
    step_timeout: Duration,
}

impl<S, R> PublishService<S, R>
where
    S: QuotaStore + Send + Sync,
    R: PortfolioRepository + Send + Sync,
{
    pub fn new(quota: DeploymentQuota<S>, repository: R, public_base_url: String) -> Self {
        Self {
            quota,
            repository,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
            step_timeout: PUBLISH_STEP_TIMEOUT,
        }
    }

    #[cfg(test)]
    pub fn with_step_timeout(mut self, timeout: Duration) -> Self {
        self.step_timeout = timeout;
        self
    }

    fn public_url(&self, username: &str) -> String {
        format!("{}/{}", self.public_base_url, username)
    }

    async fn bounded<T, F>(&self, step: &'static str, fut: F) -> Result<T, PublishError>
    where
        F: Future<Output = T>,
    {
        tokio::time::timeout(self.step_timeout, fut)
            .await
            .map_err(|_| {
                warn!("publish step '{step}' timed out");
                PublishError::StorageFailure(format!("{step} timed out"))
            })
    }
}

#[async_trait]
impl<S, R> PublishPortfolioUseCase for PublishService<S, R>
where
    S: QuotaStore + Send + Sync,
    R: PortfolioRepository + Send + Sync,
{
    async fn execute(
        &self,
        session: Option<AuthSession>,
        command: PublishCommand,
    ) -> Result<PublishReceipt, PublishError> {
        // Auth gate: abort before any quota or repository traffic.
        let session = session.ok_or(PublishError::AuthRequired)?;
        let owner = session.user_id;

        // Atomic check-and-increment; one round trip, no refunds.
        let reserved = self
            .bounded("quota reservation", self.quota.try_reserve(owner))
            .await
            .map_err(|_| PublishError::QuotaNotRecorded)?
            .map_err(|err| {
                warn!("quota reservation failed for {owner}: {err}");
                PublishError::QuotaNotRecorded
            })?;
        if !reserved {
            return Err(PublishError::QuotaExceeded);
        }

        // Plain data only crosses the repository boundary.
        let data = sanitize_snapshot(command.snapshot()).map_err(|err| {
            warn!("snapshot failed sanitization: {err}");
            PublishError::StorageFailure(err.to_string())
        })?;

        let payload = UpsertPortfolio {
            username: command.username().to_string(),
            user_id: owner,
            data,
        };

        let saved = self
            .bounded("portfolio save", self.repository.upsert(payload))
            .await?
            .map_err(|err| match err {
                PortfolioRepositoryError::OwnedByAnotherUser => PublishError::UsernameTaken,
                PortfolioRepositoryError::DatabaseError(msg) => {
                    warn!("portfolio save failed for {owner}: {msg}");
                    PublishError::StorageFailure(msg)
                }
            })?;

        info!("published portfolio '{}' for {owner}", saved.username);

        Ok(PublishReceipt {
            url: self.public_url(&saved.username),
            username: saved.username,
            updated_at: saved.updated_at,
        })
    }
}
