use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tracing::warn;

use crate::modules::auth::application::domain::UserId;
use crate::modules::publish::application::ports::incoming::use_cases::RemainingDeploysUseCase;
use crate::modules::publish::application::ports::outgoing::{QuotaStore, QuotaStoreError};

/// Default daily cap; overridable at deployment time, never at runtime.
pub const DEFAULT_DAILY_DEPLOY_LIMIT: u32 = 2;

/// Resolve the daily cap from its `DAILY_DEPLOY_LIMIT` setting. Absent or
/// unparseable values fall back to the default rather than failing startup.
pub fn daily_limit_from(raw: Option<String>) -> u32 {
    raw.and_then(|v| v.trim().parse().ok())
        .unwrap_or(DEFAULT_DAILY_DEPLOY_LIMIT)
}

/// Per-user-per-day deployment ledger over a keyed counter store.
///
/// Read paths are fail-closed: if the store cannot answer, the ledger
/// reports no quota left rather than guessing. The day boundary is UTC,
/// computed in exactly one place.
#[derive(Debug, Clone)]
pub struct DeploymentQuota<S>
where
    S: QuotaStore + Send + Sync,
{
    store: S,
    daily_limit: u32,
}

impl<S> DeploymentQuota<S>
where
    S: QuotaStore + Send + Sync,
{
    pub fn new(store: S, daily_limit: u32) -> Self {
        Self { store, daily_limit }
    }

    pub fn daily_limit(&self) -> u32 {
        self.daily_limit
    }

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    /// Deployments left today; 0 on any store failure.
    pub async fn remaining(&self, user: UserId) -> u32 {
        match self.store.get_count(user, Self::today()).await {
            Ok(count) => self.daily_limit.saturating_sub(count.unwrap_or(0)),
            Err(err) => {
                warn!("quota read failed, denying: {err}");
                0
            }
        }
    }

    pub async fn can_deploy(&self, user: UserId) -> bool {
        self.remaining(user).await > 0
    }

    /// Atomically reserve one deployment slot for today.
    ///
    /// `Ok(false)` means the cap is reached; `Err` means the store could
    /// not record the reservation; callers must treat both as "do not
    /// publish".
    pub async fn try_reserve(&self, user: UserId) -> Result<bool, QuotaStoreError> {
        self.store
            .try_increment(user, Self::today(), self.daily_limit)
            .await
    }
}

#[async_trait]
impl<S> RemainingDeploysUseCase for DeploymentQuota<S>
where
    S: QuotaStore + Send + Sync,
{
    async fn execute(&self, user: UserId) -> u32 {
        self.remaining(user).await
    }
}
