use async_trait::async_trait;
use chrono::NaiveDate;

use crate::modules::auth::application::domain::UserId;

#[derive(Debug, Clone, thiserror::Error)]
pub enum QuotaStoreError {
    #[error("Quota store error: {0}")]
    StoreError(String),
}

/// Keyed deployment counter, one record per `(user, calendar day)`.
///
/// `try_increment` is the only write and it is a single atomic
/// check-and-increment: it reserves a slot and reports whether the
/// reservation fit under `max`. Splitting check and increment into two
/// round trips would let concurrent publishes overshoot the cap.
#[async_trait]
pub trait QuotaStore: Send + Sync {
    /// Current count for the day, `None` when no deploy happened yet.
    async fn get_count(
        &self,
        user: UserId,
        date: NaiveDate,
    ) -> Result<Option<u32>, QuotaStoreError>;

    /// Atomically increment iff the current count is below `max`.
    /// Returns whether the increment was applied.
    async fn try_increment(
        &self,
        user: UserId,
        date: NaiveDate,
        max: u32,
    ) -> Result<bool, QuotaStoreError>;
}
