use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use deadpool_redis::{redis::AsyncCommands, Pool};

use crate::modules::auth::application::domain::UserId;
use crate::modules::publish::application::ports::outgoing::{QuotaStore, QuotaStoreError};

/// Counter keys outlive their day by a wide margin so a client straddling
/// midnight still sees its own deploys, then Redis drops them unattended.
const QUOTA_KEY_TTL_SECS: i64 = 60 * 60 * 48;

/// Redis-backed deployment counter.
///
/// ## Redis data model
///
/// One counter per `(user, UTC day)`:
/// ```text
/// deploy:quota:{user_id}:{yyyy-mm-dd} -> count
/// ```
///
/// ## Atomicity
///
/// `INCR` is the reservation. It is atomic on the server, so two racing
/// publishes get distinct counter values and at most `max` of them land
/// at or under the cap. A reservation that lands above the cap is handed
/// back with `DECR`; the counter value itself may briefly overshoot, but
/// no caller is ever told "granted" past the limit.
///
/// Redis TTL is the only cleanup; day keys simply age out.
#[derive(Clone)]
pub struct QuotaStoreRedis {
    pool: Arc<Pool>,
}

impl QuotaStoreRedis {
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool }
    }

    fn day_key(user: UserId, date: NaiveDate) -> String {
        format!("deploy:quota:{user}:{date}")
    }

    async fn get_conn(&self) -> Result<deadpool_redis::Connection, QuotaStoreError> {
        self.pool
            .get()
            .await
            .map_err(|e| QuotaStoreError::StoreError(format!("Pool error: {e}")))
    }
}

#[async_trait]
impl QuotaStore for QuotaStoreRedis {
    async fn get_count(
        &self,
        user: UserId,
        date: NaiveDate,
    ) -> Result<Option<u32>, QuotaStoreError> {
        let mut conn = self.get_conn().await?;

        let count: Option<u32> = conn
            .get(Self::day_key(user, date))
            .await
            .map_err(|e| QuotaStoreError::StoreError(e.to_string()))?;

        Ok(count)
    }

    async fn try_increment(
        &self,
        user: UserId,
        date: NaiveDate,
        max: u32,
    ) -> Result<bool, QuotaStoreError> {
        let mut conn = self.get_conn().await?;
        let key = Self::day_key(user, date);

        let reserved: u32 = conn
            .incr(&key, 1u32)
            .await
            .map_err(|e| QuotaStoreError::StoreError(e.to_string()))?;

        // Refresh on every reservation; the key only needs to survive its
        // own day plus the stragglers.
        let _: () = conn
            .expire(&key, QUOTA_KEY_TTL_SECS)
            .await
            .map_err(|e| QuotaStoreError::StoreError(e.to_string()))?;

        if reserved > max {
            // Hand the overshoot back so `get_count` stays truthful.
            let _: () = conn
                .decr(&key, 1u32)
                .await
                .map_err(|e| QuotaStoreError::StoreError(e.to_string()))?;
            return Ok(false);
        }

        Ok(true)
    }
}
