use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ConnectionTrait, DatabaseBackend, DatabaseConnection, DbErr, EntityTrait, Statement,
};
use uuid::Uuid;

use crate::modules::auth::application::domain::UserId;
use crate::modules::publish::adapter::outgoing::sea_orm_entity::published_portfolios::{
    self, Entity,
};
use crate::modules::publish::application::ports::outgoing::{
    PortfolioRepository, PortfolioRepositoryError, PublishedPortfolio, UpsertPortfolio,
};

// ============================================================================
// Repository Implementation
// ============================================================================

/// Postgres-backed portfolio store.
///
/// The ownership gate lives in a single conditional upsert statement, so
/// "claim if free or already mine, otherwise refuse" happens in one round
/// trip with no read-then-write window. `updated_at` comes from the
/// database clock.
#[derive(Clone)]
pub struct PortfolioRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl PortfolioRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

const UPSERT_SQL: &str = r#"
INSERT INTO published_portfolios (username, user_id, data, updated_at)
VALUES ($1, $2, $3, NOW())
ON CONFLICT (username) DO UPDATE
    SET data = EXCLUDED.data, updated_at = NOW()
    WHERE published_portfolios.user_id = EXCLUDED.user_id
RETURNING username, user_id, data, updated_at
"#;

#[async_trait]
impl PortfolioRepository for PortfolioRepositoryPostgres {
    async fn get_by_username(
        &self,
        normalized_username: &str,
    ) -> Result<Option<PublishedPortfolio>, PortfolioRepositoryError> {
        let found = Entity::find_by_id(normalized_username.to_string())
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(found.map(model_to_record))
    }

    async fn upsert(
        &self,
        payload: UpsertPortfolio,
    ) -> Result<PublishedPortfolio, PortfolioRepositoryError> {
        let owner: Uuid = payload.user_id.into();

        let statement = Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            UPSERT_SQL,
            [payload.username.into(), owner.into(), payload.data.into()],
        );

        let row = self
            .db
            .query_one(statement)
            .await
            .map_err(map_db_err)?
            // The conditional update matched nothing: the name is held by
            // a different owner.
            .ok_or(PortfolioRepositoryError::OwnedByAnotherUser)?;

        let username: String = row.try_get("", "username").map_err(map_db_err)?;
        let user_id: Uuid = row.try_get("", "user_id").map_err(map_db_err)?;
        let data: serde_json::Value = row.try_get("", "data").map_err(map_db_err)?;
        let updated_at: chrono::DateTime<chrono::FixedOffset> =
            row.try_get("", "updated_at").map_err(map_db_err)?;

        Ok(PublishedPortfolio {
            username,
            user_id: UserId::from(user_id),
            data,
            updated_at: updated_at.with_timezone(&Utc),
        })
    }
}

fn map_db_err(err: DbErr) -> PortfolioRepositoryError {
    PortfolioRepositoryError::DatabaseError(err.to_string())
}

fn model_to_record(model: published_portfolios::Model) -> PublishedPortfolio {
    PublishedPortfolio {
        username: model.username,
        user_id: UserId::from(model.user_id),
        data: model.data,
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
