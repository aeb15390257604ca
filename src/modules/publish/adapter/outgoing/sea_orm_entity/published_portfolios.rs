use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One row per claimed username. The username is the primary key, so the
/// single-owner rule is enforced by the table itself.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "published_portfolios")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text", string_len = 63)]
    pub username: String,

    #[sea_orm(column_name = "user_id", column_type = "Uuid")]
    pub user_id: Uuid,

    // Sanitized editor snapshot, stored as JSONB
    #[sea_orm(column_type = "JsonBinary")]
    pub data: Json,

    #[sea_orm(column_type = "TimestampWithTimeZone")]
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
