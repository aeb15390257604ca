use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // =====================================================
        // Create published_portfolios table
        // =====================================================
        //
        // The normalized username is the primary key: one row per claimed
        // name, and the single-owner rule rides on the unique constraint.
        manager
            .create_table(
                Table::create()
                    .table(PublishedPortfolios::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PublishedPortfolios::Username)
                            .string_len(63)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PublishedPortfolios::UserId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PublishedPortfolios::Data)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PublishedPortfolios::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // =====================================================
        // Indexes
        // =====================================================

        // Fast "which names does this user hold" lookups
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX IF NOT EXISTS idx_published_portfolios_user_id
                ON published_portfolios (user_id);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PublishedPortfolios::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum PublishedPortfolios {
    Table,
    Username,
    UserId,
    Data,
    UpdatedAt,
}
