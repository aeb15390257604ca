mod portfolio_repository_postgres;
mod quota_store_redis;
pub mod sea_orm_entity;

pub use portfolio_repository_postgres::PortfolioRepositoryPostgres;
pub use quota_store_redis::QuotaStoreRedis;
