mod portfolio_repository;
mod quota_store;

pub use portfolio_repository::{
    PortfolioRepository, PortfolioRepositoryError, PublishedPortfolio, UpsertPortfolio,
};
pub use quota_store::{QuotaStore, QuotaStoreError};
