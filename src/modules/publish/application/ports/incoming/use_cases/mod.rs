mod publish_portfolio;
mod remaining_deploys;

pub use publish_portfolio::{
    PublishCommand, PublishCommandError, PublishError, PublishPortfolioUseCase, PublishReceipt,
};
pub use remaining_deploys::RemainingDeploysUseCase;
