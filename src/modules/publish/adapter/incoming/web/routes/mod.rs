mod publish_portfolio;
mod remaining_deploys;

pub use publish_portfolio::publish_portfolio_handler;
pub use remaining_deploys::remaining_deploys_handler;
