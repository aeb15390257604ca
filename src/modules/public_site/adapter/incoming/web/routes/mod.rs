mod get_public_portfolio;

pub use get_public_portfolio::get_public_portfolio_handler;
