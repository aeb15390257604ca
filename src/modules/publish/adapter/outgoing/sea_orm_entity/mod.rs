pub mod published_portfolios;
