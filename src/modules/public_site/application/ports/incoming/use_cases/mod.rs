mod resolve_public_portfolio;

pub use resolve_public_portfolio::{
    PublicPortfolioView, ResolveError, ResolvePublicPortfolioUseCase,
};
