mod auth_provider;
mod sign_in_link_mailer;

pub use auth_provider::{AuthProvider, AuthProviderError};
pub use sign_in_link_mailer::SignInLinkMailer;
