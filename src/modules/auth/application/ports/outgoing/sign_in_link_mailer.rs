use async_trait::async_trait;

/// Delivery channel for sign-in links. One method, string errors: the auth
/// adapter folds any delivery failure into `AuthProviderError::MailDelivery`.
#[async_trait]
pub trait SignInLinkMailer: Send + Sync {
    async fn send_link(&self, to: &str, link: &str) -> Result<(), String>;
}
