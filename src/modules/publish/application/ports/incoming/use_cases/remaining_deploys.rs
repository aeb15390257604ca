use async_trait::async_trait;

use crate::modules::auth::application::domain::UserId;

/// How many deployments the user has left today. Infallible by design:
/// a broken quota store reads as zero remaining (fail-closed), never as
/// an error the UI would have to interpret.
#[async_trait]
pub trait RemainingDeploysUseCase: Send + Sync {
    async fn execute(&self, user: UserId) -> u32;
}
