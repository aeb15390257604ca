use async_trait::async_trait;

use crate::modules::auth::application::domain::UserId;

#[derive(Debug, Clone, thiserror::Error)]
pub enum ImageStoreError {
    #[error("Access denied")]
    AccessDenied,

    #[error("Storage error: {0}")]
    Infrastructure(String),
}

/// Opaque byte pass-through to object storage. No resizing, no format
/// conversion; what goes in is what the public URL serves back.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store `bytes` under a fresh object name scoped to `owner` and
    /// return the public URL.
    ///
    /// `path_hint` only flavors the object name (e.g. "photo"); it never
    /// controls which object gets overwritten.
    async fn upload(
        &self,
        owner: UserId,
        path_hint: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ImageStoreError>;
}
