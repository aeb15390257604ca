use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::modules::auth::application::domain::UserId;
use crate::modules::media::application::domain::extension_for;
use crate::modules::media::application::ports::outgoing::{ImageStore, ImageStoreError};

/// Bucket for user-uploaded portfolio images. Objects are public-read;
/// the returned URL is servable as-is.
const PHOTO_BUCKET: &str = "folio-user-photos";

/// google-cloud-storage addresses buckets as `projects/_/buckets/{bucket}`.
/// Keeping this here makes it hard to accidentally pass a raw bucket name.
fn bucket_resource(bucket: &str) -> String {
    format!("projects/_/buckets/{bucket}")
}

fn public_url(bucket: &str, object_name: &str) -> String {
    format!("https://storage.googleapis.com/{bucket}/{object_name}")
}

fn map_upload_error(msg: &str) -> ImageStoreError {
    let m = msg.to_lowercase();

    if m.contains("permission") || m.contains("forbidden") || m.contains("denied") {
        ImageStoreError::AccessDenied
    } else {
        ImageStoreError::Infrastructure(msg.to_string())
    }
}

/// Internal seam so the adapter is testable without mocking
/// google-cloud-storage types. Tests implement this with a fake client.
#[async_trait]
trait GcsClient: Send + Sync {
    async fn upload_object(
        &self,
        bucket_resource: &str,
        object_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), String>;
}

#[cfg(test)]
struct ArcGcsClient(Arc<dyn GcsClient>);

#[cfg(test)]
#[async_trait]
impl GcsClient for ArcGcsClient {
    async fn upload_object(
        &self,
        bucket_resource: &str,
        object_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), String> {
        self.0
            .upload_object(bucket_resource, object_name, content_type, bytes)
            .await
    }
}

#[derive(Clone)]
pub struct GcsImageStore {
    client: Arc<OnceCell<Box<dyn GcsClient>>>,
    bucket: String,
}

impl GcsImageStore {
    /// Synchronous constructor; the client is initialized lazily on first use.
    pub fn new() -> Self {
        Self {
            client: Arc::new(OnceCell::new()),
            bucket: PHOTO_BUCKET.to_string(),
        }
    }

    async fn get_client(&self) -> Result<&dyn GcsClient, Box<dyn std::error::Error + Send + Sync>> {
        self.client
            .get_or_try_init(|| async {
                let real_client = RealGcsClient::new().await?;
                Ok(Box::new(real_client) as Box<dyn GcsClient>)
            })
            .await
            .map(|boxed| &**boxed)
    }

    /// Fresh name per upload, owner-scoped. Re-uploading never clobbers
    /// an object some published portfolio may still reference.
    fn object_name(owner: UserId, path_hint: &str, content_type: &str) -> String {
        let hint: String = path_hint
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
            .take(32)
            .collect();
        let hint = if hint.is_empty() { "image" } else { &hint };
        let ext = extension_for(content_type).unwrap_or("bin");

        format!("{owner}/{hint}-{}.{ext}", Uuid::new_v4())
    }

    #[cfg(test)]
    fn with_client(client: Arc<dyn GcsClient>) -> Self {
        let once = OnceCell::new();
        let _ = once.set(Box::new(ArcGcsClient(client)) as Box<dyn GcsClient>);

        Self {
            client: Arc::new(once),
            bucket: PHOTO_BUCKET.to_string(),
        }
    }
}

impl Default for GcsImageStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageStore for GcsImageStore {
    async fn upload(
        &self,
        owner: UserId,
        path_hint: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ImageStoreError> {
        let client = self
            .get_client()
            .await
            .map_err(|e| ImageStoreError::Infrastructure(e.to_string()))?;

        let object_name = Self::object_name(owner, path_hint, content_type);

        client
            .upload_object(
                &bucket_resource(&self.bucket),
                &object_name,
                content_type,
                bytes,
            )
            .await
            .map_err(|e| map_upload_error(&e))?;

        Ok(public_url(&self.bucket, &object_name))
    }
}

// ============================================================================
// Real Google Cloud Storage client (google-cloud-storage)
// ============================================================================

struct RealGcsClient {
    storage: google_cloud_storage::client::Storage,
}

impl RealGcsClient {
    async fn new() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        tracing::info!("Initializing GCS client...");

        let storage = google_cloud_storage::client::Storage::builder()
            .build()
            .await
            .map_err(|e| {
                tracing::error!("Failed to build GCS storage client: {:?}", e);
                e
            })?;

        tracing::info!("GCS storage client created");

        Ok(Self { storage })
    }
}

#[async_trait]
impl GcsClient for RealGcsClient {
    async fn upload_object(
        &self,
        bucket_resource: &str,
        object_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), String> {
        self.storage
            .write_object(
                bucket_resource.to_string(),
                object_name.to_string(),
                bytes::Bytes::from(bytes),
            )
            .set_content_type(content_type.to_string())
            .send_buffered()
            .await
            .map_err(|e| e.to_string())?;

        Ok(())
    }
}
