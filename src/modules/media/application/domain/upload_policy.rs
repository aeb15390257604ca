/// Photo uploads are stored verbatim, so the only gate is "is this an
/// image we are willing to serve back".
pub const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;

const ALLOWED_CONTENT_TYPES: [(&str, &str); 4] = [
    ("image/png", "png"),
    ("image/jpeg", "jpg"),
    ("image/webp", "webp"),
    ("image/gif", "gif"),
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadPolicyError {
    #[error("Unsupported content type '{0}'")]
    UnsupportedContentType(String),

    #[error("Photo exceeds the {MAX_PHOTO_BYTES} byte limit")]
    TooLarge,

    #[error("Empty upload body")]
    Empty,
}

pub fn validate_photo_upload(content_type: &str, len: usize) -> Result<(), UploadPolicyError> {
    if len == 0 {
        return Err(UploadPolicyError::Empty);
    }
    if len > MAX_PHOTO_BYTES {
        return Err(UploadPolicyError::TooLarge);
    }
    if extension_for(content_type).is_none() {
        return Err(UploadPolicyError::UnsupportedContentType(
            content_type.to_string(),
        ));
    }
    Ok(())
}

/// File extension for an accepted content type, `None` otherwise.
pub fn extension_for(content_type: &str) -> Option<&'static str> {
    let normalized = content_type.trim().to_ascii_lowercase();
    ALLOWED_CONTENT_TYPES
        .iter()
        .find(|(mime, _)| *mime == normalized)
        .map(|(_, ext)| *ext)
}
