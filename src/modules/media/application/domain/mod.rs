mod upload_policy;

pub use upload_policy::{
    extension_for, validate_photo_upload, UploadPolicyError, MAX_PHOTO_BYTES,
};
