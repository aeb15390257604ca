mod sanitize;
mod username;

pub use sanitize::{sanitize, sanitize_snapshot, SanitizeError};
pub use username::{is_normalized_username, normalize_username, MAX_USERNAME_LEN};
