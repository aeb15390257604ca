use std::sync::OnceLock;

use regex::Regex;

//
// ──────────────────────────────────────────────────────────
// Username normalization
// ──────────────────────────────────────────────────────────
//
// The normalized form is the storage key, the uniqueness-check key, and
// the public URL segment. Normalizing in exactly one place keeps all
// three in agreement.
//

/// Upper bound on a normalized username; matches a DNS label so the name
/// can double as a subdomain.
pub const MAX_USERNAME_LEN: usize = 63;

static NORMALIZED_SHAPE: OnceLock<Regex> = OnceLock::new();

fn normalized_shape() -> &'static Regex {
    NORMALIZED_SHAPE.get_or_init(|| Regex::new(r"^[a-z0-9-]{1,63}$").expect("static pattern"))
}

/// Lowercase, trim, and strip every character outside `[a-z0-9-]`.
pub fn normalize_username(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect()
}

/// True when `candidate` is already in normalized shape and within bounds.
pub fn is_normalized_username(candidate: &str) -> bool {
    normalized_shape().is_match(candidate)
}
