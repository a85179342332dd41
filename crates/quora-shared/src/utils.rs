//! Utility functions

use crate::constants::BEARER_SCHEME;

/// Shortens an access token for log output, keeping only the first characters.
pub fn mask_token(token: &str) -> String {
    let visible: String = token.chars().take(4).collect();
    if visible.is_empty() {
        "<empty>".to_string()
    } else {
        format!("{}***", visible)
    }
}

/// Accepts both a raw token and the `Bearer <token>` form. The scheme name
/// is matched case-insensitively.
pub fn strip_bearer(header_value: &str) -> &str {
    let value = header_value.trim();
    match value.split_once(' ') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case(BEARER_SCHEME) => rest.trim(),
        _ => value,
    }
}
