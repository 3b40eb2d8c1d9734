//! Shared-secret authentication for the JSON API.

use super::error::ApiError;
use axum::http::HeaderMap;

/// Header carrying the caller's API key
pub const API_KEY_HEADER: &str = "code-x-key";

/// Check the `code-x-key` header against the configured key.
///
/// Runs before any upstream work so rejected callers cost nothing.
pub fn verify_api_key(expected: Option<&str>, headers: &HeaderMap) -> Result<(), ApiError> {
    let Some(expected) = expected else {
        return Err(ApiError::ApiKeyNotConfigured);
    };

    let provided = headers
        .get(API_KEY_HEADER)
        .map(|v| v.as_bytes())
        .ok_or(ApiError::Unauthorized)?;

    if constant_time_compare(expected.as_bytes(), provided) {
        Ok(())
    } else {
        Err(ApiError::Unauthorized)
    }
}

/// Compare two byte slices in time independent of where they differ.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result: u8 = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }

    result == 0
}
