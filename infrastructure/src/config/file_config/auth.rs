//! Caller authentication from TOML (`[auth]` section)

use serde::{Deserialize, Serialize};

/// Shared secrets for the JSON API and the web form
///
/// # Example
///
/// ```toml
/// [auth]
/// code_x_key = "change-me"
/// csrf_secret = "another-secret"
/// csrf_max_age_secs = 3600
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAuthConfig {
    /// Value expected in the `code-x-key` header on `POST /ask`
    pub code_x_key: Option<String>,
    /// HMAC key for web form CSRF tokens; random per process when unset
    pub csrf_secret: Option<String>,
    /// Lifetime of a CSRF token
    pub csrf_max_age_secs: u64,
}

impl Default for FileAuthConfig {
    fn default() -> Self {
        Self {
            code_x_key: None,
            csrf_secret: None,
            csrf_max_age_secs: 3600,
        }
    }
}

impl std::fmt::Debug for FileAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileAuthConfig")
            .field("code_x_key", &self.code_x_key.as_ref().map(|_| "<redacted>"))
            .field("csrf_secret", &self.csrf_secret.as_ref().map(|_| "<redacted>"))
            .field("csrf_max_age_secs", &self.csrf_max_age_secs)
            .finish()
    }
}

impl FileAuthConfig {
    /// The API key, if set and non-blank
    pub fn code_x_key(&self) -> Option<&str> {
        non_blank(self.code_x_key.as_deref())
    }

    /// The CSRF secret, if set and non-blank
    pub fn csrf_secret(&self) -> Option<&str> {
        non_blank(self.csrf_secret.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
