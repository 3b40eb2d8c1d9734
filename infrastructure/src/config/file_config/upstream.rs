//! Upstream inference API configuration from TOML (`[upstream]` section)

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://api.cerebras.ai/v1";

/// Upstream endpoint and credentials
///
/// # Example
///
/// ```toml
/// [upstream]
/// base_url = "https://api.cerebras.ai/v1"
/// api_key = "csk-..."
/// timeout_secs = 60
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileUpstreamConfig {
    /// OpenAI-compatible base URL, without the `/chat/completions` suffix
    pub base_url: String,
    /// Bearer credential (`CEREBRAS_API_KEY`)
    pub api_key: Option<String>,
    /// Bound on each individual upstream call
    pub timeout_secs: u64,
}

impl Default for FileUpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout_secs: 60,
        }
    }
}

// Keeps the credential out of `--show-config` output and debug logs
impl std::fmt::Debug for FileUpstreamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileUpstreamConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl FileUpstreamConfig {
    /// The API key, if set and non-blank
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}
