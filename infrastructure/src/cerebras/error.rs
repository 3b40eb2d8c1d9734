//! Error types for the Cerebras adapter

use fusion_application::GatewayError;
use fusion_domain::preview;
use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur while constructing the adapter
#[derive(Error, Debug)]
pub enum CerebrasError {
    #[error("Upstream API key is not configured")]
    MissingApiKey,

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),
}

/// Map a non-2xx status to a gateway error
pub(crate) fn status_error(status: StatusCode, body: &str) -> GatewayError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            GatewayError::AuthError(format!("HTTP {}", status.as_u16()))
        }
        _ => GatewayError::UpstreamError(format!(
            "HTTP {}: {}",
            status.as_u16(),
            preview(body.trim(), 200)
        )),
    }
}

/// Map a transport failure to a gateway error
pub(crate) fn transport_error(error: reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout
    } else {
        GatewayError::UpstreamError(error.without_url().to_string())
    }
}
