//! HTTP error mapping.
//!
//! Every failure leaves the server as `{"error": "<message>"}`. Messages are
//! generic; upstream details go to the log only.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use fusion_application::RunFusionError;
use serde_json::json;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid API key")]
    Unauthorized,

    #[error("API key not configured")]
    ApiKeyNotConfigured,

    #[error("Invalid or expired CSRF token")]
    InvalidCsrfToken,

    #[error("{0}")]
    Validation(String),

    #[error("The answer could not be synthesized right now. Please try again later.")]
    JudgeUnavailable,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::ApiKeyNotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InvalidCsrfToken => StatusCode::FORBIDDEN,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::JudgeUnavailable => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<RunFusionError> for ApiError {
    fn from(error: RunFusionError) -> Self {
        match error {
            RunFusionError::InvalidQuestion(e) => ApiError::Validation(e.to_string()),
            RunFusionError::JudgeFailed(failure) => {
                warn!(
                    judge = %failure.model_id,
                    kind = %failure.kind,
                    "Judge failed, answering 502: {}",
                    failure.message
                );
                ApiError::JudgeUnavailable
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
