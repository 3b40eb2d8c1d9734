//! LLM Gateway port
//!
//! Defines the interface for communicating with the upstream inference API.

use crate::config::SamplingParams;
use async_trait::async_trait;
use fusion_domain::FailureKind;
use thiserror::Error;

/// Errors that can occur during a completion call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("Upstream rejected credentials: {0}")]
    AuthError(String),

    #[error("Timeout")]
    Timeout,

    #[error("Upstream error: {0}")]
    UpstreamError(String),

    #[error("Empty response")]
    EmptyResponse,
}

impl GatewayError {
    /// The domain failure category for this error
    pub fn kind(&self) -> FailureKind {
        match self {
            GatewayError::AuthError(_) => FailureKind::AuthError,
            GatewayError::Timeout => FailureKind::Timeout,
            GatewayError::UpstreamError(_) => FailureKind::UpstreamError,
            GatewayError::EmptyResponse => FailureKind::EmptyResponse,
        }
    }
}

/// A single chat-completion request
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Upstream model identifier
    pub model_id: String,
    /// System message; omitted upstream when `None`
    pub system_message: Option<String>,
    /// The user message
    pub user_message: String,
    /// Sampling parameters
    pub sampling: SamplingParams,
}

impl CompletionRequest {
    pub fn new(
        model_id: impl Into<String>,
        user_message: impl Into<String>,
        sampling: SamplingParams,
    ) -> Self {
        Self {
            model_id: model_id.into(),
            system_message: None,
            user_message: user_message.into(),
            sampling,
        }
    }

    pub fn with_system_message(mut self, system_message: Option<impl Into<String>>) -> Self {
        self.system_message = system_message.map(Into::into);
        self
    }
}

/// Gateway for LLM communication
///
/// This port defines how the application layer communicates with the
/// inference API. Implementations (adapters) live in the infrastructure
/// layer. A call is a single attempt; implementations must not retry.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send one completion request and return the generated text
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError>;
}
