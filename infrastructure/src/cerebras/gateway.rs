//! Cerebras LLM Gateway implementation

use super::error::{CerebrasError, status_error, transport_error};
use super::protocol::{ChatCompletionRequest, ChatCompletionResponse, SseAccumulator};
use crate::config::FileUpstreamConfig;
use async_trait::async_trait;
use fusion_application::{CompletionRequest, GatewayError, LlmGateway};
use fusion_domain::preview;
use futures::StreamExt;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// LLM Gateway implementation for the Cerebras chat completions API
pub struct CerebrasGateway {
    http: Client,
    endpoint: String,
    api_key: String,
}

impl CerebrasGateway {
    /// Create a gateway for `{base_url}/chat/completions`.
    ///
    /// `timeout` bounds each HTTP exchange end to end.
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, CerebrasError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(CerebrasError::MissingApiKey);
        }

        let http = Client::builder().timeout(timeout).build()?;
        let endpoint = format!("{}/chat/completions", base_url.trim_end_matches('/'));

        info!(endpoint = %endpoint, "CerebrasGateway initialized");

        Ok(Self {
            http,
            endpoint,
            api_key,
        })
    }

    /// Create a gateway from the `[upstream]` config section
    pub fn from_config(config: &FileUpstreamConfig) -> Result<Self, CerebrasError> {
        let api_key = config.api_key().ok_or(CerebrasError::MissingApiKey)?;
        Self::new(
            &config.base_url,
            api_key,
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn read_batch(response: reqwest::Response) -> Result<String, GatewayError> {
        let body: ChatCompletionResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                GatewayError::Timeout
            } else {
                GatewayError::UpstreamError(format!("malformed response body: {}", e))
            }
        })?;
        Ok(body.into_text().unwrap_or_default())
    }

    async fn read_stream(response: reqwest::Response) -> Result<String, GatewayError> {
        let mut stream = response.bytes_stream();
        let mut accumulator = SseAccumulator::new();

        while let Some(chunk) = stream.next().await {
            let bytes = chunk.map_err(transport_error)?;
            accumulator
                .push(&bytes)
                .map_err(GatewayError::UpstreamError)?;
            if accumulator.is_done() {
                break;
            }
        }

        accumulator.finish().map_err(GatewayError::UpstreamError)
    }
}

#[async_trait]
impl LlmGateway for CerebrasGateway {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
        let body = ChatCompletionRequest::from(request);
        let started = Instant::now();

        info!(
            model = %request.model_id,
            stream = body.stream,
            input = %preview(&request.user_message, 200),
            "Upstream request"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            debug!(model = %request.model_id, %status, "Upstream error body: {}", preview(&text, 300));
            return Err(status_error(status, &text));
        }

        let text = if body.stream {
            Self::read_stream(response).await?
        } else {
            Self::read_batch(response).await?
        };

        if text.trim().is_empty() {
            return Err(GatewayError::EmptyResponse);
        }

        info!(
            model = %request.model_id,
            elapsed_ms = started.elapsed().as_millis() as u64,
            chars = text.chars().count(),
            "Upstream response"
        );
        debug!(model = %request.model_id, output = %preview(&text, 300), "Upstream output");

        Ok(text)
    }
}
