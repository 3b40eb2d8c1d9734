//! Helpers shared by the fan-out and judge use cases.

use crate::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
use std::time::Duration;

/// Issue one completion call bounded by `limit`.
///
/// Expiry is reported as [`GatewayError::Timeout`]; a blank reply as
/// [`GatewayError::EmptyResponse`].
pub(crate) async fn complete_within(
    gateway: &dyn LlmGateway,
    request: &CompletionRequest,
    limit: Duration,
) -> Result<String, GatewayError> {
    let text = match tokio::time::timeout(limit, gateway.complete(request)).await {
        Ok(result) => result?,
        Err(_) => return Err(GatewayError::Timeout),
    };

    if text.trim().is_empty() {
        return Err(GatewayError::EmptyResponse);
    }
    Ok(text)
}
