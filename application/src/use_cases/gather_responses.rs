//! Gather Responses use case
//!
//! Fans the question out to the three primary models concurrently and
//! collects every outcome, successful or not.

use super::shared::complete_within;
use crate::config::FusionConfig;
use crate::ports::llm_gateway::{CompletionRequest, LlmGateway};
use fusion_domain::{FailureKind, ModelResponse, ModelSlot, Question, preview};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Use case for the concurrent primary-model fan-out
pub struct GatherResponsesUseCase {
    gateway: Arc<dyn LlmGateway>,
    config: Arc<FusionConfig>,
}

impl GatherResponsesUseCase {
    pub fn new(gateway: Arc<dyn LlmGateway>, config: Arc<FusionConfig>) -> Self {
        Self { gateway, config }
    }

    /// Query all primary models in parallel.
    ///
    /// Each call is independently bounded by the configured timeout; a
    /// failure in one slot never cancels the others. Returns once all three
    /// calls have finished, in slot order regardless of arrival order.
    /// Dropping the returned future aborts the calls still in flight.
    pub async fn execute(&self, question: &Question) -> [ModelResponse; 3] {
        info!(
            question = %preview(question.text(), 200),
            "Fan-out to {} primary models",
            ModelSlot::ALL.len()
        );

        let mut join_set = JoinSet::new();

        for slot in ModelSlot::ALL {
            let gateway = Arc::clone(&self.gateway);
            let limit = self.config.call_timeout;
            let request = CompletionRequest::new(
                self.config.model_for(slot),
                question.text(),
                self.config.sampling.clone(),
            )
            .with_system_message(question.system_message_opt());

            join_set.spawn(async move {
                let started = Instant::now();
                let result = complete_within(gateway.as_ref(), &request, limit).await;
                (slot, request.model_id, result, started.elapsed())
            });
        }

        let mut collected: [Option<ModelResponse>; 3] = [None, None, None];

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((slot, model_id, Ok(text), elapsed)) => {
                    info!(
                        slot = %slot,
                        model = %model_id,
                        elapsed_ms = elapsed.as_millis() as u64,
                        chars = text.chars().count(),
                        "Model responded"
                    );
                    collected[slot.index()] = Some(ModelResponse::success(slot, model_id, text));
                }
                Ok((slot, model_id, Err(e), elapsed)) => {
                    warn!(
                        slot = %slot,
                        model = %model_id,
                        elapsed_ms = elapsed.as_millis() as u64,
                        kind = %e.kind(),
                        "Model failed: {}",
                        e
                    );
                    collected[slot.index()] =
                        Some(ModelResponse::failure(slot, model_id, e.kind(), e.to_string()));
                }
                Err(e) => {
                    warn!("Task join error: {}", e);
                }
            }
        }

        // A slot is still empty only if its task panicked or was aborted
        ModelSlot::ALL.map(|slot| {
            collected[slot.index()].take().unwrap_or_else(|| {
                ModelResponse::failure(
                    slot,
                    self.config.model_for(slot),
                    FailureKind::UpstreamError,
                    "call did not complete",
                )
            })
        })
    }
}
