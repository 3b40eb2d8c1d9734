//! Synthesize Verdict use case
//!
//! Sends every primary outcome to the judge model and parses its reply.

use super::shared::complete_within;
use crate::config::FusionConfig;
use crate::ports::llm_gateway::{CompletionRequest, LlmGateway};
use fusion_domain::{
    FailureKind, JudgeVerdict, ModelResponse, PromptTemplate, Question, parse_judge_response,
    preview,
};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};

/// The judge call itself failed
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Judge model {model_id} failed ({kind}): {message}")]
pub struct JudgeFailure {
    pub model_id: String,
    pub kind: FailureKind,
    pub message: String,
}

impl JudgeFailure {
    /// The apology verdict reported in place of a synthesized answer
    pub fn fallback_verdict(&self) -> JudgeVerdict {
        JudgeVerdict::judge_unavailable(self.kind)
    }
}

/// Use case for the judge synthesis stage
pub struct SynthesizeVerdictUseCase {
    gateway: Arc<dyn LlmGateway>,
    config: Arc<FusionConfig>,
}

impl SynthesizeVerdictUseCase {
    pub fn new(gateway: Arc<dyn LlmGateway>, config: Arc<FusionConfig>) -> Self {
        Self { gateway, config }
    }

    /// Ask the judge to synthesize the primary outcomes.
    ///
    /// Runs even when some (or all) primary calls failed; failed slots are
    /// rendered as explicit markers in the prompt. Output that does not
    /// follow the expected format degrades to an unstructured verdict.
    pub async fn execute(
        &self,
        question: &Question,
        responses: &[ModelResponse],
    ) -> Result<JudgeVerdict, JudgeFailure> {
        let failed = responses.iter().filter(|r| !r.is_success()).count();
        info!(
            judge = %self.config.judge_model,
            failed_slots = failed,
            "Judge synthesis start"
        );

        let prompt = PromptTemplate::judge_prompt(question.text(), responses);
        let request = CompletionRequest::new(
            self.config.judge_model.as_str(),
            prompt,
            self.config.sampling.clone(),
        )
        .with_system_message(Some(PromptTemplate::judge_system()));

        let started = Instant::now();
        let raw = complete_within(self.gateway.as_ref(), &request, self.config.call_timeout)
            .await
            .map_err(|e| {
                warn!(
                    judge = %self.config.judge_model,
                    kind = %e.kind(),
                    "Judge call failed: {}",
                    e
                );
                JudgeFailure {
                    model_id: self.config.judge_model.clone(),
                    kind: e.kind(),
                    message: e.to_string(),
                }
            })?;

        debug!(raw = %preview(&raw, 500), "Raw judge response");

        let verdict = parse_judge_response(&raw);
        if !verdict.structured {
            warn!("Judge response had no recognizable sections, using raw text");
        }

        info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            final_answer_chars = verdict.final_answer.chars().count(),
            reasoning_chars = verdict.reasoning.chars().count(),
            "Judge synthesis complete"
        );

        Ok(verdict)
    }
}
