//! Run Fusion use case
//!
//! Orchestrates the full request flow: validate, fan out, judge, assemble.

use super::gather_responses::GatherResponsesUseCase;
use super::synthesize_verdict::{JudgeFailure, SynthesizeVerdictUseCase};
use crate::config::{FusionConfig, JudgeFailurePolicy};
use crate::ports::llm_gateway::LlmGateway;
use fusion_domain::{DomainError, FusionResult, Question};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur during a fusion request
#[derive(Error, Debug)]
pub enum RunFusionError {
    #[error("{0}")]
    InvalidQuestion(#[from] DomainError),

    #[error("{0}")]
    JudgeFailed(#[from] JudgeFailure),
}

/// Input for the RunFusion use case
#[derive(Debug, Clone, Default)]
pub struct RunFusionInput {
    /// The question text, validated on execution
    pub question: String,
    /// Optional system message forwarded to the primary models
    pub system_message: Option<String>,
}

impl RunFusionInput {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            system_message: None,
        }
    }

    pub fn with_system_message(mut self, system_message: Option<impl Into<String>>) -> Self {
        self.system_message = system_message.map(Into::into);
        self
    }
}

/// Use case for answering one question through the fusion pipeline
pub struct RunFusionUseCase {
    gather: GatherResponsesUseCase,
    synthesize: SynthesizeVerdictUseCase,
    config: Arc<FusionConfig>,
}

impl RunFusionUseCase {
    pub fn new(gateway: Arc<dyn LlmGateway>, config: Arc<FusionConfig>) -> Self {
        Self {
            gather: GatherResponsesUseCase::new(Arc::clone(&gateway), Arc::clone(&config)),
            synthesize: SynthesizeVerdictUseCase::new(gateway, Arc::clone(&config)),
            config,
        }
    }

    /// Execute the use case.
    ///
    /// A blank question is rejected before any upstream call. Primary
    /// failures never fail the request; a judge failure is handled per
    /// the configured [`JudgeFailurePolicy`].
    pub async fn execute(&self, input: RunFusionInput) -> Result<FusionResult, RunFusionError> {
        let mut question = Question::try_new(input.question)?;
        if let Some(system_message) = input.system_message {
            question = question.with_system_message(system_message);
        }

        let started = Instant::now();
        let responses = self.gather.execute(&question).await;

        let verdict = match self.synthesize.execute(&question, &responses).await {
            Ok(verdict) => verdict,
            Err(failure) => match self.config.judge_failure_policy {
                JudgeFailurePolicy::BadGateway => return Err(failure.into()),
                JudgeFailurePolicy::Degrade => {
                    warn!(kind = %failure.kind, "Judge failed, returning fallback verdict");
                    failure.fallback_verdict()
                }
            },
        };

        let succeeded = responses.iter().filter(|r| r.is_success()).count();
        info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            succeeded,
            structured = verdict.structured,
            "Fusion request complete"
        );

        Ok(FusionResult::new(
            question.into_text(),
            &responses,
            verdict,
            self.config.show_model_output,
        ))
    }
}
