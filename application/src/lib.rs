//! Application layer for model-fusion
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{FusionConfig, JudgeFailurePolicy, SamplingParams};
pub use ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
pub use use_cases::gather_responses::GatherResponsesUseCase;
pub use use_cases::run_fusion::{RunFusionError, RunFusionInput, RunFusionUseCase};
pub use use_cases::synthesize_verdict::{JudgeFailure, SynthesizeVerdictUseCase};
