//! Fusion configuration: the immutable settings every use case reads.
//!
//! [`FusionConfig`] is built once at startup and shared behind an `Arc`.
//! Nothing on the request path mutates it.

use super::sampling_params::SamplingParams;
use fusion_domain::ModelSlot;
use std::time::Duration;

/// What to do when the judge call itself fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JudgeFailurePolicy {
    /// Fail the request with a server error (HTTP 502).
    #[default]
    BadGateway,
    /// Return a success response carrying a fixed apology verdict.
    Degrade,
}

impl JudgeFailurePolicy {
    pub const VALID_VALUES: [&'static str; 2] = ["bad_gateway", "degrade"];

    pub fn as_str(&self) -> &'static str {
        match self {
            JudgeFailurePolicy::BadGateway => "bad_gateway",
            JudgeFailurePolicy::Degrade => "degrade",
        }
    }
}

impl std::str::FromStr for JudgeFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "bad_gateway" | "error" => Ok(JudgeFailurePolicy::BadGateway),
            "degrade" | "soft" => Ok(JudgeFailurePolicy::Degrade),
            other => Err(format!("unknown judge failure policy: {}", other)),
        }
    }
}

impl std::fmt::Display for JudgeFailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Model selection and request behavior for the fusion pipeline.
///
/// # Example
///
/// ```
/// use fusion_application::config::FusionConfig;
/// use fusion_domain::ModelSlot;
///
/// let config = FusionConfig::new(["llama-4", "qwen-3", "gpt-oss"], "judge-model")
///     .with_show_model_output(true);
///
/// assert_eq!(config.model_for(ModelSlot::Primary2), "qwen-3");
/// assert!(config.show_model_output);
/// ```
#[derive(Debug, Clone)]
pub struct FusionConfig {
    /// Model identifiers for the three primary slots, in slot order.
    pub primary_models: [String; 3],
    /// Model identifier for the judge.
    pub judge_model: String,
    /// Sampling parameters for every upstream call.
    pub sampling: SamplingParams,
    /// Bound on each individual upstream call.
    pub call_timeout: Duration,
    /// Expose per-model outputs in the response.
    pub show_model_output: bool,
    /// Behavior when the judge call fails.
    pub judge_failure_policy: JudgeFailurePolicy,
}

impl FusionConfig {
    pub fn new(primary_models: [impl Into<String>; 3], judge_model: impl Into<String>) -> Self {
        Self {
            primary_models: primary_models.map(Into::into),
            judge_model: judge_model.into(),
            sampling: SamplingParams::default(),
            call_timeout: Duration::from_secs(60),
            show_model_output: false,
            judge_failure_policy: JudgeFailurePolicy::default(),
        }
    }

    /// Model identifier bound to a slot
    pub fn model_for(&self, slot: ModelSlot) -> &str {
        &self.primary_models[slot.index()]
    }

    // ==================== Builder Methods ====================

    pub fn with_sampling(mut self, sampling: SamplingParams) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub fn with_show_model_output(mut self, show: bool) -> Self {
        self.show_model_output = show;
        self
    }

    pub fn with_judge_failure_policy(mut self, policy: JudgeFailurePolicy) -> Self {
        self.judge_failure_policy = policy;
        self
    }
}
