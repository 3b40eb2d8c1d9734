//! Fusion value objects - immutable result types for a single request.
//!
//! These types represent the outputs of each stage:
//! - [`ModelResponse`] - One primary model's outcome from the fan-out stage
//! - [`JudgeVerdict`] - The judge model's synthesized answer and reasoning
//! - [`FusionResult`] - Complete result returned to the caller

use crate::core::model::ModelSlot;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

/// Reasoning used when the judge output had no recognizable structure
pub const UNSTRUCTURED_REASONING: &str =
    "Unstructured response: the judge did not follow the expected format.";

/// Reasoning used when the judge gave a final answer but no reasoning section
pub const MISSING_REASONING: &str = "No reasoning provided.";

/// Final answer returned when the judge call itself failed
pub const JUDGE_APOLOGY: &str =
    "Sorry, the answer could not be synthesized right now. Please try again later.";

/// Category of an upstream call failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Upstream rejected the credentials
    AuthError,
    /// No response within the configured bound
    Timeout,
    /// Non-2xx status, transport failure or malformed body
    UpstreamError,
    /// 2xx status but no usable text
    EmptyResponse,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::AuthError => "auth_error",
            FailureKind::Timeout => "timeout",
            FailureKind::UpstreamError => "upstream_error",
            FailureKind::EmptyResponse => "empty_response",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of a single upstream call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success(String),
    Failure { kind: FailureKind, message: String },
}

impl Outcome {
    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        Outcome::Failure {
            kind,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// The failure kind, if this outcome is a failure
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure { kind, .. } => Some(*kind),
        }
    }

    /// Caller-facing text: the model output, or a marker naming the failure kind.
    ///
    /// The failure message is omitted; it may carry upstream details that
    /// belong in logs only.
    pub fn display_text(&self) -> String {
        match self {
            Outcome::Success(text) => text.clone(),
            Outcome::Failure { kind, .. } => failure_marker(*kind),
        }
    }
}

/// Placeholder rendered in place of a failed model's text
pub fn failure_marker(kind: FailureKind) -> String {
    format!("[NO RESPONSE: {}]", kind)
}

impl Serialize for Outcome {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.display_text())
    }
}

/// Response from a single primary model in the fan-out stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelResponse {
    /// The slot this model occupies
    pub slot: ModelSlot,
    /// Upstream model identifier
    pub model_id: String,
    /// What the call produced
    pub outcome: Outcome,
}

impl ModelResponse {
    /// Creates a successful response from a model.
    pub fn success(slot: ModelSlot, model_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            slot,
            model_id: model_id.into(),
            outcome: Outcome::Success(text.into()),
        }
    }

    /// Creates a failed response indicating the model could not answer.
    pub fn failure(
        slot: ModelSlot,
        model_id: impl Into<String>,
        kind: FailureKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            slot,
            model_id: model_id.into(),
            outcome: Outcome::failure(kind, message),
        }
    }

    /// Returns `true` if this response was generated successfully.
    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }
}

/// The judge model's synthesized answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JudgeVerdict {
    pub final_answer: String,
    pub reasoning: String,
    /// `false` when the judge output did not follow the expected format
    #[serde(skip)]
    pub structured: bool,
}

impl JudgeVerdict {
    /// A verdict parsed from well-formed judge output
    pub fn new(final_answer: impl Into<String>, reasoning: impl Into<String>) -> Self {
        Self {
            final_answer: final_answer.into(),
            reasoning: reasoning.into(),
            structured: true,
        }
    }

    /// A verdict built from judge output that had no recognizable structure
    pub fn unstructured(raw: &str) -> Self {
        Self {
            final_answer: raw.trim().to_string(),
            reasoning: UNSTRUCTURED_REASONING.to_string(),
            structured: false,
        }
    }

    /// The verdict reported when the judge call itself failed
    pub fn judge_unavailable(kind: FailureKind) -> Self {
        Self {
            final_answer: JUDGE_APOLOGY.to_string(),
            reasoning: format!("Judge model failed: {}", kind),
            structured: false,
        }
    }
}

/// Complete result of a fusion request
#[derive(Debug, Clone, Serialize)]
pub struct FusionResult {
    /// The question text as submitted
    pub input: String,
    /// Per-slot outcomes, present only when model output exposure is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub models: Option<BTreeMap<ModelSlot, Outcome>>,
    /// The judge's verdict
    pub judge: JudgeVerdict,
}

impl FusionResult {
    /// Assemble the result, exposing per-model outcomes only when asked to.
    pub fn new(
        input: impl Into<String>,
        responses: &[ModelResponse],
        judge: JudgeVerdict,
        expose_models: bool,
    ) -> Self {
        let models = expose_models.then(|| {
            responses
                .iter()
                .map(|r| (r.slot, r.outcome.clone()))
                .collect()
        });
        Self {
            input: input.into(),
            models,
            judge,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn responses() -> Vec<ModelResponse> {
        vec![
            ModelResponse::success(ModelSlot::Primary1, "llama-4", "A"),
            ModelResponse::failure(ModelSlot::Primary2, "qwen-3", FailureKind::Timeout, "30s"),
            ModelResponse::success(ModelSlot::Primary3, "gpt-oss", "C"),
        ]
    }

    #[test]
    fn test_failure_display_hides_message() {
        let outcome = Outcome::failure(FailureKind::UpstreamError, "HTTP 500: secret detail");
        assert_eq!(outcome.display_text(), "[NO RESPONSE: upstream_error]");
        assert!(!outcome.is_success());
        assert_eq!(outcome.failure_kind(), Some(FailureKind::UpstreamError));
    }

    #[test]
    fn test_fusion_result_hides_models_by_default() {
        let result = FusionResult::new("Q", &responses(), JudgeVerdict::new("F", "R"), false);
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("models").is_none());
        assert_eq!(json["input"], "Q");
        assert_eq!(json["judge"]["final_answer"], "F");
        assert_eq!(json["judge"]["reasoning"], "R");
        assert!(json["judge"].get("structured").is_none());
    }

    #[test]
    fn test_fusion_result_models_in_slot_order() {
        let mut shuffled = responses();
        shuffled.reverse();
        let result = FusionResult::new("Q", &shuffled, JudgeVerdict::new("F", "R"), true);
        let json = serde_json::to_string(&result).unwrap();

        let p1 = json.find("MODEL1").unwrap();
        let p2 = json.find("MODEL2").unwrap();
        let p3 = json.find("MODEL3").unwrap();
        assert!(p1 < p2 && p2 < p3);
        assert!(json.contains("\"MODEL2\":\"[NO RESPONSE: timeout]\""));
    }

    #[test]
    fn test_judge_unavailable_verdict() {
        let verdict = JudgeVerdict::judge_unavailable(FailureKind::AuthError);
        assert_eq!(verdict.final_answer, JUDGE_APOLOGY);
        assert_eq!(verdict.reasoning, "Judge model failed: auth_error");
        assert!(!verdict.structured);
    }

    #[test]
    fn test_unstructured_verdict_trims_raw() {
        let verdict = JudgeVerdict::unstructured("  just text \n");
        assert_eq!(verdict.final_answer, "just text");
        assert_eq!(verdict.reasoning, UNSTRUCTURED_REASONING);
    }
}
