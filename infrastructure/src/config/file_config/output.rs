//! Response shaping from TOML (`[output]` section)

use fusion_application::JudgeFailurePolicy;
use fusion_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// What the caller sees in a response
///
/// # Example
///
/// ```toml
/// [output]
/// show_model_output = true
/// judge_failure_policy = "degrade"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Include each primary model's output in the response
    pub show_model_output: bool,
    /// `"bad_gateway"` or `"degrade"`
    pub judge_failure_policy: String,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            show_model_output: false,
            judge_failure_policy: JudgeFailurePolicy::default().as_str().to_string(),
        }
    }
}

impl FileOutputConfig {
    /// Parse the judge failure policy, falling back to the default on error.
    pub fn parse_judge_failure_policy(&self) -> (JudgeFailurePolicy, Vec<ConfigIssue>) {
        match self.judge_failure_policy.parse::<JudgeFailurePolicy>() {
            Ok(policy) => (policy, Vec::new()),
            Err(_) => {
                let issue = ConfigIssue::error(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "output.judge_failure_policy".to_string(),
                        value: self.judge_failure_policy.clone(),
                        valid_values: JudgeFailurePolicy::VALID_VALUES
                            .iter()
                            .map(|v| v.to_string())
                            .collect(),
                    },
                    format!(
                        "output.judge_failure_policy: unknown value '{}', expected one of: {}",
                        self.judge_failure_policy,
                        JudgeFailurePolicy::VALID_VALUES.join(", ")
                    ),
                );
                (JudgeFailurePolicy::default(), vec![issue])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_policy() {
        let config = FileOutputConfig {
            judge_failure_policy: "degrade".into(),
            ..Default::default()
        };
        let (policy, issues) = config.parse_judge_failure_policy();
        assert_eq!(policy, JudgeFailurePolicy::Degrade);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_unknown_policy_is_error() {
        let config = FileOutputConfig {
            judge_failure_policy: "retry".into(),
            ..Default::default()
        };
        let (policy, issues) = config.parse_judge_failure_policy();
        assert_eq!(policy, JudgeFailurePolicy::BadGateway);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error());
        assert!(issues[0].message.contains("retry"));
    }
}
