//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to application types
//! once at startup.

mod auth;
mod models;
mod output;
mod sampling;
mod server;
mod upstream;

pub use auth::FileAuthConfig;
pub use models::FileModelsConfig;
pub use output::FileOutputConfig;
pub use sampling::FileSamplingConfig;
pub use server::FileServerConfig;
pub use upstream::{DEFAULT_BASE_URL, FileUpstreamConfig};

use fusion_application::FusionConfig;
use fusion_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Listener address
    pub server: FileServerConfig,
    /// Upstream endpoint and credentials
    pub upstream: FileUpstreamConfig,
    /// Primary and judge model identifiers
    pub models: FileModelsConfig,
    /// Sampling parameters
    pub sampling: FileSamplingConfig,
    /// Caller authentication
    pub auth: FileAuthConfig,
    /// Response shaping
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Errors mean the service cannot start; warnings are logged and the
    /// affected surface degrades (e.g. `/ask` answers 500 without a key).
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        // 1. Upstream
        if self.upstream.api_key().is_none() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::MissingValue {
                    field: "upstream.api_key".to_string(),
                },
                "upstream.api_key is required (set CEREBRAS_API_KEY)",
            ));
        }
        if self.upstream.timeout_secs == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "upstream.timeout_secs".to_string(),
                    value: "0".to_string(),
                },
                "upstream.timeout_secs: must be at least 1",
            ));
        }

        // 2. Models
        issues.extend(self.models.parse_primaries().1);
        issues.extend(self.models.parse_judge().1);

        // 3. Sampling and output policy
        issues.extend(self.sampling.to_sampling_params().1);
        issues.extend(self.output.parse_judge_failure_policy().1);

        // 4. Auth
        if self.auth.code_x_key().is_none() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::MissingValue {
                    field: "auth.code_x_key".to_string(),
                },
                "auth.code_x_key is not set; POST /ask will reject every request",
            ));
        }
        if self.auth.csrf_secret().is_none() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::MissingValue {
                    field: "auth.csrf_secret".to_string(),
                },
                "auth.csrf_secret is not set; web form tokens will not survive a restart",
            ));
        }
        if self.auth.csrf_max_age_secs == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "auth.csrf_max_age_secs".to_string(),
                    value: "0".to_string(),
                },
                "auth.csrf_max_age_secs: must be at least 1",
            ));
        }

        issues
    }

    /// Build the application [`FusionConfig`].
    ///
    /// Returns the blocking issues when the configuration cannot work.
    pub fn to_fusion_config(&self) -> Result<FusionConfig, Vec<ConfigIssue>> {
        let errors: Vec<ConfigIssue> = self
            .validate()
            .into_iter()
            .filter(ConfigIssue::is_error)
            .collect();

        let (primaries, _) = self.models.parse_primaries();
        let (judge, _) = self.models.parse_judge();
        let (sampling, _) = self.sampling.to_sampling_params();
        let (policy, _) = self.output.parse_judge_failure_policy();

        match (primaries, judge) {
            (Some(primaries), Some(judge)) if errors.is_empty() => {
                Ok(FusionConfig::new(primaries, judge)
                    .with_sampling(sampling)
                    .with_call_timeout(Duration::from_secs(self.upstream.timeout_secs))
                    .with_show_model_output(self.output.show_model_output)
                    .with_judge_failure_policy(policy))
            }
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fusion_application::JudgeFailurePolicy;
    use fusion_domain::{ModelSlot, Severity};

    const FULL: &str = r#"
[server]
host = "127.0.0.1"
port = 8080

[upstream]
api_key = "csk-test"
timeout_secs = 30

[models]
model1 = "llama-4"
model2 = "qwen-3"
model3 = "gpt-oss"
judge = "llama-3.3-70b"

[sampling]
max_tokens = 2048
temperature = 0.2
stream = true

[auth]
code_x_key = "letmein"
csrf_secret = "s3cret"

[output]
show_model_output = true
judge_failure_policy = "degrade"
"#;

    #[test]
    fn test_deserialize_full_config() {
        let config: FileConfig = toml::from_str(FULL).unwrap();
        assert_eq!(config.server.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.upstream.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.upstream.api_key(), Some("csk-test"));
        assert_eq!(config.models.model2.as_deref(), Some("qwen-3"));
        assert_eq!(config.sampling.max_tokens, 2048);
        // Unset field keeps its default
        assert_eq!(config.sampling.top_p, 0.8);
        assert_eq!(config.auth.csrf_max_age_secs, 3600);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_to_fusion_config() {
        let config: FileConfig = toml::from_str(FULL).unwrap();
        let fusion = config.to_fusion_config().unwrap();

        assert_eq!(fusion.model_for(ModelSlot::Primary3), "gpt-oss");
        assert_eq!(fusion.judge_model, "llama-3.3-70b");
        assert_eq!(fusion.call_timeout, Duration::from_secs(30));
        assert_eq!(fusion.sampling.temperature, 0.2);
        assert!(fusion.sampling.stream);
        assert!(fusion.show_model_output);
        assert_eq!(fusion.judge_failure_policy, JudgeFailurePolicy::Degrade);
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.server.bind_address(), "0.0.0.0:2000");
        assert_eq!(config.upstream.timeout_secs, 60);
        assert!(!config.output.show_model_output);
        assert_eq!(config.output.judge_failure_policy, "bad_gateway");
    }

    #[test]
    fn test_validate_default_config_reports_everything() {
        let issues = FileConfig::default().validate();

        let errors: Vec<_> = issues.iter().filter(|i| i.is_error()).collect();
        let warnings: Vec<_> = issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .collect();

        // api key + three primaries + judge
        assert_eq!(errors.len(), 5);
        assert_eq!(warnings.len(), 2);
        assert!(FileConfig::default().to_fusion_config().is_err());
    }

    #[test]
    fn test_blank_secrets_count_as_missing() {
        let mut config: FileConfig = toml::from_str(FULL).unwrap();
        config.auth.code_x_key = Some("  ".into());
        config.upstream.api_key = Some("".into());

        let issues = config.validate();
        assert!(issues.iter().any(|i| i.is_error()
            && matches!(&i.code, ConfigIssueCode::MissingValue { field } if field == "upstream.api_key")));
        assert!(issues.iter().any(|i| !i.is_error()
            && matches!(&i.code, ConfigIssueCode::MissingValue { field } if field == "auth.code_x_key")));
    }

    #[test]
    fn test_debug_output_redacts_secrets() {
        let config: FileConfig = toml::from_str(FULL).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("csk-test"));
        assert!(!debug.contains("letmein"));
        assert!(!debug.contains("s3cret"));
    }
}
