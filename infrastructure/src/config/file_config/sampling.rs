//! Sampling parameters from TOML (`[sampling]` section)

use fusion_application::SamplingParams;
use fusion_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Sampling parameters sent with every upstream call
///
/// # Example
///
/// ```toml
/// [sampling]
/// max_tokens = 1024
/// temperature = 0.7
/// top_p = 0.8
/// stream = false
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSamplingConfig {
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub stream: bool,
}

impl Default for FileSamplingConfig {
    fn default() -> Self {
        let params = SamplingParams::default();
        Self {
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            top_p: params.top_p,
            stream: params.stream,
        }
    }
}

impl FileSamplingConfig {
    /// Convert to [`SamplingParams`], reporting values the upstream would reject.
    pub fn to_sampling_params(&self) -> (SamplingParams, Vec<ConfigIssue>) {
        let mut issues = Vec::new();

        if self.max_tokens == 0 {
            issues.push(out_of_range(
                "sampling.max_tokens",
                self.max_tokens.to_string(),
                "must be at least 1",
            ));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            issues.push(out_of_range(
                "sampling.temperature",
                self.temperature.to_string(),
                "must be between 0.0 and 2.0",
            ));
        }
        if !(self.top_p > 0.0 && self.top_p <= 1.0) {
            issues.push(out_of_range(
                "sampling.top_p",
                self.top_p.to_string(),
                "must be greater than 0.0 and at most 1.0",
            ));
        }

        let params = SamplingParams::default()
            .with_max_tokens(self.max_tokens)
            .with_temperature(self.temperature)
            .with_top_p(self.top_p)
            .with_stream(self.stream);

        (params, issues)
    }
}

fn out_of_range(field: &str, value: String, rule: &str) -> ConfigIssue {
    let message = format!("{}: {} {}", field, value, rule);
    ConfigIssue::error(
        ConfigIssueCode::OutOfRange {
            field: field.to_string(),
            value,
        },
        message,
    )
}
