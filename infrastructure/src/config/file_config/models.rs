//! Model selection from TOML (`[models]` section)

use fusion_domain::{ConfigIssue, ConfigIssueCode, ModelSlot};
use serde::{Deserialize, Serialize};

/// Upstream model identifiers for the three primary slots and the judge
///
/// # Example
///
/// ```toml
/// [models]
/// model1 = "llama-4-scout-17b-16e-instruct"
/// model2 = "qwen-3-32b"
/// model3 = "gpt-oss-120b"
/// judge = "llama-3.3-70b"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    pub model1: Option<String>,
    pub model2: Option<String>,
    pub model3: Option<String>,
    pub judge: Option<String>,
}

impl FileModelsConfig {
    /// Configured identifier for a primary slot
    pub fn primary(&self, slot: ModelSlot) -> Option<&String> {
        match slot {
            ModelSlot::Primary1 => self.model1.as_ref(),
            ModelSlot::Primary2 => self.model2.as_ref(),
            ModelSlot::Primary3 => self.model3.as_ref(),
        }
    }

    /// Check one model field, collecting an issue when it is unset or blank.
    fn parse_model(field: &str, value: Option<&String>) -> (Option<String>, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        match value {
            None => {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::MissingValue {
                        field: format!("models.{}", field),
                    },
                    format!("models.{}: no model configured", field),
                ));
                (None, issues)
            }
            Some(s) if s.trim().is_empty() => {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyModelName {
                        field: format!("models.{}", field),
                    },
                    format!("models.{}: model name cannot be empty", field),
                ));
                (None, issues)
            }
            Some(s) => (Some(s.trim().to_string()), issues),
        }
    }

    /// Resolve the three primary identifiers in slot order
    pub fn parse_primaries(&self) -> (Option<[String; 3]>, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        let mut models = Vec::with_capacity(3);

        for slot in ModelSlot::ALL {
            let field = slot.as_str().to_lowercase();
            let (model, slot_issues) = Self::parse_model(&field, self.primary(slot));
            issues.extend(slot_issues);
            models.extend(model);
        }

        (<[String; 3]>::try_from(models).ok(), issues)
    }

    /// Resolve the judge identifier
    pub fn parse_judge(&self) -> (Option<String>, Vec<ConfigIssue>) {
        Self::parse_model("judge", self.judge.as_ref())
    }
}
