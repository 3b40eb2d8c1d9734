//! Question value object

use super::error::DomainError;
/// A question to be fanned out to the primary models (Value Object)
///
/// Holds the user's text and the optional system message that accompanies
/// it on every primary call. An empty system message means no system
/// message is sent upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    text: String,
    system_message: String,
}

impl Question {
    /// Try to create a new question, rejecting empty or whitespace-only text
    pub fn try_new(text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DomainError::InvalidQuestion(
                "question cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            text,
            system_message: String::new(),
        })
    }

    /// Attach a system message to the question
    pub fn with_system_message(mut self, system_message: impl Into<String>) -> Self {
        self.system_message = system_message.into();
        self
    }

    /// Get the question text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the system message if one was provided
    pub fn system_message_opt(&self) -> Option<&str> {
        if self.system_message.trim().is_empty() {
            None
        } else {
            Some(&self.system_message)
        }
    }

    /// Consume and return the inner text
    pub fn into_text(self) -> String {
        self.text
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}
