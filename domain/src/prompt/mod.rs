//! Prompt templates.

pub mod template;

pub use template::{FINAL_ANSWER_MARKER, PromptTemplate, REASONING_MARKER};
