//! Cerebras inference API adapter
//!
//! Implements LlmGateway over the OpenAI-compatible chat completions endpoint.

pub mod error;
pub mod gateway;
pub mod protocol;
