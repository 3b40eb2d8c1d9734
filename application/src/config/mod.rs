//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`FusionConfig`] - model selection, timeouts and output policy
//! - [`SamplingParams`] - sampling parameters sent upstream

pub mod fusion_config;
pub mod sampling_params;

pub use fusion_config::{FusionConfig, JudgeFailurePolicy};
pub use sampling_params::SamplingParams;
