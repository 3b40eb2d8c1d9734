//! Domain layer for model-fusion
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Primary models**: three configured models, each bound to a fixed
//!   [`ModelSlot`], queried with the user's [`Question`]
//! - **Judge model**: a fourth model that reads every primary [`Outcome`]
//!   and produces a [`JudgeVerdict`]
//! - **Fusion result**: the question, the optional per-slot outcomes and the
//!   verdict, returned to the caller as a [`FusionResult`]

pub mod config;
pub mod core;
pub mod fusion;
pub mod judge;
pub mod prompt;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, Severity};
pub use core::{error::DomainError, model::ModelSlot, question::Question, string::preview};
pub use fusion::value_objects::{
    FailureKind, FusionResult, JUDGE_APOLOGY, JudgeVerdict, MISSING_REASONING, ModelResponse,
    Outcome, UNSTRUCTURED_REASONING, failure_marker,
};
pub use judge::parse_judge_response;
pub use prompt::PromptTemplate;
