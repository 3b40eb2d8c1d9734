//! Core domain concepts shared across all subdomains.
//!
//! - [`model::ModelSlot`] - fixed positional identity of a primary model
//! - [`question::Question`] - a validated question to fan out
//! - [`error::DomainError`] - domain-level errors

pub mod error;
pub mod model;
pub mod question;
pub mod string;
