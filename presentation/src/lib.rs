//! Presentation layer for model-fusion
//!
//! This crate contains the CLI definition and the axum HTTP surface:
//! routes, authentication, CSRF protection and error mapping.

pub mod cli;
pub mod server;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use server::{ApiError, AppState, CsrfTokens, build_router, serve};
