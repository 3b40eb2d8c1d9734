//! Infrastructure layer for model-fusion
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod cerebras;
pub mod config;

// Re-export commonly used types
pub use cerebras::{error::CerebrasError, gateway::CerebrasGateway};
pub use config::{
    ConfigLoader, FileAuthConfig, FileConfig, FileModelsConfig, FileOutputConfig,
    FileSamplingConfig, FileServerConfig, FileUpstreamConfig,
};
