//! Configuration loading for model-fusion
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment variables (`CEREBRAS_API_KEY`, `MODEL1`, `JUDGE`, ...)
//! 2. `--config <path>` specified file
//! 3. Project root: `./fusion.toml` or `./.fusion.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/model-fusion/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    DEFAULT_BASE_URL, FileAuthConfig, FileConfig, FileModelsConfig, FileOutputConfig,
    FileSamplingConfig, FileServerConfig, FileUpstreamConfig,
};
pub use loader::{ConfigLoader, ENV_OVERRIDES};
