//! Configuration loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const PROJECT_FILES: [&str; 2] = ["fusion.toml", ".fusion.toml"];

/// Environment variables recognized as configuration overrides, with the
/// config key each one sets.
pub const ENV_OVERRIDES: [(&str, &str); 17] = [
    ("CEREBRAS_API_KEY", "upstream.api_key"),
    ("CEREBRAS_BASE_URL", "upstream.base_url"),
    ("REQUEST_TIMEOUT_SECS", "upstream.timeout_secs"),
    ("MODEL1", "models.model1"),
    ("MODEL2", "models.model2"),
    ("MODEL3", "models.model3"),
    ("JUDGE", "models.judge"),
    ("MAX_TOKENS", "sampling.max_tokens"),
    ("TEMPERATURE", "sampling.temperature"),
    ("TOP_P", "sampling.top_p"),
    ("STREAM", "sampling.stream"),
    ("CODE_X_KEY", "auth.code_x_key"),
    ("CSRF_SECRET_KEY", "auth.csrf_secret"),
    ("SHOW_MODEL_OUTPUT", "output.show_model_output"),
    ("JUDGE_FAILURE_POLICY", "output.judge_failure_policy"),
    ("HOST", "server.host"),
    ("PORT", "server.port"),
];

/// Config keys whose environment values are taken verbatim, so a numeric
/// key or model id is never read as a number.
const STRING_KEYS: [&str; 10] = [
    "upstream.api_key",
    "upstream.base_url",
    "models.model1",
    "models.model2",
    "models.model3",
    "models.judge",
    "auth.code_x_key",
    "auth.csrf_secret",
    "output.judge_failure_policy",
    "server.host",
];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (see [`ENV_OVERRIDES`])
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./fusion.toml` or `./.fusion.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/model-fusion/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(project_path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&project_path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        Self::merge_env(figment).extract().map_err(Box::new)
    }

    /// Load defaults plus environment only (for --no-config)
    pub fn load_defaults() -> Result<FileConfig, Box<figment::Error>> {
        Self::merge_env(Figment::new().merge(Serialized::defaults(FileConfig::default())))
            .extract()
            .map_err(Box::new)
    }

    /// Load a single file over the defaults, ignoring the environment
    pub fn load_file(path: &Path) -> Result<FileConfig, Box<figment::Error>> {
        Figment::new()
            .merge(Serialized::defaults(FileConfig::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(Box::new)
    }

    /// Merge the recognized environment variables over `figment`
    fn merge_env(figment: Figment) -> Figment {
        let verbatim = std::env::vars_os().filter_map(|(key, value)| {
            let path = Self::override_path(key.to_str()?)?;
            let value = value.into_string().ok()?;
            STRING_KEYS.contains(&path).then_some((path, value))
        });

        verbatim.fold(figment.merge(Self::env_provider()), |figment, (path, value)| {
            figment.merge(Serialized::default(path, value))
        })
    }

    /// Typed environment provider for the non-string overrides
    fn env_provider() -> Env {
        Env::raw().filter_map(|key| {
            Self::override_path(key.as_str())
                .filter(|path| !STRING_KEYS.contains(path))
                .map(Into::into)
        })
    }

    /// Config key set by an environment variable, matched case-insensitively
    fn override_path(var: &str) -> Option<&'static str> {
        ENV_OVERRIDES
            .iter()
            .find(|(name, _)| var.eq_ignore_ascii_case(name))
            .map(|(_, path)| *path)
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/model-fusion/config.toml if set,
    /// otherwise falls back to ~/.config/model-fusion/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("model-fusion").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");

        let set_vars: Vec<&str> = ENV_OVERRIDES
            .iter()
            .map(|(var, _)| *var)
            .filter(|var| std::env::var_os(var).is_some())
            .collect();
        if set_vars.is_empty() {
            println!("  [     ] Environment: none of the recognized variables set");
        } else {
            println!("  [FOUND] Environment: {}", set_vars.join(", "));
        }

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{:<5}] Explicit: {}", mark, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./fusion.toml or ./.fusion.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}
