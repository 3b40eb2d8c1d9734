//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for model-fusion
#[derive(Parser, Debug)]
#[command(name = "model-fusion")]
#[command(author, version, about = "Multi-model response fusion - three models answer, a judge merges")]
#[command(long_about = r#"
Model Fusion serves an HTTP API that answers each question with three LLMs
in parallel, then asks a judge model to merge their answers into one.

Endpoints:
  POST /ask       JSON API, requires the `code-x-key` header
  GET  /          Web form
  POST /web-ask   Web form submission (CSRF protected)
  GET  /health    Liveness check

Configuration is loaded from (in priority order):
1. Environment variables (CEREBRAS_API_KEY, MODEL1..MODEL3, JUDGE, ...)
2. --config <path>     Explicit config file
3. ./fusion.toml       Project-level config
4. ~/.config/model-fusion/config.toml   Global config

Example:
  model-fusion -v
  model-fusion --config fusion.toml --port 8080
"#)]
pub struct Cli {
    /// Address to bind (overrides config)
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files (environment still applies)
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration sources and the resolved values, then exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_overrides() {
        let cli = Cli::parse_from(["model-fusion", "-vv", "--port", "8080", "--no-config"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.port, Some(8080));
        assert!(cli.no_config);
        assert!(cli.host.is_none());
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["model-fusion"]);
        assert_eq!(cli.verbose, 0);
        assert!(cli.config.is_none());
        assert!(!cli.show_config);
    }
}
