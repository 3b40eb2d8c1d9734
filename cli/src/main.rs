//! CLI entrypoint for Model Fusion
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use fusion_application::RunFusionUseCase;
use fusion_domain::ConfigIssue;
use fusion_infrastructure::{CerebrasGateway, ConfigLoader};
use fusion_presentation::{AppState, Cli, CsrfTokens, build_router, serve};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level; RUST_LOG wins when set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
    }
    .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    if let Some(host) = &cli.host {
        config.server.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        println!();
        println!("{:#?}", config);
        return Ok(());
    }

    if !report_issues(&config.validate()) {
        bail!("Configuration is invalid, see errors above");
    }

    info!("Starting Model Fusion");

    // === Dependency Injection ===
    let fusion_config = config
        .to_fusion_config()
        .map_err(|_| anyhow::anyhow!("Configuration is invalid"))?;
    info!(
        models = ?fusion_config.primary_models,
        judge = %fusion_config.judge_model,
        timeout_secs = fusion_config.call_timeout.as_secs(),
        stream = fusion_config.sampling.stream,
        "Fusion configured"
    );

    let gateway = Arc::new(CerebrasGateway::from_config(&config.upstream)?);
    let fusion = Arc::new(RunFusionUseCase::new(gateway, Arc::new(fusion_config)));

    let csrf_max_age = Duration::from_secs(config.auth.csrf_max_age_secs);
    let csrf = match config.auth.csrf_secret() {
        Some(secret) => CsrfTokens::new(secret.as_bytes(), csrf_max_age)?,
        None => CsrfTokens::with_random_secret(csrf_max_age)?,
    };

    let state = AppState::new(fusion, csrf).with_api_key(config.auth.code_x_key());
    let router = build_router(state);

    // === Serve ===
    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    let shutdown = CancellationToken::new();
    tokio::spawn(wait_for_signal(shutdown.clone()));

    serve(listener, router, shutdown).await?;
    Ok(())
}

/// Log every configuration issue; returns `false` if any is an error.
fn report_issues(issues: &[ConfigIssue]) -> bool {
    let mut ok = true;
    for issue in issues {
        if issue.is_error() {
            error!("{}", issue.message);
            ok = false;
        } else {
            warn!("{}", issue.message);
        }
    }
    ok
}

/// Cancel `shutdown` on Ctrl-C or SIGTERM
async fn wait_for_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining requests");
    shutdown.cancel();
}
