//! Pet triage server entrypoint.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use pet_triage_llm::{GenerativeAdapter, TriageOrchestrator};
use pet_triage_server::{build_router, AppState, ConfigLoader};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pet-triage-server", version, about = "Pet symptom triage HTTP service")]
struct Cli {
    /// Config file (defaults to ./pet-triage.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, overrides the config file
    #[arg(short, long)]
    bind: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ConfigLoader::load(cli.config.as_deref()).context("loading configuration")?;

    // RUST_LOG wins, then -v, then the configured filter
    let filter = match (EnvFilter::try_from_default_env(), cli.verbose) {
        (Ok(filter), _) => filter,
        (Err(_), 0) => EnvFilter::new(&config.server.log_filter),
        (Err(_), 1) => EnvFilter::new("debug"),
        (Err(_), _) => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let adapter = Arc::new(GenerativeAdapter::from_config(&config.triage));
    info!(
        backend = ?config.triage.backend,
        model = adapter.model_id(),
        fallback = config.triage.fallback_enabled,
        "Starting pet triage server"
    );
    if config.triage.warmup {
        // Detached and logs its own outcome; requests arriving first block on
        // the same initialisation.
        adapter.warm_up();
    }

    let orchestrator = TriageOrchestrator::new(adapter, config.triage.clone());
    let app = build_router(AppState::new(orchestrator));

    let bind = cli.bind.unwrap_or(config.server.bind);
    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("binding {bind}"))?;
    info!("Listening on http://{}", bind);

    axum::serve(listener, app).await?;
    Ok(())
}
