mod client;
mod config;
mod errors;
mod generation;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::generation::generator::SnapshotGenerator;
use crate::generation::randomness::RandomSource;
use crate::generation::templates::HeadlineTemplates;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Headline API v{}", env!("CARGO_PKG_VERSION"));

    // Template set is fixed for the lifetime of the process
    let templates = match &config.templates_file {
        Some(path) => HeadlineTemplates::from_json_file(path)
            .with_context(|| format!("Failed to load templates from {}", path.display()))?,
        None => HeadlineTemplates::default(),
    };
    info!("Loaded {} headline templates", templates.len());
    for template in templates.iter() {
        debug!("Template: {template}");
    }

    let random = RandomSource::from_seed(config.rng_seed);
    if let Some(seed) = config.rng_seed {
        info!("Using seeded random source (seed: {seed})");
    }

    let state = AppState {
        generator: SnapshotGenerator::new(Arc::new(templates)),
        random: Arc::new(random),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
