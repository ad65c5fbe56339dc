//! imagesearch-rs: image search orchestration service
//!
//! This is the main entry point for the application.

use anyhow::Result;
use imagesearch_rs::{
    config,
    engines::EngineLoader,
    network::HttpClient,
    web::{create_router, AppState},
};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging; the level is revisited once settings are loaded
    let builder = FmtSubscriber::builder()
        .with_env_filter(env_filter("info"))
        .with_target(false)
        .with_filter_reloading();
    let log_filter = builder.reload_handle();
    builder.init();

    info!("Starting imagesearch-rs v{}", imagesearch_rs::VERSION);

    // Load configuration
    let settings = config::load()?;
    log_filter.reload(env_filter(settings.general.log_level()))?;
    info!(
        "Loaded configuration for instance: {} ({} affiliates)",
        settings.general.instance_name,
        settings.affiliates.len()
    );

    // Initialize HTTP client
    let client = HttpClient::with_settings(&settings.outgoing)?;
    info!("HTTP client initialized");

    // Load engines
    let registry = EngineLoader::load(&settings, &client);

    let addr = SocketAddr::new(settings.server.bind_address.parse()?, settings.server.port);

    // Create application state and router
    let state = AppState::new(settings, registry);
    let app = create_router(state);

    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// `RUST_LOG` when set, otherwise the given level
fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}
