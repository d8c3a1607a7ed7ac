use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use movie_explorer_core::{
    load_config, validate_config, KeyValueStorage, MovieCatalog, OmdbClient, SearchOutcome,
    SqliteStorage,
};
use movie_explorer_server::api::create_router;
use movie_explorer_server::state::AppState;

/// Environment variable naming the config file
const CONFIG_ENV: &str = "MOVIE_EXPLORER_CONFIG";

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Storage path: {:?}", config.storage.path);
    info!("Search overlap policy: {:?}", config.search.overlap_policy);

    // Durable storage for favourites and the selection slot
    let storage: Arc<dyn KeyValueStorage> = Arc::new(
        SqliteStorage::new(&config.storage.path).context("Failed to open storage")?,
    );
    info!("Storage initialized");

    // Movie catalog client
    let catalog: Arc<dyn MovieCatalog> = Arc::new(
        OmdbClient::new(config.omdb.clone()).context("Failed to create OMDb client")?,
    );
    info!("OMDb client initialized");

    let state = Arc::new(AppState::new(config.clone(), catalog, storage));
    info!("Loaded {} favourites", state.favourites().len());

    // Populate the search page with the default query
    let default_query = config.search.default_query.trim().to_string();
    if !default_query.is_empty() {
        let search = Arc::clone(state.search());
        tokio::spawn(async move {
            match search.submit(&default_query).await {
                SearchOutcome::Applied(snapshot) => info!(
                    "Default search '{}' finished: {:?}, {} results",
                    default_query,
                    snapshot.phase,
                    snapshot.items.len()
                ),
                other => warn!("Default search '{}' not applied: {:?}", default_query, other),
            }
        });
    }

    // Create router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
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
}
