use anyhow::Result;
use std::net::{IpAddr, SocketAddr};
use tracing::{error, info};

mod handlers;
mod middleware;
mod routes;
mod state;

use common::config::Settings;
use common::db::{CacheClient, DbPool};
use common::errors::StartupError;
use common::{readiness, telemetry};
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    telemetry::init_logging("api=info,common=info,tower_http=info")?;

    info!("Starting KOS Glucose Monitoring API");

    // Load and validate configuration
    let settings = Settings::load().map_err(|e| {
        error!(error = %e, "Failed to load configuration");
        e
    })?;
    settings
        .validate()
        .map_err(StartupError::InvalidConfiguration)?;
    info!(
        host = %settings.server.host,
        port = settings.server.port,
        "Configuration loaded"
    );

    // Initialize Prometheus metrics exporter
    let metrics_handle = telemetry::init_metrics()?;
    info!("Metrics exporter initialized");

    // Construct the process-wide dependency handles. Neither performs I/O
    // here; the readiness probes below open the actual connections.
    let db_pool = DbPool::connect_lazy(&settings.database);
    let cache = CacheClient::new(&settings.redis)?;

    // Verify dependencies strictly in order before accepting traffic
    readiness::verify_dependencies(&db_pool, &cache)
        .await
        .map_err(|e| {
            error!(error = %e, "Dependency verification failed, exiting");
            e
        })?;

    // Create application state and router
    let state = AppState::new(db_pool, cache, metrics_handle);
    let app = routes::create_router(state.clone());

    // Start server
    let addr = SocketAddr::from((
        settings.server.host.parse::<IpAddr>()?,
        settings.server.port,
    ));
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        error!(error = %e, addr = %addr, "Failed to bind listener");
        e
    })?;
    info!(addr = %addr, "Server running");
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Release process-wide resources before exiting
    state.db_pool.close().await;
    if state.cache.is_connected() {
        info!("Cache session released");
    }
    info!("API server stopped");

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }

    info!("Initiating graceful shutdown");
}
