//! # Civitas API Server
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        API Server Startup                               │
//! │                                                                         │
//! │  ApiConfig::load() ──► init_tracing ──► Database::new (migrations)     │
//! │                                               │                         │
//! │                                               ▼                         │
//! │  Ctrl-C / SIGTERM ──► graceful shutdown ◄── axum::serve (HTTP)         │
//! │                              │                                          │
//! │                              ▼                                          │
//! │                       pool closed, exit                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use civitas_api::{build_router, ApiConfig, AppState};
use civitas_db::Database;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::load().context("loading configuration")?;

    init_tracing(&config.log_filter);

    info!("Starting Civitas API server...");
    info!(
        addr = %config.bind_addr(),
        database = %config.database_path.display(),
        max_connections = config.max_connections,
        "Configuration loaded"
    );

    let db = Database::new(config.db_config())
        .await
        .context("opening database")?;

    let state = Arc::new(AppState::new(db.clone()));
    let app = build_router(state);

    let listener = TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("binding {}", config.bind_addr()))?;
    info!(addr = %config.bind_addr(), "Listening for HTTP requests");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    db.close().await;

    info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=civitas=trace` - Show trace for civitas crates only
/// - Default: the configured `log_filter`
fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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

    info!("Shutdown signal received, starting graceful shutdown...");
}
