//! # Civitas API
//!
//! REST server for the City/State registry.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Civitas REST API                                │
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────────┐│
//! │  │  /cities       │  │  /states       │  │  /health                   ││
//! │  │                │  │                │  │                            ││
//! │  │ • GET  list    │  │ • GET  list    │  │ • database reachable?      ││
//! │  │ • POST create  │  │ • POST create  │  │ • migrations applied       ││
//! │  │ • PUT  rename  │  │ • PUT  update  │  │                            ││
//! │  │ • DELETE       │  │ • DELETE       │  │                            ││
//! │  └───────┬────────┘  └───────┬────────┘  └────────────────────────────┘│
//! │          │                   │                                          │
//! │          ▼                   ▼                                          │
//! │     CityService        StateService      (civitas-core)                 │
//! │          │                   │                                          │
//! │          └─────────┬─────────┘                                          │
//! │                    ▼                                                    │
//! │             SQLite (civitas-db)                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! See [`config::ApiConfig`]. Environment variables:
//! - `CIVITAS_HOST` - Interface to bind (default: 0.0.0.0)
//! - `CIVITAS_PORT` - HTTP port (default: 8080)
//! - `CIVITAS_DATABASE_PATH` - SQLite file (default: civitas.db)
//! - `CIVITAS_MAX_CONNECTIONS` - Pool size (default: 5)
//! - `CIVITAS_LOG_FILTER` - Log filter when `RUST_LOG` is unset

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::routing::{get, put};
use axum::Router;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

// Re-exports
pub use config::{ApiConfig, ConfigError};
pub use error::ApiError;
pub use state::AppState;

/// Create the REST API router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/cities",
            get(routes::city::list_cities).post(routes::city::create_city),
        )
        .route(
            "/cities/{id}",
            put(routes::city::update_city).delete(routes::city::delete_city),
        )
        .route(
            "/states",
            get(routes::state::list_states).post(routes::state::create_state),
        )
        .route(
            "/states/{id}",
            put(routes::state::update_state).delete(routes::state::delete_state),
        )
        .route("/health", get(routes::health))
        // Middleware
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %Uuid::new_v4(),
                )
            }),
        )
        .with_state(state)
}
