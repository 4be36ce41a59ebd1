//! # REST Handlers
//!
//! One module per resource, plus the health check.
//!
//! Handlers take their extractors as `Result<_, Rejection>` so that a
//! malformed body or path id turns into the standard error body instead of
//! axum's plain-text rejection.

pub mod city;
pub mod state;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::warn;

use crate::state::AppState;

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// `ok` or `unavailable`
    pub status: &'static str,

    /// `connected` or `unreachable`
    pub database: &'static str,

    /// Applied schema migrations
    pub migrations_applied: usize,
}

/// GET /health
///
/// 200 when the database answers queries, 503 otherwise.
pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    if !state.db.health_check().await {
        warn!("Health check failed: database unreachable");
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "unavailable",
                database: "unreachable",
                migrations_applied: 0,
            }),
        );
    }

    let migrations_applied = match state.db.migration_status().await {
        Ok((_, applied)) => applied,
        Err(e) => {
            warn!(error = %e, "Could not read migration status");
            0
        }
    };

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok",
            database: "connected",
            migrations_applied,
        }),
    )
}
