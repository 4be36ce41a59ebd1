//! # State Endpoints
//!
//! ```text
//! GET    /states        → 200 [StateResponse]
//! POST   /states        → 201 StateResponse
//! PUT    /states/{id}   → 200 StateResponse
//! DELETE /states/{id}   → 200 StateResponse (the deleted state)
//! ```
//!
//! Responses carry the owning city's name, resolved when the request runs.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;
use civitas_core::{StateId, StateRequest, StateResponse};

/// GET /states
pub async fn list_states(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StateResponse>>, ApiError> {
    let states = state.states.list_all().await?;
    Ok(Json(states.into_iter().map(StateResponse::from).collect()))
}

/// POST /states
pub async fn create_state(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<StateRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<StateResponse>), ApiError> {
    let Json(request) = payload?;
    let city_id = request.validate()?;

    let created = state.states.create(&request.name, city_id).await?;
    debug!(id = created.id, city_id = city_id, "State created");

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// PUT /states/{id}
pub async fn update_state(
    State(state): State<Arc<AppState>>,
    id: Result<Path<StateId>, PathRejection>,
    payload: Result<Json<StateRequest>, JsonRejection>,
) -> Result<Json<StateResponse>, ApiError> {
    let Path(id) = id?;
    let Json(request) = payload?;
    let city_id = request.validate()?;

    let updated = state.states.update(id, &request.name, city_id).await?;
    Ok(Json(updated.into()))
}

/// DELETE /states/{id}
pub async fn delete_state(
    State(state): State<Arc<AppState>>,
    id: Result<Path<StateId>, PathRejection>,
) -> Result<Json<StateResponse>, ApiError> {
    let Path(id) = id?;

    let deleted = state.states.delete_by_id(id).await?;
    Ok(Json(deleted.into()))
}
