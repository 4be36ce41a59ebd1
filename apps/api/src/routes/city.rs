//! # City Endpoints
//!
//! ```text
//! GET    /cities        → 200 [CityResponse]
//! POST   /cities        → 201 CityResponse
//! PUT    /cities/{id}   → 200 CityResponse
//! DELETE /cities/{id}   → 200 CityResponse (the deleted city)
//! ```

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;
use civitas_core::{CityId, CityRequest, CityResponse};

/// GET /cities
pub async fn list_cities(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CityResponse>>, ApiError> {
    let cities = state.cities.list_all().await?;
    Ok(Json(cities.into_iter().map(CityResponse::from).collect()))
}

/// POST /cities
pub async fn create_city(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CityRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CityResponse>), ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let city = state.cities.create(&request.name).await?;
    debug!(id = city.id, "City created");

    Ok((StatusCode::CREATED, Json(city.into())))
}

/// PUT /cities/{id}
pub async fn update_city(
    State(state): State<Arc<AppState>>,
    id: Result<Path<CityId>, PathRejection>,
    payload: Result<Json<CityRequest>, JsonRejection>,
) -> Result<Json<CityResponse>, ApiError> {
    let Path(id) = id?;
    let Json(request) = payload?;
    request.validate()?;

    let city = state.cities.update(id, &request.name).await?;
    Ok(Json(city.into()))
}

/// DELETE /cities/{id}
pub async fn delete_city(
    State(state): State<Arc<AppState>>,
    id: Result<Path<CityId>, PathRejection>,
) -> Result<Json<CityResponse>, ApiError> {
    let Path(id) = id?;

    let city = state.cities.delete_by_id(id).await?;
    Ok(Json(city.into()))
}
