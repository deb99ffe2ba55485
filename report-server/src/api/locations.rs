//! Location endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use shared::error::AppError;
use shared::models::{Location, LocationCreate, LocationUpdate};

use super::{ApiResult, Json};
use crate::db::locations;
use crate::services::locations::validate_name;
use crate::state::AppState;

/// POST /locations
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<LocationCreate>,
) -> Result<(StatusCode, Json<Location>), AppError> {
    let name = validate_name(&req.name)?;
    let location = locations::create(&state.pool, name).await?;
    tracing::info!(location_id = %location.id, "Location created");
    Ok((StatusCode::CREATED, Json(location)))
}

/// GET /locations
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Location>> {
    Ok(Json(locations::find_all(&state.pool).await?))
}

/// GET /locations/{id}
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Location> {
    Ok(Json(locations::find_by_id(&state.pool, &id).await?))
}

/// PUT /locations/{id}
pub async fn rename(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<LocationUpdate>,
) -> ApiResult<Location> {
    let name = validate_name(&req.name)?;
    Ok(Json(locations::rename(&state.pool, &id, name).await?))
}

/// DELETE /locations/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    locations::delete(&state.pool, &id).await?;
    tracing::info!(location_id = %id, "Location deleted");
    Ok(StatusCode::NO_CONTENT)
}
