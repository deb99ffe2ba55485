//! Report endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use shared::error::AppError;
use shared::models::{Report, ReportCreate, ReportStatus, ReportUpdate};

use super::{ApiResult, Json};
use crate::auth::Principal;
use crate::services::reports as workflow;
use crate::state::AppState;

/// POST /reports
pub async fn create(
    State(state): State<AppState>,
    principal: Principal,
    Json(req): Json<ReportCreate>,
) -> Result<(StatusCode, Json<Report>), AppError> {
    let report = workflow::create_report(&state.pool, &principal, &req).await?;
    Ok((StatusCode::CREATED, Json(report)))
}

/// GET /reports
pub async fn list_approved(
    State(state): State<AppState>,
    principal: Principal,
) -> ApiResult<Vec<Report>> {
    let reports = workflow::list_reports(&state.pool, &principal, ReportStatus::Approved).await?;
    Ok(Json(reports))
}

/// GET /reports/{id}
pub async fn get_approved(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
) -> ApiResult<Report> {
    let report = workflow::get_report(&state.pool, &principal, &id, ReportStatus::Approved).await?;
    Ok(Json(report))
}

/// GET /reports/pending
pub async fn list_pending(
    State(state): State<AppState>,
    principal: Principal,
) -> ApiResult<Vec<Report>> {
    let reports = workflow::list_reports(&state.pool, &principal, ReportStatus::Pending).await?;
    Ok(Json(reports))
}

/// GET /reports/pending/{id}
pub async fn get_pending(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
) -> ApiResult<Report> {
    let report = workflow::get_report(&state.pool, &principal, &id, ReportStatus::Pending).await?;
    Ok(Json(report))
}

/// PUT /reports/pending/{id}
pub async fn update_pending(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
    Json(req): Json<ReportUpdate>,
) -> ApiResult<Report> {
    let report = workflow::update_pending_report(&state.pool, &principal, &id, &req).await?;
    Ok(Json(report))
}

/// GET /reports/denied
pub async fn list_denied(
    State(state): State<AppState>,
    principal: Principal,
) -> ApiResult<Vec<Report>> {
    let reports = workflow::list_reports(&state.pool, &principal, ReportStatus::Denied).await?;
    Ok(Json(reports))
}

/// GET /reports/denied/{id}
pub async fn get_denied(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
) -> ApiResult<Report> {
    let report = workflow::get_report(&state.pool, &principal, &id, ReportStatus::Denied).await?;
    Ok(Json(report))
}

/// PATCH /reports/{id}/approve
pub async fn approve(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
) -> ApiResult<Report> {
    let report = workflow::approve_report(&state.pool, &principal, &id).await?;
    Ok(Json(report))
}

/// PATCH /reports/{id}/deny
pub async fn deny(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
) -> ApiResult<Report> {
    let report = workflow::deny_report(&state.pool, &principal, &id).await?;
    Ok(Json(report))
}

/// DELETE /reports/{id}
pub async fn delete(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    workflow::delete_report(&state.pool, &principal, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
