//! Employee management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use shared::error::AppError;
use shared::models::{AccountCreate, EmployeeStatusUpdate, PasswordUpdate, Role, User};

use super::{ApiResult, Json};
use crate::auth::Principal;
use crate::db::users;
use crate::security_log;
use crate::services::accounts;
use crate::state::AppState;

/// POST /employees
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<AccountCreate>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = accounts::create_account(&state.pool, &req, Role::Employee).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /employees
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<User>> {
    Ok(Json(users::list_with_role(&state.pool, Role::Employee).await?))
}

/// GET /employees/{id}
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<User> {
    Ok(Json(users::find_with_role(&state.pool, &id, Role::Employee).await?))
}

/// PATCH /employees/{id}/status
pub async fn set_status(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
    Json(req): Json<EmployeeStatusUpdate>,
) -> ApiResult<User> {
    let user = users::set_employee_active(&state.pool, &id, req.active).await?;
    tracing::info!(
        user_id = %id,
        active = req.active,
        changed_by = %principal.id,
        "Employee status changed"
    );
    Ok(Json(user))
}

/// DELETE /employees/{id}
pub async fn delete(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    users::delete_with_role(&state.pool, &id, Role::Employee).await?;
    tracing::info!(user_id = %id, deleted_by = %principal.id, "Employee deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /employees/password
///
/// Any signed-in user changing their own password.
pub async fn change_own_password(
    State(state): State<AppState>,
    principal: Principal,
    Json(req): Json<PasswordUpdate>,
) -> Result<StatusCode, AppError> {
    accounts::change_password(&state.pool, &principal.id, None, &req.password).await?;
    security_log!("INFO", "password_changed", user_id = principal.id.clone());
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /employees/password/{id}
pub async fn reset_password(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
    Json(req): Json<PasswordUpdate>,
) -> Result<StatusCode, AppError> {
    accounts::change_password(&state.pool, &id, Some(Role::Employee), &req.password).await?;
    security_log!(
        "INFO",
        "password_reset",
        user_id = id,
        changed_by = principal.id.clone()
    );
    Ok(StatusCode::NO_CONTENT)
}
