//! Admin account endpoints (privileged only)
//!
//! Only `admin` rows are reachable here; the bootstrap super admin is not
//! listed and cannot be renamed or deleted through this API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use shared::error::AppError;
use shared::models::{AccountCreate, NameUpdate, Role, User};

use super::{ApiResult, Json};
use crate::auth::Principal;
use crate::db::users;
use crate::security_log;
use crate::services::accounts;
use crate::state::AppState;

/// POST /admins
pub async fn create(
    State(state): State<AppState>,
    principal: Principal,
    Json(req): Json<AccountCreate>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = accounts::create_account(&state.pool, &req, Role::Admin).await?;
    security_log!(
        "INFO",
        "admin_created",
        user_id = user.id.clone(),
        created_by = principal.id.clone()
    );
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /admins
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<User>> {
    Ok(Json(users::list_with_role(&state.pool, Role::Admin).await?))
}

/// GET /admins/{id}
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<User> {
    Ok(Json(users::find_with_role(&state.pool, &id, Role::Admin).await?))
}

/// PUT /admins/{id}
pub async fn rename(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<NameUpdate>,
) -> ApiResult<User> {
    let user =
        accounts::rename_account(&state.pool, &id, Role::Admin, &req.first_name, &req.last_name)
            .await?;
    Ok(Json(user))
}

/// DELETE /admins/{id}
pub async fn delete(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    users::delete_with_role(&state.pool, &id, Role::Admin).await?;
    security_log!(
        "INFO",
        "admin_deleted",
        user_id = id,
        deleted_by = principal.id.clone()
    );
    Ok(StatusCode::NO_CONTENT)
}
