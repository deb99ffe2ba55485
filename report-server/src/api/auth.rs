//! Session endpoints: login, logout, current user

use axum::{
    extract::State,
    http::header::SET_COOKIE,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{Role, User};

use super::{ApiResult, Json};
use crate::auth::Principal;
use crate::auth::cookie::{revoked_cookie, session_cookie};
use crate::db::users;
use crate::security_log;
use crate::services::accounts;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub id: String,
    pub role: Role,
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, AppError> {
    let user = accounts::authenticate(&state.pool, &req.email, &req.password).await?;

    let issued = state.tokens.issue(&user.id, user.role).map_err(|e| {
        tracing::error!("Token creation failed: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    security_log!("INFO", "login", user_id = user.id.clone(), role = user.role.as_db());

    Ok((
        [(SET_COOKIE, session_cookie(&issued))],
        Json(LoginResponse {
            id: user.id,
            role: user.role,
        }),
    )
        .into_response())
}

/// POST /logout
///
/// Tokens are stateless; this only tells the client to drop the cookie.
pub async fn logout() -> Response {
    ([(SET_COOKIE, revoked_cookie())], ApiResponse::<()>::ok()).into_response()
}

/// GET /me
pub async fn me(State(state): State<AppState>, principal: Principal) -> ApiResult<User> {
    Ok(Json(users::find_by_id(&state.pool, &principal.id).await?))
}
