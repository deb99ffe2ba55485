//! Authentication middleware
//!
//! Reads the `auth_token` cookie, validates it and injects the [`Principal`]
//! into request extensions (and response extensions, for request logging).
//!
//! | Failure | Code |
//! |---------|------|
//! | no cookie | 401 NotAuthenticated |
//! | expired token | 401 TokenExpired |
//! | bad signature, algorithm or claims | 401 TokenInvalid |

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use shared::error::AppError;

use super::cookie::read_token;
use super::token::TokenError;
use crate::security_log;
use crate::state::AppState;

pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = read_token(req.headers()) else {
        security_log!("WARN", "auth_missing", uri = req.uri().to_string());
        return Err(AppError::unauthorized());
    };

    let principal = match state.tokens.validate(token) {
        Ok(principal) => principal,
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = e.to_string(),
                uri = req.uri().to_string()
            );
            return Err(match e {
                TokenError::Expired => AppError::token_expired(),
                _ => AppError::invalid_token("Invalid token"),
            });
        }
    };

    req.extensions_mut().insert(principal.clone());
    let mut response = next.run(req).await;
    response.extensions_mut().insert(principal);
    Ok(response)
}
