//! Boundary error and response body

use super::category::ErrorCategory;
use super::codes::ErrorCode;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Error returned to API clients
///
/// Carries a numeric [`ErrorCode`], a message and optional structured details
/// (offending field, resource id, computed sum).
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Error with the code's default message
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    /// 401: no session cookie
    pub fn unauthorized() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    /// 401: wrong email or password
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials)
    }

    pub fn token_expired() -> Self {
        Self::new(ErrorCode::TokenExpired)
    }

    pub fn invalid_token(reason: impl Into<String>) -> Self {
        Self {
            message: reason.into(),
            ..Self::new(ErrorCode::TokenInvalid)
        }
    }

    /// 403: authenticated, but the role or ownership check failed
    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self {
            message: reason.into(),
            ..Self::new(ErrorCode::PermissionDenied)
        }
    }
}

/// JSON body of every error response (and of bodiless successes such as logout)
///
/// `code` is 0 on success. `details` only appears on errors that carry them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl ApiResponse<()> {
    pub fn ok() -> Self {
        Self {
            code: Some(ErrorCode::Success.code()),
            message: ErrorCode::Success.message().to_string(),
            data: None,
            details: None,
        }
    }

    pub fn error(err: &AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            message: err.message.clone(),
            data: None,
            details: err.details.clone(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(ErrorCode::InvalidRequest).with_detail("reason", rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Client errors are logged by the request logger; only failures on
        // our side are worth an error line with the code attached.
        if self.code.category() == ErrorCategory::System {
            tracing::error!(code = %self.code, message = %self.message, "System error occurred");
        }

        (self.http_status(), Json(ApiResponse::<()>::error(&self))).into_response()
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self
            .code
            .filter(|code| *code != 0)
            .map(|code| {
                ErrorCode::try_from(code)
                    .map(|c| c.http_status())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            })
            .unwrap_or(StatusCode::OK);

        (status, Json(self)).into_response()
    }
}
