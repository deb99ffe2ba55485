//! Authenticated principal
//!
//! `require_auth` inserts the principal into request extensions; handlers
//! receive it as a typed extractor argument instead of looking it up by key.

use axum::{extract::FromRequestParts, http::request::Parts};
use shared::error::AppError;
use shared::models::Role;

/// The identity attached to a request after token validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: String,
    pub role: Role,
}

impl Principal {
    /// Employees only ever see and edit their own reports
    pub fn owner_scope(&self) -> Option<&str> {
        (self.role == Role::Employee).then_some(self.id.as_str())
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Principal {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .ok_or_else(AppError::unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    #[test]
    fn test_owner_scope() {
        let employee = Principal {
            id: "u-1".into(),
            role: Role::Employee,
        };
        assert_eq!(employee.owner_scope(), Some("u-1"));

        let manager = Principal {
            id: "u-2".into(),
            role: Role::Manager,
        };
        assert_eq!(manager.owner_scope(), None);
    }

    #[tokio::test]
    async fn test_extractor_rejects_missing_principal() {
        let (mut parts, _) = Request::new(()).into_parts();
        let err = Principal::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert_eq!(err.code, shared::ErrorCode::NotAuthenticated);

        let principal = Principal {
            id: "u-1".into(),
            role: Role::Admin,
        };
        parts.extensions.insert(principal.clone());
        let extracted = Principal::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(extracted, principal);
    }
}
