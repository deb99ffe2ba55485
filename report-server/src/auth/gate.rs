//! Role gate
//!
//! Each protected route names the roles it accepts. SuperAdmin and Admin pass
//! every gate regardless of the list, so an empty list means "privileged only".

use axum::{extract::Request, middleware::Next, response::Response};
use shared::error::AppError;
use shared::models::Role;

use super::Principal;
use crate::security_log;

pub const EMPLOYEE_OR_MANAGER: &[Role] = &[Role::Employee, Role::Manager];
pub const MANAGER: &[Role] = &[Role::Manager];
pub const PRIVILEGED_ONLY: &[Role] = &[];

/// Whether `role` may pass a gate configured with `allowed`
pub fn is_allowed(role: Role, allowed: &[Role]) -> bool {
    role.is_privileged() || allowed.contains(&role)
}

/// Check a principal against an allow-list, 403 on mismatch
pub fn authorize(principal: &Principal, allowed: &[Role]) -> Result<(), AppError> {
    if is_allowed(principal.role, allowed) {
        return Ok(());
    }

    security_log!(
        "WARN",
        "role_denied",
        user_id = principal.id.clone(),
        role = principal.role.as_db()
    );
    Err(AppError::forbidden(format!(
        "Role {} may not access this resource",
        principal.role
    )))
}

/// Route middleware enforcing an allow-list
///
/// Must sit inside `require_auth`; a request without a principal is 401.
///
/// ```ignore
/// Router::new().route(
///     "/reports/{id}/approve",
///     patch(reports::approve).route_layer(middleware::from_fn(require_role(MANAGER))),
/// );
/// ```
pub fn require_role(
    allowed: &'static [Role],
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let principal = req
                .extensions()
                .get::<Principal>()
                .ok_or_else(AppError::unauthorized)?;
            authorize(principal, allowed)?;

            Ok(next.run(req).await)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ErrorCode;

    fn principal(role: Role) -> Principal {
        Principal {
            id: "u-1".into(),
            role,
        }
    }

    #[test]
    fn test_admin_bypasses_manager_gate() {
        assert!(authorize(&principal(Role::Admin), MANAGER).is_ok());
        assert!(authorize(&principal(Role::SuperAdmin), MANAGER).is_ok());
    }

    #[test]
    fn test_employee_rejected_by_manager_gate() {
        let err = authorize(&principal(Role::Employee), MANAGER).unwrap_err();
        assert_eq!(err.code, ErrorCode::PermissionDenied);
    }

    #[test]
    fn test_empty_list_is_privileged_only() {
        assert!(is_allowed(Role::SuperAdmin, PRIVILEGED_ONLY));
        assert!(is_allowed(Role::Admin, PRIVILEGED_ONLY));
        assert!(!is_allowed(Role::Manager, PRIVILEGED_ONLY));
        assert!(!is_allowed(Role::Employee, PRIVILEGED_ONLY));
    }

    #[test]
    fn test_listed_roles_pass() {
        assert!(is_allowed(Role::Employee, EMPLOYEE_OR_MANAGER));
        assert!(is_allowed(Role::Manager, EMPLOYEE_OR_MANAGER));
        assert!(is_allowed(Role::Manager, MANAGER));
    }
}
