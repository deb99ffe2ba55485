//! API routes
//!
//! Public: `/health`, `/login`, `/logout`. Everything else sits behind
//! `require_auth` and a per-route role gate.

pub mod admins;
pub mod auth;
pub mod employees;
mod extract;
pub mod health;
pub mod locations;
pub mod reports;

use axum::error_handling::HandleErrorLayer;
use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, patch, post, put};
use axum::{Router, middleware};
use shared::error::{AppError, ErrorCode};
use tower::ServiceBuilder;
use tower::timeout::TimeoutLayer;
use tower::timeout::error::Elapsed;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

use crate::BoxError;
use crate::auth::{EMPLOYEE_OR_MANAGER, MANAGER, PRIVILEGED_ONLY, require_auth, require_role};
use crate::middleware::logging_middleware;
use crate::state::AppState;

pub use extract::Json;

pub type ApiResult<T> = Result<Json<T>, AppError>;

const MAX_BODY_BYTES: usize = 64 * 1024;

/// Attach a role gate to a single method route
macro_rules! gated {
    ($method:ident($handler:path), $roles:expr) => {
        $method($handler).route_layer(middleware::from_fn(require_role($roles)))
    };
}

fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/reports", gated!(post(reports::create), EMPLOYEE_OR_MANAGER))
        .route("/reports", gated!(get(reports::list_approved), EMPLOYEE_OR_MANAGER))
        .route("/reports/pending", gated!(get(reports::list_pending), EMPLOYEE_OR_MANAGER))
        .route(
            "/reports/pending/{id}",
            gated!(get(reports::get_pending), EMPLOYEE_OR_MANAGER),
        )
        .route(
            "/reports/pending/{id}",
            gated!(put(reports::update_pending), EMPLOYEE_OR_MANAGER),
        )
        .route("/reports/denied", gated!(get(reports::list_denied), EMPLOYEE_OR_MANAGER))
        .route(
            "/reports/denied/{id}",
            gated!(get(reports::get_denied), EMPLOYEE_OR_MANAGER),
        )
        .route("/reports/{id}", gated!(get(reports::get_approved), EMPLOYEE_OR_MANAGER))
        .route("/reports/{id}", gated!(delete(reports::delete), PRIVILEGED_ONLY))
        .route("/reports/{id}/approve", gated!(patch(reports::approve), MANAGER))
        .route("/reports/{id}/deny", gated!(patch(reports::deny), MANAGER))
}

fn location_routes() -> Router<AppState> {
    Router::new()
        .route("/locations", gated!(post(locations::create), MANAGER))
        .route("/locations", gated!(get(locations::list), EMPLOYEE_OR_MANAGER))
        .route("/locations/{id}", gated!(get(locations::get), EMPLOYEE_OR_MANAGER))
        .route("/locations/{id}", gated!(put(locations::rename), MANAGER))
        .route("/locations/{id}", gated!(delete(locations::delete), PRIVILEGED_ONLY))
}

fn employee_routes() -> Router<AppState> {
    Router::new()
        .route("/employees", gated!(post(employees::create), MANAGER))
        .route("/employees", gated!(get(employees::list), MANAGER))
        .route("/employees/{id}", gated!(get(employees::get), MANAGER))
        .route("/employees/{id}", gated!(delete(employees::delete), PRIVILEGED_ONLY))
        .route(
            "/employees/{id}/status",
            gated!(patch(employees::set_status), MANAGER),
        )
        .route(
            "/employees/password",
            gated!(patch(employees::change_own_password), EMPLOYEE_OR_MANAGER),
        )
        .route(
            "/employees/password/{id}",
            gated!(patch(employees::reset_password), MANAGER),
        )
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admins", gated!(post(admins::create), PRIVILEGED_ONLY))
        .route("/admins", gated!(get(admins::list), PRIVILEGED_ONLY))
        .route("/admins/{id}", gated!(get(admins::get), PRIVILEGED_ONLY))
        .route("/admins/{id}", gated!(put(admins::rename), PRIVILEGED_ONLY))
        .route("/admins/{id}", gated!(delete(admins::delete), PRIVILEGED_ONLY))
}

/// Map a failed `TimeoutLayer` call onto the API error shape
async fn handle_timeout(err: BoxError) -> AppError {
    if err.is::<Elapsed>() {
        AppError::new(ErrorCode::TimeoutError)
    } else {
        tracing::error!("Unhandled middleware error: {err}");
        AppError::new(ErrorCode::InternalError)
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/me", get(auth::me))
        .merge(report_routes())
        .merge(location_routes())
        .merge(employee_routes())
        .merge(admin_routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let public = Router::new()
        .route("/health", get(health::health_check))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_timeout))
                .layer(TimeoutLayer::new(state.request_timeout)),
        )
        .layer(middleware::from_fn(logging_middleware))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}
