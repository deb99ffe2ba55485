//! report-server: employee hour reports behind a manager approval workflow
//!
//! Layers, outermost first:
//! - `api`: axum routes, session cookie handling
//! - `auth`: token service, principal extraction, role gate
//! - `services`: workflow handlers owning field validation
//! - `db`: PostgreSQL stores (reports, users, locations)

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

pub use config::Config;
pub use state::AppState;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Security event log on the `security` tracing target
#[macro_export]
macro_rules! security_log {
    ("WARN", $event:expr, $($key:ident = $value:expr),*) => {
        tracing::warn!(
            target: "security",
            event = $event,
            $($key = $value),*
        );
    };
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}
