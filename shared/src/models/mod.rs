//! Data models
//!
//! Shared between report-server and API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are UUID v4 strings.

pub mod location;
pub mod report;
pub mod role;
pub mod user;

// Re-exports
pub use location::*;
pub use report::*;
pub use role::*;
pub use user::*;
