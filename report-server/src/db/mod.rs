//! PostgreSQL access layer
//!
//! Free functions taking `&PgPool`, one module per table. Every call is an
//! ordinary future: dropping the calling request drops the in-flight query.

pub mod locations;
pub mod reports;
pub mod users;

use std::time::Duration;

use shared::error::ErrorCode;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

/// Store error types
#[derive(Debug, Error)]
pub enum RepoError {
    /// The addressed row does not exist (in the requested state)
    #[error("Not found: {0}")]
    NotFound(ErrorCode),

    /// A business rule rejected the operation
    #[error("Rejected: {0}")]
    Business(ErrorCode),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result type for store operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Open the connection pool
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}

/// Name of the violated foreign-key constraint, if `err` is one
pub(crate) fn foreign_key_violation(err: &sqlx::Error) -> Option<String> {
    let db_err = err.as_database_error()?;
    if !db_err.is_foreign_key_violation() {
        return None;
    }
    db_err.constraint().map(str::to_string)
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}
