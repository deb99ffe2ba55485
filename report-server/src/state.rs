//! Application state

use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;

use crate::BoxError;
use crate::auth::TokenService;
use crate::auth::password::hash_password;
use crate::config::Config;
use crate::db;

/// Shared application state
///
/// Constructed once in `main` and cloned into every request; the pool is the
/// only shared mutable resource.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool
    pub pool: PgPool,
    /// Session token service
    pub tokens: Arc<TokenService>,
    /// Per-request deadline
    pub request_timeout: Duration,
}

impl AppState {
    /// Connect, migrate and seed
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = db::connect(&config.database_url, config.db_max_connections).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");

        if let Some(seed) = &config.super_admin {
            let hashed = hash_password(&seed.password)?;
            db::users::ensure_super_admin(&pool, &seed.email, &hashed).await?;
        }

        Ok(Self::from_parts(
            pool,
            TokenService::new(&config.jwt_secret),
            config.request_timeout,
        ))
    }

    pub fn from_parts(pool: PgPool, tokens: TokenService, request_timeout: Duration) -> Self {
        Self {
            pool,
            tokens: Arc::new(tokens),
            request_timeout,
        }
    }
}
