//! Server configuration

use std::time::Duration;

use crate::BoxError;

/// Report server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,
    /// Maximum pooled connections
    pub db_max_connections: u32,
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// HMAC secret for session tokens
    pub jwt_secret: String,
    /// Per-request deadline
    pub request_timeout: Duration,
    /// Bootstrap super admin (env: SUPER_ADMIN_EMAIL / SUPER_ADMIN_PASSWORD)
    pub super_admin: Option<SuperAdminSeed>,
    /// Emit JSON log lines (env: LOG_FORMAT=json)
    pub log_json: bool,
}

/// Credentials for the bootstrap super admin
#[derive(Clone)]
pub struct SuperAdminSeed {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for SuperAdminSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuperAdminSeed")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    fn parse_or<T: std::str::FromStr>(name: &str, default: T) -> T {
        std::env::var(name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let super_admin = match (
            std::env::var("SUPER_ADMIN_EMAIL").ok().filter(|s| !s.is_empty()),
            std::env::var("SUPER_ADMIN_PASSWORD")
                .ok()
                .filter(|s| !s.is_empty()),
        ) {
            (Some(email), Some(password)) => Some(SuperAdminSeed { email, password }),
            _ => None,
        };

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?,
            db_max_connections: Self::parse_or("DB_MAX_CONNECTIONS", 10),
            http_port: Self::parse_or("HTTP_PORT", 8080),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            request_timeout: Duration::from_secs(Self::parse_or("REQUEST_TIMEOUT_SECS", 30)),
            super_admin,
            log_json: std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json")),
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_secret_dev_fallback() {
        let val = Config::require_secret("REPORT_SERVER_TEST_UNSET_SECRET", "development").unwrap();
        assert_eq!(val, "dev-REPORT_SERVER_TEST_UNSET_SECRET-not-for-production");
    }

    #[test]
    fn test_require_secret_missing_in_production() {
        let err = Config::require_secret("REPORT_SERVER_TEST_UNSET_SECRET", "production")
            .unwrap_err();
        assert!(err.to_string().contains("must be set in production"));
    }

    #[test]
    fn test_seed_debug_hides_password() {
        let seed = SuperAdminSeed {
            email: "root@example.com".into(),
            password: "hunter22hunter22".into(),
        };
        let printed = format!("{seed:?}");
        assert!(printed.contains("root@example.com"));
        assert!(!printed.contains("hunter22"));
    }
}
