//! Session token service
//!
//! Issues and validates HS256-signed tokens carrying the user id, role and
//! expiry. Tokens are stateless: there is no server-side revocation list, so a
//! token stays valid until `exp` even after logout.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use shared::models::Role;
use thiserror::Error;

use super::Principal;

/// Session lifetime
pub const TOKEN_TTL_HOURS: i64 = 24;

/// Claims stored in the token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub id: String,
    /// Role name (`super_admin`, `admin`, `manager`, `employee`)
    pub role: String,
    /// Expiry (unix seconds)
    pub exp: i64,
}

/// Token errors
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("invalid signature")]
    InvalidSignature,

    #[error("invalid token: {0}")]
    Invalid(String),

    #[error("token generation failed: {0}")]
    Encode(String),
}

/// A freshly issued token and the instant it stops being valid
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Token service
///
/// Built once from the configured secret and shared through `AppState`.
pub struct TokenService {
    ttl: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        Self::with_ttl(secret, Duration::hours(TOKEN_TTL_HOURS))
    }

    pub fn with_ttl(secret: &str, ttl: Duration) -> Self {
        Self {
            ttl,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issue a token for an authenticated user
    pub fn issue(&self, user_id: &str, role: Role) -> Result<IssuedToken, TokenError> {
        let expires_at = Utc::now() + self.ttl;
        let claims = Claims {
            id: user_id.to_string(),
            role: role.as_db().to_string(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encode(e.to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Verify signature, algorithm and expiry, then return the principal
    ///
    /// Only HS256 is accepted; a token whose header names any other algorithm
    /// is rejected before its signature is checked.
    pub fn validate(&self, token: &str) -> Result<Principal, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Invalid(e.to_string()),
            }
        })?;

        let role = Role::from_db(&data.claims.role)
            .ok_or_else(|| TokenError::Invalid(format!("unknown role {}", data.claims.role)))?;

        Ok(Principal {
            id: data.claims.id,
            role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret-with-enough-length";

    #[test]
    fn test_issue_and_validate() {
        let service = TokenService::new(SECRET);
        let issued = service.issue("user-1", Role::Manager).unwrap();

        let principal = service.validate(&issued.token).unwrap();
        assert_eq!(principal.id, "user-1");
        assert_eq!(principal.role, Role::Manager);

        let remaining = issued.expires_at - Utc::now();
        assert!(remaining > Duration::hours(23));
        assert!(remaining <= Duration::hours(24));
    }

    #[test]
    fn test_rejects_other_secret() {
        let issued = TokenService::new("another-secret-entirely-different")
            .issue("user-1", Role::Admin)
            .unwrap();

        let err = TokenService::new(SECRET).validate(&issued.token).unwrap_err();
        assert!(matches!(err, TokenError::InvalidSignature));
    }

    #[test]
    fn test_rejects_other_algorithm() {
        let claims = Claims {
            id: "user-1".into(),
            role: "admin".into(),
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let err = TokenService::new(SECRET).validate(&token).unwrap_err();
        assert!(matches!(err, TokenError::Invalid(_)));
    }

    #[test]
    fn test_rejects_expired() {
        let service = TokenService::with_ttl(SECRET, Duration::seconds(-30));
        let issued = service.issue("user-1", Role::Employee).unwrap();

        let err = service.validate(&issued.token).unwrap_err();
        assert!(matches!(err, TokenError::Expired));
    }

    #[test]
    fn test_rejects_unknown_role() {
        let claims = Claims {
            id: "user-1".into(),
            role: "owner".into(),
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let err = TokenService::new(SECRET).validate(&token).unwrap_err();
        assert!(matches!(err, TokenError::Invalid(_)));
    }

    #[test]
    fn test_rejects_garbage() {
        let service = TokenService::new(SECRET);
        assert!(matches!(
            service.validate("not.a.token"),
            Err(TokenError::Invalid(_))
        ));
        assert!(matches!(service.validate(""), Err(TokenError::Invalid(_))));
    }
}
