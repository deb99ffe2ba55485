//! Login and employee account handling

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{AccountCreate, Role, User};
use sqlx::PgPool;
use validator::ValidateEmail;

use crate::auth::password::{DUMMY_HASH, hash_password, verify_password};
use crate::db::users::{self, NewUser};
use crate::security_log;

const MIN_NAME_LEN: usize = 2;
/// Width of the `first_name` / `last_name` columns
const MAX_NAME_LEN: usize = 50;
const MIN_PASSWORD_LEN: usize = 8;
const MAX_PASSWORD_LEN: usize = 128;
/// RFC 5321 path limit
const MAX_EMAIL_LEN: usize = 254;

/// Lowercase and check an email address (`local@domain.tld`)
pub fn normalize_email(email: &str) -> AppResult<String> {
    let email = email.trim().to_lowercase();
    if email.len() > MAX_EMAIL_LEN {
        return Err(AppError::new(ErrorCode::EmailWrongFormat));
    }
    let has_tld = email
        .rsplit_once('@')
        .is_some_and(|(_, domain)| domain.contains('.'));
    if !email.validate_email() || !has_tld {
        return Err(AppError::new(ErrorCode::EmailWrongFormat));
    }
    Ok(email)
}

/// Trim and bound-check a first/last name pair
pub fn validate_names<'a>(
    first_name: &'a str,
    last_name: &'a str,
) -> AppResult<(&'a str, &'a str)> {
    let first_name = first_name.trim();
    let last_name = last_name.trim();
    match first_name.chars().count() {
        n if n < MIN_NAME_LEN => return Err(AppError::new(ErrorCode::FirstNameTooShort)),
        n if n > MAX_NAME_LEN => return Err(AppError::new(ErrorCode::FirstNameTooLong)),
        _ => {}
    }
    match last_name.chars().count() {
        n if n < MIN_NAME_LEN => return Err(AppError::new(ErrorCode::LastNameTooShort)),
        n if n > MAX_NAME_LEN => return Err(AppError::new(ErrorCode::LastNameTooLong)),
        _ => {}
    }
    Ok((first_name, last_name))
}

pub fn validate_password(password: &str) -> AppResult<()> {
    match password.chars().count() {
        n if n < MIN_PASSWORD_LEN => Err(AppError::new(ErrorCode::PasswordTooShort)),
        n if n > MAX_PASSWORD_LEN => Err(AppError::new(ErrorCode::PasswordTooLong)),
        _ => Ok(()),
    }
}

/// Run a CPU-heavy password operation off the async runtime
async fn blocking<T: Send + 'static>(f: impl FnOnce() -> T + Send + 'static) -> AppResult<T> {
    tokio::task::spawn_blocking(f).await.map_err(|e| {
        tracing::error!("spawn_blocking join error: {e}");
        AppError::new(ErrorCode::InternalError)
    })
}

/// Check credentials and return the user
///
/// Unknown email and wrong password are indistinguishable to the caller.
pub async fn authenticate(pool: &PgPool, email: &str, password: &str) -> AppResult<User> {
    let email = normalize_email(email)?;

    let password = password.to_string();
    let Some(row) = users::find_by_email(pool, &email).await? else {
        // Unknown emails pay for one Argon2 verification too
        blocking(move || verify_password(&password, DUMMY_HASH)).await?;
        security_log!("WARN", "login_unknown_email", email = email);
        return Err(AppError::invalid_credentials());
    };

    let stored = row.password_hashed.clone();
    if !blocking(move || verify_password(&password, &stored)).await? {
        security_log!("WARN", "login_bad_password", user_id = row.id.clone());
        return Err(AppError::invalid_credentials());
    }

    if !row.active {
        security_log!("WARN", "login_inactive", user_id = row.id.clone());
        return Err(AppError::new(ErrorCode::AccountDisabled));
    }

    Ok(row.into_user()?)
}

async fn hash(password: &str) -> AppResult<String> {
    let password = password.to_string();
    blocking(move || hash_password(&password)).await?.map_err(|e| {
        tracing::error!("Password hashing failed: {e}");
        AppError::new(ErrorCode::InternalError)
    })
}

/// Validate and insert an employee or admin account
pub async fn create_account(pool: &PgPool, req: &AccountCreate, role: Role) -> AppResult<User> {
    let (first_name, last_name) = validate_names(&req.first_name, &req.last_name)?;
    let email = normalize_email(&req.email)?;
    validate_password(&req.password)?;

    let password_hashed = hash(&req.password).await?;
    let user = users::create(
        pool,
        &NewUser {
            first_name,
            last_name,
            email: &email,
            role,
            password_hashed: &password_hashed,
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, role = %role, "Account created");
    Ok(user)
}

pub async fn rename_account(
    pool: &PgPool,
    id: &str,
    role: Role,
    first_name: &str,
    last_name: &str,
) -> AppResult<User> {
    let (first_name, last_name) = validate_names(first_name, last_name)?;
    Ok(users::rename(pool, id, role, first_name, last_name).await?)
}

/// Re-hash and store a new password
///
/// `role` restricts which accounts `id` may name; `None` for a user's own
/// password.
pub async fn change_password(
    pool: &PgPool,
    id: &str,
    role: Option<Role>,
    password: &str,
) -> AppResult<()> {
    validate_password(password)?;
    let password_hashed = hash(password).await?;
    users::set_password(pool, id, role, &password_hashed).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(
            normalize_email("  Ana.Lima@Example.COM ").unwrap(),
            "ana.lima@example.com"
        );
    }

    #[test]
    fn test_reject_overlong_email() {
        let email = format!("{}@example.com", "a".repeat(250));
        let err = normalize_email(&email).unwrap_err();
        assert_eq!(err.code, ErrorCode::EmailWrongFormat);
    }

    #[test]
    fn test_validate_names_trims() {
        assert_eq!(validate_names("  Ana ", "Lima\n").unwrap(), ("Ana", "Lima"));
    }

    #[test]
    fn test_validate_names_bounds() {
        let long = "x".repeat(MAX_NAME_LEN + 1);
        let max = "x".repeat(MAX_NAME_LEN);

        assert!(validate_names(&max, &max).is_ok());
        for (first, last, code) in [
            ("A", "Lima", ErrorCode::FirstNameTooShort),
            ("Ana", " L ", ErrorCode::LastNameTooShort),
            (long.as_str(), "Lima", ErrorCode::FirstNameTooLong),
            ("Ana", long.as_str(), ErrorCode::LastNameTooLong),
        ] {
            assert_eq!(validate_names(first, last).unwrap_err().code, code, "{first}/{last}");
        }
    }

    #[test]
    fn test_name_limit_counts_chars_not_bytes() {
        // 50 two-byte characters still fit a VARCHAR(50)
        let name = "é".repeat(MAX_NAME_LEN);
        assert!(validate_names(&name, "Lima").is_ok());
    }

    #[test]
    fn test_validate_password_bounds() {
        assert_eq!(
            validate_password("short").unwrap_err().code,
            ErrorCode::PasswordTooShort
        );
        assert_eq!(
            validate_password(&"p".repeat(MAX_PASSWORD_LEN + 1)).unwrap_err().code,
            ErrorCode::PasswordTooLong
        );
        assert!(validate_password("eight ch").is_ok());
    }

    #[test]
    fn test_reject_malformed_email() {
        for bad in ["", "ana", "ana@", "@example.com", "ana@localhost", "a b@example.com"] {
            let err = normalize_email(bad).unwrap_err();
            assert_eq!(err.code, ErrorCode::EmailWrongFormat, "{bad}");
        }
    }
}
