//! User store

use shared::error::ErrorCode;
use shared::models::{Role, User};
use shared::util::{new_id, now_secs};
use sqlx::PgPool;

use super::{RepoError, RepoResult, is_unique_violation};

#[derive(sqlx::FromRow)]
pub struct UserRow {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
    pub password_hashed: String,
    pub created_at: i64,
    pub active: bool,
}

impl UserRow {
    pub fn role(&self) -> RepoResult<Role> {
        Role::from_db(&self.role).ok_or_else(|| {
            sqlx::Error::Decode(format!("unknown role {:?}", self.role).into()).into()
        })
    }

    pub fn into_user(self) -> RepoResult<User> {
        let role = self.role()?;
        Ok(User {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            role,
            active: self.active,
            created_at: self.created_at,
        })
    }
}

/// Fields of a user about to be created (password already hashed)
#[derive(Debug, Clone)]
pub struct NewUser<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub role: Role,
    pub password_hashed: &'a str,
}

pub async fn create(pool: &PgPool, new: &NewUser<'_>) -> RepoResult<User> {
    let row: UserRow = sqlx::query_as(
        "INSERT INTO users (id, first_name, last_name, email, role, password_hashed, created_at, active)
         VALUES ($1, $2, $3, $4, $5, $6, $7, TRUE)
         RETURNING *",
    )
    .bind(new_id())
    .bind(new.first_name)
    .bind(new.last_name)
    .bind(new.email)
    .bind(new.role.as_db())
    .bind(new.password_hashed)
    .bind(now_secs())
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            RepoError::Business(ErrorCode::EmailTaken)
        } else {
            RepoError::Database(e)
        }
    })?;

    row.into_user()
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> RepoResult<Option<UserRow>> {
    let row = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_id(pool: &PgPool, id: &str) -> RepoResult<User> {
    let row: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.ok_or(RepoError::NotFound(ErrorCode::UserNotFound))?
        .into_user()
}

/// Find a user holding exactly `role`; other roles read as missing
pub async fn find_with_role(pool: &PgPool, id: &str, role: Role) -> RepoResult<User> {
    let row: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE id = $1 AND role = $2")
        .bind(id)
        .bind(role.as_db())
        .fetch_optional(pool)
        .await?;

    row.ok_or(RepoError::NotFound(ErrorCode::UserNotFound))?
        .into_user()
}

pub async fn list_with_role(pool: &PgPool, role: Role) -> RepoResult<Vec<User>> {
    let rows: Vec<UserRow> = sqlx::query_as(
        "SELECT * FROM users WHERE role = $1 ORDER BY last_name, first_name, id",
    )
    .bind(role.as_db())
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(UserRow::into_user).collect()
}

pub async fn set_employee_active(pool: &PgPool, id: &str, active: bool) -> RepoResult<User> {
    let row: Option<UserRow> = sqlx::query_as(
        "UPDATE users SET active = $1 WHERE id = $2 AND role = 'employee' RETURNING *",
    )
    .bind(active)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.ok_or(RepoError::NotFound(ErrorCode::UserNotFound))?
        .into_user()
}

pub async fn rename(
    pool: &PgPool,
    id: &str,
    role: Role,
    first_name: &str,
    last_name: &str,
) -> RepoResult<User> {
    let row: Option<UserRow> = sqlx::query_as(
        "UPDATE users SET first_name = $1, last_name = $2
         WHERE id = $3 AND role = $4
         RETURNING *",
    )
    .bind(first_name)
    .bind(last_name)
    .bind(id)
    .bind(role.as_db())
    .fetch_optional(pool)
    .await?;

    row.ok_or(RepoError::NotFound(ErrorCode::UserNotFound))?
        .into_user()
}

/// Replace a password hash
///
/// With `role` set, only a user holding that role is touched.
pub async fn set_password(
    pool: &PgPool,
    id: &str,
    role: Option<Role>,
    password_hashed: &str,
) -> RepoResult<()> {
    let result = sqlx::query(
        "UPDATE users SET password_hashed = $1
         WHERE id = $2 AND ($3::TEXT IS NULL OR role = $3)",
    )
    .bind(password_hashed)
    .bind(id)
    .bind(role.as_ref().map(Role::as_db))
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound(ErrorCode::UserNotFound));
    }
    Ok(())
}

/// Delete a user holding `role`; an employee's reports go with them
pub async fn delete_with_role(pool: &PgPool, id: &str, role: Role) -> RepoResult<()> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1 AND role = $2")
        .bind(id)
        .bind(role.as_db())
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound(ErrorCode::UserNotFound));
    }
    Ok(())
}

/// Insert the bootstrap super admin unless that email is already registered
pub async fn ensure_super_admin(
    pool: &PgPool,
    email: &str,
    password_hashed: &str,
) -> RepoResult<()> {
    let result = sqlx::query(
        "INSERT INTO users (id, first_name, last_name, email, role, password_hashed, created_at, active)
         VALUES ($1, 'Super', 'Admin', $2, $3, $4, $5, TRUE)
         ON CONFLICT (email) DO NOTHING",
    )
    .bind(new_id())
    .bind(email)
    .bind(Role::SuperAdmin.as_db())
    .bind(password_hashed)
    .bind(now_secs())
    .execute(pool)
    .await?;

    if result.rows_affected() > 0 {
        tracing::info!(email = %email, "Super admin created");
    }
    Ok(())
}
