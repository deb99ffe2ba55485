use shared::error::ErrorCode;
use shared::models::Location;
use shared::util::{new_id, now_secs};
use sqlx::PgPool;

use super::{RepoError, RepoResult};

pub async fn create(pool: &PgPool, name: &str) -> RepoResult<Location> {
    let location = sqlx::query_as(
        "INSERT INTO locations (id, name, created_at) VALUES ($1, $2, $3)
         RETURNING id, name, created_at",
    )
    .bind(new_id())
    .bind(name)
    .bind(now_secs())
    .fetch_one(pool)
    .await?;
    Ok(location)
}

pub async fn find_all(pool: &PgPool) -> RepoResult<Vec<Location>> {
    let locations = sqlx::query_as("SELECT id, name, created_at FROM locations ORDER BY name, id")
        .fetch_all(pool)
        .await?;
    Ok(locations)
}

pub async fn find_by_id(pool: &PgPool, id: &str) -> RepoResult<Location> {
    sqlx::query_as("SELECT id, name, created_at FROM locations WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(RepoError::NotFound(ErrorCode::LocationNotFound))
}

pub async fn rename(pool: &PgPool, id: &str, name: &str) -> RepoResult<Location> {
    sqlx::query_as(
        "UPDATE locations SET name = $1 WHERE id = $2 RETURNING id, name, created_at",
    )
    .bind(name)
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(RepoError::NotFound(ErrorCode::LocationNotFound))
}

/// Delete a location; reports filed against it go with it
pub async fn delete(pool: &PgPool, id: &str) -> RepoResult<()> {
    let result = sqlx::query("DELETE FROM locations WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound(ErrorCode::LocationNotFound));
    }
    Ok(())
}
