//! Report store
//!
//! Reads always go through the users/locations join so callers get the full
//! denormalized [`Report`]. Writes are conditional where the lifecycle
//! requires it: edits, approvals and denials only touch `pending` rows.

use std::future::Future;

use shared::error::ErrorCode;
use shared::models::{Report, ReportEmployee, ReportLocation, ReportStatus};
use shared::util::{new_id, now_secs};
use sqlx::PgPool;

use super::{RepoError, RepoResult, foreign_key_violation};

/// Joined SELECT with an appended WHERE/ORDER clause
macro_rules! report_select {
    ($tail:literal) => {
        concat!(
            "SELECT r.id, r.status, r.working_hours, r.maintenance_hours, r.created_at, \
                    u.id AS employee_id, u.first_name AS employee_first_name, \
                    u.last_name AS employee_last_name, u.email AS employee_email, \
                    l.id AS location_id, l.name AS location_name \
             FROM reports r \
             JOIN users u ON r.employee_id = u.id \
             JOIN locations l ON r.location_id = l.id ",
            $tail
        )
    };
}

#[derive(sqlx::FromRow)]
struct ReportRow {
    id: String,
    status: String,
    working_hours: i32,
    maintenance_hours: i32,
    created_at: i64,
    employee_id: String,
    employee_first_name: String,
    employee_last_name: String,
    employee_email: String,
    location_id: String,
    location_name: String,
}

impl TryFrom<ReportRow> for Report {
    type Error = RepoError;

    fn try_from(row: ReportRow) -> Result<Self, Self::Error> {
        let status = ReportStatus::from_db(&row.status).ok_or_else(|| {
            sqlx::Error::Decode(format!("unknown report status {:?}", row.status).into())
        })?;

        Ok(Report {
            id: row.id,
            employee: ReportEmployee {
                id: row.employee_id,
                first_name: row.employee_first_name,
                last_name: row.employee_last_name,
                email: row.employee_email,
            },
            location: ReportLocation {
                id: row.location_id,
                name: row.location_name,
            },
            working_hours: row.working_hours,
            maintenance_hours: row.maintenance_hours,
            status,
            created_at: row.created_at,
        })
    }
}

fn into_reports(rows: Vec<ReportRow>) -> RepoResult<Vec<Report>> {
    rows.into_iter().map(Report::try_from).collect()
}

/// Fields of a report about to be filed
#[derive(Debug, Clone)]
pub struct NewReport<'a> {
    pub employee_id: &'a str,
    pub location_id: &'a str,
    pub working_hours: i32,
    pub maintenance_hours: i32,
}

/// Editable fields of a pending report
#[derive(Debug, Clone)]
pub struct ReportChanges<'a> {
    pub location_id: &'a str,
    pub working_hours: i32,
    pub maintenance_hours: i32,
}

// ── Reference checks ──

/// Only users with the employee role can own reports
async fn employee_exists(pool: &PgPool, id: &str) -> RepoResult<bool> {
    let exists = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM users WHERE id = $1 AND role = 'employee')",
    )
    .bind(id)
    .fetch_one(pool)
    .await?;
    Ok(exists)
}

async fn location_exists(pool: &PgPool, id: &str) -> RepoResult<bool> {
    let exists = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM locations WHERE id = $1)")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(exists)
}

async fn report_exists(pool: &PgPool, id: &str) -> RepoResult<bool> {
    let exists = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM reports WHERE id = $1)")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(exists)
}

async fn require(probe: impl Future<Output = RepoResult<bool>>, code: ErrorCode) -> RepoResult<()> {
    if probe.await? {
        Ok(())
    } else {
        Err(RepoError::Business(code))
    }
}

/// Run both reference probes concurrently
///
/// Returns as soon as either probe fails; the other probe is dropped, which
/// cancels its query. Succeeds only after both probes have confirmed.
pub(crate) async fn check_references<E, L>(employee: E, location: L) -> RepoResult<()>
where
    E: Future<Output = RepoResult<bool>>,
    L: Future<Output = RepoResult<bool>>,
{
    tokio::try_join!(
        require(employee, ErrorCode::WrongEmployeeId),
        require(location, ErrorCode::WrongLocationId),
    )?;
    Ok(())
}

/// Map a write failure caused by a reference vanishing after the probes ran
fn map_write_error(err: sqlx::Error) -> RepoError {
    match foreign_key_violation(&err).as_deref() {
        Some("reports_employee_id_fkey") => RepoError::Business(ErrorCode::WrongEmployeeId),
        Some("reports_location_id_fkey") => RepoError::Business(ErrorCode::WrongLocationId),
        _ => RepoError::Database(err),
    }
}

// ── Commands ──

/// File a new pending report
///
/// Either the report is stored with valid references and returned in its
/// joined form, or nothing is stored.
pub async fn create(pool: &PgPool, new: &NewReport<'_>) -> RepoResult<Report> {
    check_references(
        employee_exists(pool, new.employee_id),
        location_exists(pool, new.location_id),
    )
    .await?;

    let mut tx = pool.begin().await?;
    let inserted: Result<String, sqlx::Error> = sqlx::query_scalar(
        "INSERT INTO reports (id, employee_id, location_id, working_hours, maintenance_hours, status, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING id",
    )
    .bind(new_id())
    .bind(new.employee_id)
    .bind(new.location_id)
    .bind(new.working_hours)
    .bind(new.maintenance_hours)
    .bind(ReportStatus::Pending.as_db())
    .bind(now_secs())
    .fetch_one(&mut *tx)
    .await;

    let id = match inserted {
        Ok(id) => id,
        Err(e) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!(error = %rollback_err, "Report insert rollback failed");
            }
            return Err(map_write_error(e));
        }
    };
    tx.commit().await?;

    tracing::debug!(report_id = %id, employee_id = %new.employee_id, "Report created");
    fetch(pool, &id).await
}

/// Edit a report that is still in `status`
///
/// With `owner` set, only that employee's report matches. A report that does
/// not exist, belongs to someone else or has left `status` all yield
/// `ReportNotFoundOrUnauthorized`.
pub async fn update(
    pool: &PgPool,
    id: &str,
    owner: Option<&str>,
    changes: &ReportChanges<'_>,
    status: ReportStatus,
) -> RepoResult<Report> {
    require(
        location_exists(pool, changes.location_id),
        ErrorCode::WrongLocationId,
    )
    .await?;

    let result = match owner {
        Some(owner_id) => {
            sqlx::query(
                "UPDATE reports SET location_id = $1, working_hours = $2, maintenance_hours = $3
                 WHERE id = $4 AND employee_id = $5 AND status = $6",
            )
            .bind(changes.location_id)
            .bind(changes.working_hours)
            .bind(changes.maintenance_hours)
            .bind(id)
            .bind(owner_id)
            .bind(status.as_db())
            .execute(pool)
            .await
        }
        None => {
            sqlx::query(
                "UPDATE reports SET location_id = $1, working_hours = $2, maintenance_hours = $3
                 WHERE id = $4 AND status = $5",
            )
            .bind(changes.location_id)
            .bind(changes.working_hours)
            .bind(changes.maintenance_hours)
            .bind(id)
            .bind(status.as_db())
            .execute(pool)
            .await
        }
    }
    .map_err(map_write_error)?;

    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound(ErrorCode::ReportNotFoundOrUnauthorized));
    }

    fetch(pool, id).await
}

pub async fn approve(pool: &PgPool, id: &str) -> RepoResult<Report> {
    transition(pool, id, ReportStatus::Approved).await
}

pub async fn deny(pool: &PgPool, id: &str) -> RepoResult<Report> {
    transition(pool, id, ReportStatus::Denied).await
}

/// Move a pending report to its final state
///
/// The `status = 'pending'` guard makes concurrent approve/deny calls race on
/// the row: exactly one wins, the loser sees `ReportNotPending`.
async fn transition(pool: &PgPool, id: &str, to: ReportStatus) -> RepoResult<Report> {
    let result = sqlx::query("UPDATE reports SET status = $1 WHERE id = $2 AND status = $3")
        .bind(to.as_db())
        .bind(id)
        .bind(ReportStatus::Pending.as_db())
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(if report_exists(pool, id).await? {
            RepoError::Business(ErrorCode::ReportNotPending)
        } else {
            RepoError::NotFound(ErrorCode::ReportNotFound)
        });
    }

    tracing::debug!(report_id = %id, status = %to, "Report status changed");
    fetch(pool, id).await
}

/// Delete a report in any state
pub async fn delete(pool: &PgPool, id: &str) -> RepoResult<()> {
    let result = sqlx::query("DELETE FROM reports WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound(ErrorCode::ReportNotFound));
    }
    Ok(())
}

// ── Queries ──

/// Re-read a report regardless of status
async fn fetch(pool: &PgPool, id: &str) -> RepoResult<Report> {
    let row: Option<ReportRow> = sqlx::query_as(report_select!("WHERE r.id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.ok_or(RepoError::NotFound(ErrorCode::ReportNotFound))?
        .try_into()
}

pub async fn find_all(pool: &PgPool, status: ReportStatus) -> RepoResult<Vec<Report>> {
    let rows: Vec<ReportRow> = sqlx::query_as(report_select!(
        "WHERE r.status = $1 ORDER BY r.created_at DESC, r.id"
    ))
    .bind(status.as_db())
    .fetch_all(pool)
    .await?;

    into_reports(rows)
}

pub async fn find_all_by_owner(
    pool: &PgPool,
    status: ReportStatus,
    employee_id: &str,
) -> RepoResult<Vec<Report>> {
    let rows: Vec<ReportRow> = sqlx::query_as(report_select!(
        "WHERE r.status = $1 AND r.employee_id = $2 ORDER BY r.created_at DESC, r.id"
    ))
    .bind(status.as_db())
    .bind(employee_id)
    .fetch_all(pool)
    .await?;

    into_reports(rows)
}

pub async fn find_by_id(pool: &PgPool, id: &str, status: ReportStatus) -> RepoResult<Report> {
    let row: Option<ReportRow> =
        sqlx::query_as(report_select!("WHERE r.id = $1 AND r.status = $2"))
            .bind(id)
            .bind(status.as_db())
            .fetch_optional(pool)
            .await?;

    row.ok_or(RepoError::NotFound(ErrorCode::ReportNotFound))?
        .try_into()
}

pub async fn find_by_id_and_owner(
    pool: &PgPool,
    id: &str,
    employee_id: &str,
    status: ReportStatus,
) -> RepoResult<Report> {
    let row: Option<ReportRow> = sqlx::query_as(report_select!(
        "WHERE r.id = $1 AND r.employee_id = $2 AND r.status = $3"
    ))
    .bind(id)
    .bind(employee_id)
    .bind(status.as_db())
    .fetch_optional(pool)
    .await?;

    row.ok_or(RepoError::NotFound(ErrorCode::ReportNotFound))?
        .try_into()
}
