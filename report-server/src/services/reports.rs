//! Report workflow handlers
//!
//! Validate request fields, resolve who the report belongs to, then hand off
//! to the report store. Employees are always routed through the owner-scoped
//! store variants.

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Report, ReportCreate, ReportStatus, ReportUpdate, Role};
use sqlx::PgPool;

use crate::auth::Principal;
use crate::db::reports::{self, NewReport, ReportChanges};

/// Maximum hours on one report
pub const MAX_DAILY_HOURS: i32 = 16;

/// Maximum length of an entity id
const MAX_ID_LEN: usize = 50;

fn check_reference(id: &str, code: ErrorCode) -> AppResult<()> {
    if id.is_empty() || id.len() >= MAX_ID_LEN {
        return Err(AppError::new(code).with_detail("id", id));
    }
    Ok(())
}

/// Hour invariants shared by create and update
///
/// - `0 <= working <= 16`
/// - `0 < maintenance <= 16`
/// - `working + maintenance <= 16`
pub fn validate_hours(working_hours: i32, maintenance_hours: i32) -> AppResult<()> {
    if working_hours < 0 || maintenance_hours < 0 {
        return Err(AppError::new(ErrorCode::NegativeHours));
    }
    if working_hours > MAX_DAILY_HOURS {
        return Err(AppError::new(ErrorCode::InvalidWorkingHours));
    }
    if maintenance_hours == 0 || maintenance_hours > MAX_DAILY_HOURS {
        return Err(AppError::new(ErrorCode::InvalidMaintenanceHours));
    }
    if working_hours + maintenance_hours > MAX_DAILY_HOURS {
        return Err(AppError::new(ErrorCode::InvalidHoursSum)
            .with_detail("sum", working_hours + maintenance_hours));
    }
    Ok(())
}

/// Decide whose report is being filed
///
/// Employees file for themselves; naming anyone else is forbidden. Every other
/// role must name the employee.
fn resolve_employee<'a>(principal: &'a Principal, requested: Option<&'a str>) -> AppResult<&'a str> {
    match (principal.role, requested) {
        (Role::Employee, None) => Ok(&principal.id),
        (Role::Employee, Some(id)) if id == principal.id => Ok(id),
        (Role::Employee, Some(_)) => Err(AppError::forbidden(
            "Employees can only file reports for themselves",
        )),
        (_, Some(id)) => Ok(id),
        (_, None) => Err(AppError::new(ErrorCode::WrongEmployeeId)),
    }
}

pub async fn create_report(
    pool: &PgPool,
    principal: &Principal,
    req: &ReportCreate,
) -> AppResult<Report> {
    let employee_id = resolve_employee(principal, req.employee_id.as_deref())?;
    check_reference(employee_id, ErrorCode::WrongEmployeeId)?;
    check_reference(&req.location_id, ErrorCode::WrongLocationId)?;
    validate_hours(req.working_hours, req.maintenance_hours)?;

    let report = reports::create(
        pool,
        &NewReport {
            employee_id,
            location_id: &req.location_id,
            working_hours: req.working_hours,
            maintenance_hours: req.maintenance_hours,
        },
    )
    .await?;

    tracing::info!(
        report_id = %report.id,
        employee_id = %employee_id,
        filed_by = %principal.id,
        "Report filed"
    );
    Ok(report)
}

pub async fn list_reports(
    pool: &PgPool,
    principal: &Principal,
    status: ReportStatus,
) -> AppResult<Vec<Report>> {
    let reports = match principal.owner_scope() {
        Some(owner) => reports::find_all_by_owner(pool, status, owner).await?,
        None => reports::find_all(pool, status).await?,
    };
    Ok(reports)
}

pub async fn get_report(
    pool: &PgPool,
    principal: &Principal,
    id: &str,
    status: ReportStatus,
) -> AppResult<Report> {
    let report = match principal.owner_scope() {
        Some(owner) => reports::find_by_id_and_owner(pool, id, owner, status).await?,
        None => reports::find_by_id(pool, id, status).await?,
    };
    Ok(report)
}

/// Edit a pending report
pub async fn update_pending_report(
    pool: &PgPool,
    principal: &Principal,
    id: &str,
    req: &ReportUpdate,
) -> AppResult<Report> {
    check_reference(&req.location_id, ErrorCode::WrongLocationId)?;
    validate_hours(req.working_hours, req.maintenance_hours)?;

    let report = reports::update(
        pool,
        id,
        principal.owner_scope(),
        &ReportChanges {
            location_id: &req.location_id,
            working_hours: req.working_hours,
            maintenance_hours: req.maintenance_hours,
        },
        ReportStatus::Pending,
    )
    .await?;

    tracing::info!(report_id = %id, edited_by = %principal.id, "Report edited");
    Ok(report)
}

pub async fn approve_report(pool: &PgPool, principal: &Principal, id: &str) -> AppResult<Report> {
    let report = reports::approve(pool, id).await?;
    tracing::info!(report_id = %id, approved_by = %principal.id, "Report approved");
    Ok(report)
}

pub async fn deny_report(pool: &PgPool, principal: &Principal, id: &str) -> AppResult<Report> {
    let report = reports::deny(pool, id).await?;
    tracing::info!(report_id = %id, denied_by = %principal.id, "Report denied");
    Ok(report)
}

pub async fn delete_report(pool: &PgPool, principal: &Principal, id: &str) -> AppResult<()> {
    reports::delete(pool, id).await?;
    tracing::info!(report_id = %id, deleted_by = %principal.id, "Report deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(id: &str, role: Role) -> Principal {
        Principal {
            id: id.into(),
            role,
        }
    }

    fn code(result: AppResult<()>) -> ErrorCode {
        result.unwrap_err().code
    }

    #[test]
    fn test_valid_hours() {
        assert!(validate_hours(7, 4).is_ok());
        assert!(validate_hours(0, 16).is_ok());
        assert!(validate_hours(15, 1).is_ok());
    }

    #[test]
    fn test_invalid_hours() {
        assert_eq!(code(validate_hours(-1, 4)), ErrorCode::NegativeHours);
        assert_eq!(code(validate_hours(4, -1)), ErrorCode::NegativeHours);
        assert_eq!(code(validate_hours(17, 1)), ErrorCode::InvalidWorkingHours);
        assert_eq!(code(validate_hours(4, 0)), ErrorCode::InvalidMaintenanceHours);
        assert_eq!(code(validate_hours(0, 17)), ErrorCode::InvalidMaintenanceHours);
        assert_eq!(code(validate_hours(10, 7)), ErrorCode::InvalidHoursSum);
        assert_eq!(code(validate_hours(16, 1)), ErrorCode::InvalidHoursSum);
    }

    #[test]
    fn test_reference_length() {
        assert!(check_reference("loc-1", ErrorCode::WrongLocationId).is_ok());
        assert_eq!(
            code(check_reference("", ErrorCode::WrongLocationId)),
            ErrorCode::WrongLocationId
        );
        let long = "x".repeat(MAX_ID_LEN);
        assert_eq!(
            code(check_reference(&long, ErrorCode::WrongEmployeeId)),
            ErrorCode::WrongEmployeeId
        );
        assert!(check_reference(&"x".repeat(MAX_ID_LEN - 1), ErrorCode::WrongEmployeeId).is_ok());
    }

    #[test]
    fn test_employee_files_for_self() {
        let me = principal("u-1", Role::Employee);
        assert_eq!(resolve_employee(&me, None).unwrap(), "u-1");
        assert_eq!(resolve_employee(&me, Some("u-1")).unwrap(), "u-1");

        let err = resolve_employee(&me, Some("u-2")).unwrap_err();
        assert_eq!(err.code, ErrorCode::PermissionDenied);
    }

    #[test]
    fn test_manager_must_name_employee() {
        let manager = principal("m-1", Role::Manager);
        assert_eq!(resolve_employee(&manager, Some("u-7")).unwrap(), "u-7");

        let err = resolve_employee(&manager, None).unwrap_err();
        assert_eq!(err.code, ErrorCode::WrongEmployeeId);
    }
}
