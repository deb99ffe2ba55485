//! Report lifecycle against a real PostgreSQL
//!
//! Run with `DATABASE_URL` pointing at a server the test user may create
//! databases on: `cargo test -- --ignored`.

use report_server::auth::Principal;
use report_server::db::users::NewUser;
use report_server::db::{RepoError, locations, reports, users};
use report_server::services::reports as workflow;
use shared::error::ErrorCode;
use shared::models::{ReportCreate, ReportStatus, ReportUpdate, Role, User};
use sqlx::PgPool;

async fn seed_user(pool: &PgPool, email: &str, role: Role) -> User {
    users::create(
        pool,
        &NewUser {
            first_name: "Ana",
            last_name: "Lima",
            email,
            role,
            password_hashed: "not-a-real-hash",
        },
    )
    .await
    .unwrap()
}

fn as_principal(user: &User) -> Principal {
    Principal {
        id: user.id.clone(),
        role: user.role,
    }
}

fn new_report(location_id: &str, working: i32, maintenance: i32) -> ReportCreate {
    ReportCreate {
        employee_id: None,
        location_id: location_id.to_string(),
        working_hours: working,
        maintenance_hours: maintenance,
    }
}

async fn report_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM reports")
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn create_returns_joined_view(pool: PgPool) {
    let employee = seed_user(&pool, "ana@example.com", Role::Employee).await;
    let site = locations::create(&pool, "North Yard").await.unwrap();

    let report = workflow::create_report(&pool, &as_principal(&employee), &new_report(&site.id, 7, 4))
        .await
        .unwrap();

    assert_eq!(report.status, ReportStatus::Pending);
    assert_eq!(report.employee.id, employee.id);
    assert_eq!(report.employee.email, "ana@example.com");
    assert_eq!(report.location.name, "North Yard");
    assert_eq!((report.working_hours, report.maintenance_hours), (7, 4));

    let pending = workflow::list_reports(&pool, &as_principal(&employee), ReportStatus::Pending)
        .await
        .unwrap();
    assert_eq!(pending, vec![report]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn invalid_hours_leave_no_row(pool: PgPool) {
    let employee = seed_user(&pool, "ana@example.com", Role::Employee).await;
    let site = locations::create(&pool, "North Yard").await.unwrap();

    let err = workflow::create_report(&pool, &as_principal(&employee), &new_report(&site.id, 10, 7))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::InvalidHoursSum);
    assert_eq!(report_count(&pool).await, 0);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn unknown_references_are_rejected(pool: PgPool) {
    let employee = seed_user(&pool, "ana@example.com", Role::Employee).await;
    let manager = seed_user(&pool, "mia@example.com", Role::Manager).await;
    let site = locations::create(&pool, "North Yard").await.unwrap();

    let err = workflow::create_report(&pool, &as_principal(&employee), &new_report("loc-missing", 7, 4))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::WrongLocationId);

    let mut for_manager = new_report(&site.id, 7, 4);
    for_manager.employee_id = Some(manager.id.clone());
    let err = workflow::create_report(&pool, &as_principal(&manager), &for_manager)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::WrongEmployeeId);

    assert_eq!(report_count(&pool).await, 0);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn concurrent_creates_against_deleted_location(pool: PgPool) {
    let employee = seed_user(&pool, "ana@example.com", Role::Employee).await;
    let site = locations::create(&pool, "North Yard").await.unwrap();
    locations::delete(&pool, &site.id).await.unwrap();

    let principal = as_principal(&employee);
    let req = new_report(&site.id, 7, 4);
    let (a, b) = tokio::join!(
        workflow::create_report(&pool, &principal, &req),
        workflow::create_report(&pool, &principal, &req),
    );

    assert_eq!(a.unwrap_err().code, ErrorCode::WrongLocationId);
    assert_eq!(b.unwrap_err().code, ErrorCode::WrongLocationId);
    assert_eq!(report_count(&pool).await, 0);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn approved_report_moves_between_views(pool: PgPool) {
    let employee = seed_user(&pool, "ana@example.com", Role::Employee).await;
    let manager = seed_user(&pool, "mia@example.com", Role::Manager).await;
    let site = locations::create(&pool, "North Yard").await.unwrap();
    let owner = as_principal(&employee);

    let report = workflow::create_report(&pool, &owner, &new_report(&site.id, 7, 4))
        .await
        .unwrap();
    let approved = workflow::approve_report(&pool, &as_principal(&manager), &report.id)
        .await
        .unwrap();
    assert_eq!(approved.status, ReportStatus::Approved);

    let err = workflow::get_report(&pool, &owner, &report.id, ReportStatus::Pending)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ReportNotFound);

    let fetched = workflow::get_report(&pool, &owner, &report.id, ReportStatus::Approved)
        .await
        .unwrap();
    assert_eq!(fetched.id, report.id);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn second_decision_is_rejected(pool: PgPool) {
    let employee = seed_user(&pool, "ana@example.com", Role::Employee).await;
    let manager = as_principal(&seed_user(&pool, "mia@example.com", Role::Manager).await);
    let site = locations::create(&pool, "North Yard").await.unwrap();

    let report = workflow::create_report(&pool, &as_principal(&employee), &new_report(&site.id, 7, 4))
        .await
        .unwrap();
    workflow::approve_report(&pool, &manager, &report.id).await.unwrap();

    let err = workflow::deny_report(&pool, &manager, &report.id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ReportNotPending);

    let err = workflow::approve_report(&pool, &manager, "no-such-report")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ReportNotFound);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn racing_decisions_settle_once(pool: PgPool) {
    let employee = seed_user(&pool, "ana@example.com", Role::Employee).await;
    let site = locations::create(&pool, "North Yard").await.unwrap();
    let owner = as_principal(&employee);

    for _ in 0..5 {
        let report = workflow::create_report(&pool, &owner, &new_report(&site.id, 7, 4))
            .await
            .unwrap();

        let (approved, denied) =
            tokio::join!(reports::approve(&pool, &report.id), reports::deny(&pool, &report.id));

        let (winner, loser) = match (approved, denied) {
            (Ok(report), Err(err)) => {
                assert_eq!(report.status, ReportStatus::Approved);
                (report, err)
            }
            (Err(err), Ok(report)) => {
                assert_eq!(report.status, ReportStatus::Denied);
                (report, err)
            }
            (Ok(_), Ok(_)) => panic!("both decisions applied to {}", report.id),
            (Err(_), Err(_)) => panic!("neither decision applied to {}", report.id),
        };
        assert!(matches!(
            loser,
            RepoError::Business(ErrorCode::ReportNotPending)
        ));

        let stored = reports::find_by_id(&pool, &report.id, winner.status)
            .await
            .unwrap();
        assert_eq!(stored.status, winner.status);
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn foreign_update_looks_like_missing_report(pool: PgPool) {
    let ana = seed_user(&pool, "ana@example.com", Role::Employee).await;
    let ben = seed_user(&pool, "ben@example.com", Role::Employee).await;
    let site = locations::create(&pool, "North Yard").await.unwrap();

    let report = workflow::create_report(&pool, &as_principal(&ana), &new_report(&site.id, 7, 4))
        .await
        .unwrap();

    let changes = ReportUpdate {
        location_id: site.id.clone(),
        working_hours: 8,
        maintenance_hours: 2,
    };
    let foreign = workflow::update_pending_report(&pool, &as_principal(&ben), &report.id, &changes)
        .await
        .unwrap_err();
    let missing = workflow::update_pending_report(&pool, &as_principal(&ben), "no-such-report", &changes)
        .await
        .unwrap_err();
    assert_eq!(foreign.code, ErrorCode::ReportNotFoundOrUnauthorized);
    assert_eq!(foreign.code, missing.code);

    let updated = workflow::update_pending_report(&pool, &as_principal(&ana), &report.id, &changes)
        .await
        .unwrap();
    assert_eq!((updated.working_hours, updated.maintenance_hours), (8, 2));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn delete_and_cascade(pool: PgPool) {
    let employee = seed_user(&pool, "ana@example.com", Role::Employee).await;
    let site = locations::create(&pool, "North Yard").await.unwrap();
    let owner = as_principal(&employee);

    let first = workflow::create_report(&pool, &owner, &new_report(&site.id, 7, 4))
        .await
        .unwrap();
    workflow::create_report(&pool, &owner, &new_report(&site.id, 2, 2))
        .await
        .unwrap();

    reports::delete(&pool, &first.id).await.unwrap();
    assert!(matches!(
        reports::delete(&pool, &first.id).await,
        Err(RepoError::NotFound(ErrorCode::ReportNotFound))
    ));

    locations::delete(&pool, &site.id).await.unwrap();
    assert_eq!(report_count(&pool).await, 0);
}
