//! Store → API error bridge
//!
//! Business and not-found codes pass through unchanged; database failures are
//! logged here once and collapse into a generic `InternalError`.

use shared::error::{AppError, ErrorCode};

use crate::db::RepoError;

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::NotFound(code) | RepoError::Business(code) => AppError::new(code),
            RepoError::Database(db_err) => {
                tracing::error!(error = %db_err, "Store database error");
                AppError::new(ErrorCode::InternalError)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_codes_pass_through() {
        let err: AppError = RepoError::Business(ErrorCode::WrongLocationId).into();
        assert_eq!(err.code, ErrorCode::WrongLocationId);

        let err: AppError = RepoError::NotFound(ErrorCode::ReportNotFound).into();
        assert_eq!(err.code, ErrorCode::ReportNotFound);
    }

    #[test]
    fn test_database_error_is_generic() {
        let err: AppError = RepoError::Database(sqlx::Error::PoolTimedOut).into();
        assert_eq!(err.code, ErrorCode::InternalError);
        assert_eq!(err.message, "Internal server error");
    }
}
