//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::ReportNotFound
            | Self::ReportNotFoundOrUnauthorized
            | Self::LocationNotFound
            | Self::UserNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::EmailTaken | Self::ReportNotPending => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid
            | Self::AccountDisabled => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            Self::PermissionDenied => StatusCode::FORBIDDEN,

            // 400 Bad Request
            Self::InvalidRequest
            | Self::WrongEmployeeId
            | Self::WrongLocationId
            | Self::InvalidWorkingHours
            | Self::InvalidMaintenanceHours
            | Self::InvalidHoursSum
            | Self::NegativeHours
            | Self::LocationNameInvalid
            | Self::EmailWrongFormat
            | Self::PasswordTooShort
            | Self::FirstNameTooShort
            | Self::LastNameTooShort
            | Self::FirstNameTooLong
            | Self::LastNameTooLong
            | Self::PasswordTooLong => StatusCode::BAD_REQUEST,

            // 408 Request Timeout
            Self::TimeoutError => StatusCode::REQUEST_TIMEOUT,

            // 500 Internal Server Error
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
