//! Unified error codes for the report service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Report errors
//! - 4xxx: Location errors
//! - 5xxx: User errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so clients can switch on
/// them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Request body is not valid JSON for the endpoint
    InvalidRequest = 1,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid email or password
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Account has been disabled
    AccountDisabled = 1007,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,

    // ==================== 3xxx: Report ====================
    /// Report not found
    ReportNotFound = 3001,
    /// Employee reference is empty, too long or unknown
    WrongEmployeeId = 3002,
    /// Location reference is empty, too long or unknown
    WrongLocationId = 3003,
    /// Working hours out of range
    InvalidWorkingHours = 3004,
    /// Maintenance hours out of range
    InvalidMaintenanceHours = 3005,
    /// Working plus maintenance hours exceed a day
    InvalidHoursSum = 3006,
    /// Report not found, or not editable by the caller in its current state
    ReportNotFoundOrUnauthorized = 3007,
    /// Report is no longer pending
    ReportNotPending = 3008,
    /// Hours cannot be negative
    NegativeHours = 3009,

    // ==================== 4xxx: Location ====================
    /// Location not found
    LocationNotFound = 4001,
    /// Location name is empty or too long
    LocationNameInvalid = 4002,

    // ==================== 5xxx: User ====================
    /// User not found
    UserNotFound = 5001,
    /// Email already registered
    EmailTaken = 5002,
    /// Email has a wrong format
    EmailWrongFormat = 5003,
    /// Password is too short
    PasswordTooShort = 5004,
    /// First name is too short
    FirstNameTooShort = 5005,
    /// Last name is too short
    LastNameTooShort = 5006,
    /// First name is too long
    FirstNameTooLong = 5007,
    /// Last name is too long
    LastNameTooLong = 5008,
    /// Password is too long
    PasswordTooLong = 5009,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Request timed out
    TimeoutError = 9004,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::InvalidRequest => "Invalid request body",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::TokenExpired => "Token has expired",
            ErrorCode::TokenInvalid => "Token is invalid",
            ErrorCode::AccountDisabled => "Account has been disabled",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",

            // Report
            ErrorCode::ReportNotFound => "Report not found",
            ErrorCode::WrongEmployeeId => "Wrong employee id",
            ErrorCode::WrongLocationId => "Wrong location id",
            ErrorCode::InvalidWorkingHours => "Working hours must be between 0 and 16",
            ErrorCode::InvalidMaintenanceHours => {
                "Maintenance hours must be greater than 0 and at most 16"
            }
            ErrorCode::InvalidHoursSum => "Working and maintenance hours cannot exceed 16",
            ErrorCode::ReportNotFoundOrUnauthorized => "Report not found or not editable",
            ErrorCode::ReportNotPending => "Report is no longer pending",
            ErrorCode::NegativeHours => "Hours cannot be negative",

            // Location
            ErrorCode::LocationNotFound => "Location not found",
            ErrorCode::LocationNameInvalid => "Location name must be 1 to 100 characters",

            // User
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::EmailTaken => "Email is already registered",
            ErrorCode::EmailWrongFormat => "Email has a wrong format",
            ErrorCode::PasswordTooShort => "Password must be at least 8 characters",
            ErrorCode::FirstNameTooShort => "First name must be at least 2 characters",
            ErrorCode::LastNameTooShort => "Last name must be at least 2 characters",
            ErrorCode::FirstNameTooLong => "First name must be at most 50 characters",
            ErrorCode::LastNameTooLong => "Last name must be at most 50 characters",
            ErrorCode::PasswordTooLong => "Password must be at most 128 characters",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::TimeoutError => "Request timed out",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::InvalidRequest),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1007 => Ok(ErrorCode::AccountDisabled),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),

            // Report
            3001 => Ok(ErrorCode::ReportNotFound),
            3002 => Ok(ErrorCode::WrongEmployeeId),
            3003 => Ok(ErrorCode::WrongLocationId),
            3004 => Ok(ErrorCode::InvalidWorkingHours),
            3005 => Ok(ErrorCode::InvalidMaintenanceHours),
            3006 => Ok(ErrorCode::InvalidHoursSum),
            3007 => Ok(ErrorCode::ReportNotFoundOrUnauthorized),
            3008 => Ok(ErrorCode::ReportNotPending),
            3009 => Ok(ErrorCode::NegativeHours),

            // Location
            4001 => Ok(ErrorCode::LocationNotFound),
            4002 => Ok(ErrorCode::LocationNameInvalid),

            // User
            5001 => Ok(ErrorCode::UserNotFound),
            5002 => Ok(ErrorCode::EmailTaken),
            5003 => Ok(ErrorCode::EmailWrongFormat),
            5004 => Ok(ErrorCode::PasswordTooShort),
            5005 => Ok(ErrorCode::FirstNameTooShort),
            5006 => Ok(ErrorCode::LastNameTooShort),
            5007 => Ok(ErrorCode::FirstNameTooLong),
            5008 => Ok(ErrorCode::LastNameTooLong),
            5009 => Ok(ErrorCode::PasswordTooLong),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9004 => Ok(ErrorCode::TimeoutError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
