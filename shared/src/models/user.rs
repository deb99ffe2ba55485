//! User Model

use serde::{Deserialize, Serialize};

use super::Role;

/// User response (without password hash)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    pub active: bool,
    /// Unix seconds
    pub created_at: i64,
}

/// Create employee / admin payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountCreate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Toggle employee status payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeStatusUpdate {
    pub active: bool,
}

/// Rename admin payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameUpdate {
    pub first_name: String,
    pub last_name: String,
}

/// Change password payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordUpdate {
    pub password: String,
}
