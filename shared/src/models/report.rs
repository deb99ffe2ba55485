//! Report Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Report lifecycle status
///
/// `Pending` is the only state a report can be edited, approved or denied in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Pending,
    Approved,
    Denied,
}

impl ReportStatus {
    /// Parse from database string value
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "denied" => Some(Self::Denied),
            _ => None,
        }
    }

    /// Database string representation
    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Denied => "denied",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_db())
    }
}

/// Employee fields embedded in a report view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEmployee {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Location fields embedded in a report view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLocation {
    pub id: String,
    pub name: String,
}

/// Denormalized report view (joined with its employee and location)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    pub employee: ReportEmployee,
    pub location: ReportLocation,
    pub working_hours: i32,
    pub maintenance_hours: i32,
    pub status: ReportStatus,
    /// Unix seconds
    pub created_at: i64,
}

/// Create report payload
///
/// `employee_id` may be omitted by employees filing for themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportCreate {
    #[serde(default)]
    pub employee_id: Option<String>,
    pub location_id: String,
    pub working_hours: i32,
    pub maintenance_hours: i32,
}

/// Update pending report payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportUpdate {
    pub location_id: String,
    pub working_hours: i32,
    pub maintenance_hours: i32,
}
