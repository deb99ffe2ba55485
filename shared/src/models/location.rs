//! Location Model

use serde::{Deserialize, Serialize};

/// Location entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Location {
    pub id: String,
    pub name: String,
    /// Unix seconds
    pub created_at: i64,
}

/// Create location payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationCreate {
    pub name: String,
}

/// Update location payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationUpdate {
    pub name: String,
}
