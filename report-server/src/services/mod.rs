//! Workflow handlers: field validation and orchestration over the stores

pub mod accounts;
pub mod locations;
pub mod reports;
