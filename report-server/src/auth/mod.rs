//! Authentication and authorization
//!
//! - [`TokenService`]: issues/validates session tokens
//! - [`require_auth`]: cookie → [`Principal`] middleware
//! - [`require_role`]: per-route role allow-list

pub mod cookie;
pub mod gate;
pub mod middleware;
pub mod password;
pub mod principal;
pub mod token;

pub use gate::{EMPLOYEE_OR_MANAGER, MANAGER, PRIVILEGED_ONLY, authorize, require_role};
pub use middleware::require_auth;
pub use principal::Principal;
pub use token::{IssuedToken, TokenError, TokenService};
