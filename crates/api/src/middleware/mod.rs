//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a Bearer token.
//! - [`rbac::RequireAdmin`] -- Requires a user with the admin flag set.

pub mod auth;
pub mod rbac;
