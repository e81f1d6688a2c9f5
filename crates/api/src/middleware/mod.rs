//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated caller from a JWT Bearer token.
//! - [`rbac::RequireAdmin`] -- Requires the `admin` role.
//! - [`rbac::RequireSeller`] -- Requires `seller` or `admin` role.
//! - [`rbac::RequireBuyer`] -- Requires `buyer` or `admin` role.

pub mod auth;
pub mod rbac;
