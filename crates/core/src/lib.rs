//! Domain core for the opportunities hub.
//!
//! Pure types and rules with no I/O: roles and caller identity, the
//! opportunity status machine, listing visibility, input validation, and
//! parsing of the list-filter query parameters.

pub mod error;
pub mod filters;
pub mod opportunity;
pub mod roles;
pub mod status;
pub mod types;
pub mod visibility;
