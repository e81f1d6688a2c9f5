//! Authentication primitives.
//!
//! - [`jwt`] -- JWT access-token validation (and minting for tests/tooling).

pub mod jwt;
