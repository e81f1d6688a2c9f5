//! Row models and DTOs.
//!
//! Each submodule contains:
//! - `FromRow` + `Serialize` structs matching query projections
//! - `Deserialize` DTOs for inserts and patches

pub mod interest;
pub mod lookup;
pub mod opportunity;
pub mod shortlist;
