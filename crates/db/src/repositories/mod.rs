//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod interest_repo;
pub mod lookup_repo;
pub mod opportunity_repo;
pub mod shortlist_repo;

pub use interest_repo::InterestRepo;
pub use lookup_repo::LookupRepo;
pub use opportunity_repo::OpportunityRepo;
pub use shortlist_repo::ShortlistRepo;
