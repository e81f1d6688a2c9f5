//! Domain errors shared by the store and HTTP layers.

use crate::status::OpportunityStatus;
use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The record is missing or the caller may not see it.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Caller input broke a submission rule.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A lifecycle step the status machine does not allow.
    #[error("Cannot move opportunity from '{from}' to '{to}'")]
    InvalidTransition {
        from: OpportunityStatus,
        to: OpportunityStatus,
    },

    /// The row changed underneath the request, or a uniqueness rule was hit.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Stored data the domain cannot interpret.
    #[error("Internal error: {0}")]
    Internal(String),
}
