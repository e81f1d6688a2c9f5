//! Shortlist entry model.

use opphub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `shortlists` table. Unique per `(user_id, opportunity_id)`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Shortlist {
    pub id: DbId,
    pub user_id: String,
    pub opportunity_id: DbId,
    pub created_at: Timestamp,
}
