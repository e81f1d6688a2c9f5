//! Expression-of-interest model and DTO.

use opphub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `opportunity_interests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Interest {
    pub id: DbId,
    pub opportunity_id: DbId,
    pub user_id: String,
    pub message: Option<String>,
    pub created_at: Timestamp,
}

/// Body of `POST /live-opportunities/{id}/interest`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateInterest {
    pub message: Option<String>,
}
