//! Repository for the `opportunity_interests` table.

use opphub_core::types::DbId;
use sqlx::PgPool;

use crate::models::interest::Interest;

const COLUMNS: &str = "id, opportunity_id, user_id, message, created_at";

/// Provides insert and list operations for expressions of interest.
pub struct InterestRepo;

impl InterestRepo {
    /// Record a user's interest in an opportunity.
    ///
    /// A second record for the same pair violates
    /// `uq_opportunity_interests_user_opportunity`.
    pub async fn create(
        pool: &PgPool,
        opportunity_id: DbId,
        user_id: &str,
        message: Option<&str>,
    ) -> Result<Interest, sqlx::Error> {
        let query = format!(
            "INSERT INTO opportunity_interests (opportunity_id, user_id, message) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Interest>(&query)
            .bind(opportunity_id)
            .bind(user_id)
            .bind(message)
            .fetch_one(pool)
            .await
    }

    /// List interests for one opportunity, newest first.
    pub async fn list_for_opportunity(
        pool: &PgPool,
        opportunity_id: DbId,
    ) -> Result<Vec<Interest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM opportunity_interests \
             WHERE opportunity_id = $1 \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Interest>(&query)
            .bind(opportunity_id)
            .fetch_all(pool)
            .await
    }
}
