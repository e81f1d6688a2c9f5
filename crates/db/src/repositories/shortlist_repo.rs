//! Repository for the `shortlists` table.

use opphub_core::types::DbId;
use sqlx::PgPool;

use crate::models::shortlist::Shortlist;

const COLUMNS: &str = "id, user_id, opportunity_id, created_at";

/// Provides add/remove operations for per-user shortlists.
pub struct ShortlistRepo;

impl ShortlistRepo {
    /// Shortlist an opportunity for a user.
    ///
    /// Idempotent: an existing entry is returned unchanged. The no-op update
    /// makes `RETURNING` yield the row even when a concurrent add committed
    /// it first.
    pub async fn add(
        pool: &PgPool,
        user_id: &str,
        opportunity_id: DbId,
    ) -> Result<Shortlist, sqlx::Error> {
        let query = format!(
            "INSERT INTO shortlists (user_id, opportunity_id) VALUES ($1, $2) \
             ON CONFLICT (user_id, opportunity_id) DO UPDATE SET user_id = EXCLUDED.user_id \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Shortlist>(&query)
            .bind(user_id)
            .bind(opportunity_id)
            .fetch_one(pool)
            .await
    }

    /// Remove a shortlist entry. Returns `true` if a row was deleted.
    pub async fn remove(
        pool: &PgPool,
        user_id: &str,
        opportunity_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM shortlists WHERE user_id = $1 AND opportunity_id = $2")
                .bind(user_id)
                .bind(opportunity_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
