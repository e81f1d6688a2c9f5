//! Repository for the `custom_regions` and `local_planning_authorities` tables.

use sqlx::PgPool;

use crate::models::lookup::{LocalPlanningAuthority, Region};

/// Read-only access to reference data.
pub struct LookupRepo;

impl LookupRepo {
    /// List all regions ordered by name.
    pub async fn list_regions(pool: &PgPool) -> Result<Vec<Region>, sqlx::Error> {
        sqlx::query_as::<_, Region>("SELECT id, name FROM custom_regions ORDER BY name")
            .fetch_all(pool)
            .await
    }

    /// List all local planning authorities ordered by name.
    pub async fn list_lpas(pool: &PgPool) -> Result<Vec<LocalPlanningAuthority>, sqlx::Error> {
        sqlx::query_as::<_, LocalPlanningAuthority>(
            "SELECT code, name FROM local_planning_authorities ORDER BY name",
        )
        .fetch_all(pool)
        .await
    }
}
