//! Reference data: regions and local planning authorities.

use serde::Serialize;
use sqlx::FromRow;

/// A row from the `custom_regions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Region {
    pub id: String,
    pub name: String,
}

/// A row from the `local_planning_authorities` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LocalPlanningAuthority {
    pub code: String,
    pub name: String,
}
