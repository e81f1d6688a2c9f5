//! Repository for the `live_opportunities` table.

use opphub_core::filters::OpportunityFilter;
use opphub_core::roles::Caller;
use opphub_core::status::OpportunityStatus;
use opphub_core::types::DbId;
use opphub_core::visibility::Visibility;
use sqlx::PgPool;

use crate::models::opportunity::{
    CreateOpportunity, OpportunityListing, OpportunityOwnership, UpdateOpportunity,
};
use crate::predicate::bind_values;
use crate::query::ListingQuery;

/// Provides reads, writes and status transitions for opportunities.
pub struct OpportunityRepo;

impl OpportunityRepo {
    /// List the opportunities `caller` may see that match `filter`,
    /// most recently created first.
    pub async fn list(
        pool: &PgPool,
        caller: &Caller,
        visibility: &Visibility,
        filter: &OpportunityFilter,
    ) -> Result<Vec<OpportunityListing>, sqlx::Error> {
        let built = ListingQuery::new(caller, visibility)
            .with_filter(filter)
            .build();
        tracing::debug!(
            user_id = %caller.user_id,
            role = %caller.role,
            params = built.params.len(),
            "Listing opportunities"
        );

        bind_values(
            sqlx::query_as::<_, OpportunityListing>(&built.sql),
            built.params.values(),
        )
        .fetch_all(pool)
        .await
    }

    /// Fetch one opportunity if `caller` is allowed to see it.
    pub async fn find_visible(
        pool: &PgPool,
        caller: &Caller,
        id: DbId,
    ) -> Result<Option<OpportunityListing>, sqlx::Error> {
        let built = ListingQuery::new(caller, &Visibility::for_caller(caller))
            .with_id(id)
            .build();

        bind_values(
            sqlx::query_as::<_, OpportunityListing>(&built.sql),
            built.params.values(),
        )
        .fetch_optional(pool)
        .await
    }

    /// Fetch owner and status for authorization checks.
    pub async fn find_ownership(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<OpportunityOwnership>, sqlx::Error> {
        sqlx::query_as::<_, OpportunityOwnership>(
            "SELECT id, user_id, status FROM live_opportunities WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Insert a new draft owned by `owner_id`, returning its id.
    pub async fn create(
        pool: &PgPool,
        owner_id: &str,
        input: &CreateOpportunity,
    ) -> Result<DbId, sqlx::Error> {
        let t = &input.timeline;
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO live_opportunities (
                user_id, status, name, address, opportunity_type, plots,
                planning_status, land_purchase_status, description,
                geom, boundary, regions, lpa_codes,
                planning_submission_date, planning_determination_date, start_on_site_date,
                first_golden_brick_date, final_golden_brick_date,
                first_handover_date, final_handover_date, site_added_to_portal_date
             ) VALUES (
                $1, $2, $3, $4, $5, $6,
                $7, $8, $9,
                ST_SetSRID(ST_MakePoint($10, $11), 4326),
                ST_SetSRID(ST_GeomFromGeoJSON($12), 4326),
                $13, $14,
                $15, $16, $17,
                $18, $19,
                $20, $21, $22
             )
             RETURNING id",
        )
        .bind(owner_id)
        .bind(OpportunityStatus::Draft.as_str())
        .bind(input.name.trim())
        .bind(&input.address)
        .bind(&input.opportunity_type)
        .bind(input.plots)
        .bind(&input.planning_status)
        .bind(&input.land_purchase_status)
        .bind(&input.description)
        .bind(input.longitude)
        .bind(input.latitude)
        .bind(input.boundary.as_ref().map(|b| b.to_string()))
        .bind(input.regions.as_slice())
        .bind(input.lpa_codes.as_slice())
        .bind(t.planning_submission_date)
        .bind(t.planning_determination_date)
        .bind(t.start_on_site_date)
        .bind(t.first_golden_brick_date)
        .bind(t.final_golden_brick_date)
        .bind(t.first_handover_date)
        .bind(t.final_handover_date)
        .bind(t.site_added_to_portal_date)
        .fetch_one(pool)
        .await
    }

    /// Update a draft. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `false` if no draft with the given `id` exists.
    pub async fn update_draft(
        pool: &PgPool,
        id: DbId,
        input: &UpdateOpportunity,
    ) -> Result<bool, sqlx::Error> {
        let t = &input.timeline;
        let updated = sqlx::query_scalar::<_, DbId>(
            "UPDATE live_opportunities SET
                name = COALESCE($3, name),
                address = COALESCE($4, address),
                opportunity_type = COALESCE($5, opportunity_type),
                plots = COALESCE($6, plots),
                planning_status = COALESCE($7, planning_status),
                land_purchase_status = COALESCE($8, land_purchase_status),
                description = COALESCE($9, description),
                geom = COALESCE(ST_SetSRID(ST_MakePoint($10, $11), 4326), geom),
                boundary = COALESCE(ST_SetSRID(ST_GeomFromGeoJSON($12), 4326), boundary),
                regions = COALESCE($13, regions),
                lpa_codes = COALESCE($14, lpa_codes),
                planning_submission_date = COALESCE($15, planning_submission_date),
                planning_determination_date = COALESCE($16, planning_determination_date),
                start_on_site_date = COALESCE($17, start_on_site_date),
                first_golden_brick_date = COALESCE($18, first_golden_brick_date),
                final_golden_brick_date = COALESCE($19, final_golden_brick_date),
                first_handover_date = COALESCE($20, first_handover_date),
                final_handover_date = COALESCE($21, final_handover_date),
                site_added_to_portal_date = COALESCE($22, site_added_to_portal_date),
                updated_at = NOW()
             WHERE id = $1 AND status = $2
             RETURNING id",
        )
        .bind(id)
        .bind(OpportunityStatus::Draft.as_str())
        .bind(input.name.as_deref().map(str::trim))
        .bind(&input.address)
        .bind(&input.opportunity_type)
        .bind(input.plots)
        .bind(&input.planning_status)
        .bind(&input.land_purchase_status)
        .bind(&input.description)
        .bind(input.longitude)
        .bind(input.latitude)
        .bind(input.boundary.as_ref().map(|b| b.to_string()))
        .bind(input.regions.as_deref())
        .bind(input.lpa_codes.as_deref())
        .bind(t.planning_submission_date)
        .bind(t.planning_determination_date)
        .bind(t.start_on_site_date)
        .bind(t.first_golden_brick_date)
        .bind(t.final_golden_brick_date)
        .bind(t.first_handover_date)
        .bind(t.final_handover_date)
        .bind(t.site_added_to_portal_date)
        .fetch_optional(pool)
        .await?;
        Ok(updated.is_some())
    }

    /// Move an opportunity from `from` to `to` if it is still in `from`.
    ///
    /// Returns `false` when the row is missing or its status has changed
    /// since it was read.
    pub async fn transition(
        pool: &PgPool,
        id: DbId,
        from: OpportunityStatus,
        to: OpportunityStatus,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE live_opportunities SET status = $3, updated_at = NOW() \
             WHERE id = $1 AND status = $2",
        )
        .bind(id)
        .bind(from.as_str())
        .bind(to.as_str())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete an opportunity. With `only_status`, the row is
    /// deleted only while it has that status. Returns `true` if a row was removed.
    pub async fn delete(
        pool: &PgPool,
        id: DbId,
        only_status: Option<OpportunityStatus>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM live_opportunities WHERE id = $1 AND ($2::text IS NULL OR status = $2)",
        )
        .bind(id)
        .bind(only_status.map(OpportunityStatus::as_str))
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
