//! Handlers for the `/live-opportunities` resource.
//!
//! Reads go through the listing query, so the visibility rules for a caller
//! are the same for a list and a single fetch. Writes first load the owner
//! and status of the row, then apply a conditional statement so a row whose
//! status changed in between is never modified.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use opphub_core::error::CoreError;
use opphub_core::filters::{ListOpportunitiesParams, ParsedFilter};
use opphub_core::opportunity::{
    validate_boundary, validate_coordinates, validate_name, validate_plots,
};
use opphub_core::roles::Caller;
use opphub_core::status::{validate_transition, OpportunityStatus, ReviewDecision};
use opphub_core::types::DbId;
use opphub_core::visibility::Visibility;
use opphub_db::models::opportunity::{
    CreateOpportunity, OpportunityListing, OpportunityOwnership, UpdateOpportunity,
};
use opphub_db::repositories::OpportunityRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireSeller};
use crate::response::DataResponse;
use crate::state::AppState;

const ENTITY: &str = "Opportunity";

/// Message returned when the listing read fails in the store.
pub const LIST_FAILED: &str = "Failed to fetch opportunities";

/// Request body for `POST /live-opportunities/{id}/review`.
#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub decision: ReviewDecision,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: ENTITY, id })
}

/// Shared body of the opportunity and shortlist listings.
///
/// Malformed filters are dropped unless strict filtering is configured, in
/// which case the request is rejected before any query runs.
pub(crate) async fn list_matching(
    state: &AppState,
    caller: &Caller,
    params: &ListOpportunitiesParams,
    shortlisted_only: bool,
) -> AppResult<Vec<OpportunityListing>> {
    let ParsedFilter {
        mut filter,
        malformed,
    } = params.parse_filter();

    if !malformed.is_empty() {
        let names = malformed
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        if state.config.strict_filters {
            return Err(AppError::BadRequest(format!("Malformed filters: {names}")));
        }
        tracing::debug!(user_id = %caller.user_id, filters = %names, "Ignoring malformed filters");
    }

    filter.shortlisted_only |= shortlisted_only;
    let visibility = Visibility::for_listing(caller, params.show_drafts(), params.status());

    OpportunityRepo::list(&state.pool, caller, &visibility, &filter)
        .await
        .map_err(AppError::fetch(LIST_FAILED))
}

/// Load the row `caller` wants to write to.
///
/// A caller who may not modify the row gets the same 404 as for a missing
/// one.
async fn load_modifiable(
    state: &AppState,
    caller: &Caller,
    id: DbId,
) -> AppResult<(OpportunityOwnership, OpportunityStatus)> {
    let row = OpportunityRepo::find_ownership(&state.pool, id)
        .await?
        .filter(|row| caller.may_modify(&row.user_id))
        .ok_or_else(|| not_found(id))?;
    let status = row.status()?;
    Ok((row, status))
}

/// Re-read a row after a write so the response carries the joined columns.
async fn reload(state: &AppState, caller: &Caller, id: DbId) -> AppResult<OpportunityListing> {
    OpportunityRepo::find_visible(&state.pool, caller, id)
        .await?
        .ok_or_else(|| not_found(id))
}

fn validate_create(input: &CreateOpportunity) -> Result<(), CoreError> {
    validate_name(&input.name)?;
    validate_plots(input.plots)?;
    validate_coordinates(input.longitude, input.latitude)?;
    if let Some(boundary) = &input.boundary {
        validate_boundary(boundary)?;
    }
    Ok(())
}

fn validate_update(input: &UpdateOpportunity) -> Result<(), CoreError> {
    if let Some(name) = &input.name {
        validate_name(name)?;
    }
    if let Some(plots) = input.plots {
        validate_plots(plots)?;
    }
    if input.longitude.is_some() || input.latitude.is_some() {
        validate_coordinates(input.longitude, input.latitude)?;
    }
    if let Some(boundary) = &input.boundary {
        validate_boundary(boundary)?;
    }
    Ok(())
}

/// GET /api/live-opportunities
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    ApiQuery(params): ApiQuery<ListOpportunitiesParams>,
) -> AppResult<Json<DataResponse<Vec<OpportunityListing>>>> {
    let caller = user.caller();
    let items = list_matching(&state, &caller, &params, false).await?;
    Ok(Json(DataResponse::new(items)))
}

/// GET /api/live-opportunities/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<DataResponse<OpportunityListing>>> {
    let listing = reload(&state, &user.caller(), id).await?;
    Ok(Json(DataResponse::new(listing)))
}

/// POST /api/live-opportunities
pub async fn create(
    State(state): State<AppState>,
    RequireSeller(user): RequireSeller,
    ApiJson(input): ApiJson<CreateOpportunity>,
) -> AppResult<(StatusCode, Json<DataResponse<OpportunityListing>>)> {
    validate_create(&input)?;

    let id = OpportunityRepo::create(&state.pool, &user.user_id, &input).await?;
    tracing::info!(opportunity_id = id, user_id = %user.user_id, "Opportunity draft created");

    let listing = reload(&state, &user.caller(), id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(listing))))
}

/// PUT /api/live-opportunities/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireSeller(user): RequireSeller,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(input): ApiJson<UpdateOpportunity>,
) -> AppResult<Json<DataResponse<OpportunityListing>>> {
    let caller = user.caller();
    let (_, status) = load_modifiable(&state, &caller, id).await?;
    if !status.is_editable() {
        return Err(CoreError::Conflict(format!(
            "Only drafts can be edited; opportunity {id} is {status}"
        ))
        .into());
    }
    validate_update(&input)?;

    if !OpportunityRepo::update_draft(&state.pool, id, &input).await? {
        return Err(CoreError::Conflict(format!(
            "Opportunity {id} is no longer a draft"
        ))
        .into());
    }

    let listing = reload(&state, &caller, id).await?;
    Ok(Json(DataResponse::new(listing)))
}

/// DELETE /api/live-opportunities/{id}
///
/// Owners may delete their own drafts; admins may delete any opportunity.
pub async fn delete(
    State(state): State<AppState>,
    RequireSeller(user): RequireSeller,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<StatusCode> {
    let caller = user.caller();
    let (_, status) = load_modifiable(&state, &caller, id).await?;

    let required = if caller.role.is_admin() {
        None
    } else {
        Some(OpportunityStatus::Draft)
    };
    if required.is_some_and(|s| s != status) {
        return Err(CoreError::Conflict(format!(
            "Only drafts can be deleted; opportunity {id} is {status}"
        ))
        .into());
    }

    if OpportunityRepo::delete(&state.pool, id, required).await? {
        tracing::info!(opportunity_id = id, user_id = %caller.user_id, "Opportunity deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(CoreError::Conflict(format!("Opportunity {id} changed while deleting")).into())
    }
}

/// POST /api/live-opportunities/{id}/submit
pub async fn submit(
    State(state): State<AppState>,
    RequireSeller(user): RequireSeller,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<DataResponse<OpportunityListing>>> {
    let caller = user.caller();
    let (_, status) = load_modifiable(&state, &caller, id).await?;
    apply_transition(&state, id, status, OpportunityStatus::Processing).await?;

    tracing::info!(opportunity_id = id, user_id = %caller.user_id, "Opportunity submitted for review");
    let listing = reload(&state, &caller, id).await?;
    Ok(Json(DataResponse::new(listing)))
}

/// POST /api/live-opportunities/{id}/review
pub async fn review(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(input): ApiJson<ReviewRequest>,
) -> AppResult<Json<DataResponse<OpportunityListing>>> {
    let caller = user.caller();
    let (_, status) = load_modifiable(&state, &caller, id).await?;
    let target = input.decision.target_status();
    apply_transition(&state, id, status, target).await?;

    tracing::info!(
        opportunity_id = id,
        admin_id = %caller.user_id,
        status = %target,
        "Opportunity reviewed"
    );
    let listing = reload(&state, &caller, id).await?;
    Ok(Json(DataResponse::new(listing)))
}

async fn apply_transition(
    state: &AppState,
    id: DbId,
    from: OpportunityStatus,
    to: OpportunityStatus,
) -> AppResult<()> {
    validate_transition(from, to)?;
    if OpportunityRepo::transition(&state.pool, id, from, to).await? {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "Opportunity {id} is no longer {from}"
        ))
        .into())
    }
}
