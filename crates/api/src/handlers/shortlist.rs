//! Handlers for per-buyer shortlists.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use opphub_core::error::CoreError;
use opphub_core::filters::ListOpportunitiesParams;
use opphub_core::types::DbId;
use opphub_db::models::opportunity::OpportunityListing;
use opphub_db::models::shortlist::Shortlist;
use opphub_db::repositories::{OpportunityRepo, ShortlistRepo};

use super::opportunity::list_matching;
use crate::error::{AppError, AppResult};
use crate::extract::{ApiPath, ApiQuery};
use crate::middleware::rbac::RequireBuyer;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/shortlists
///
/// Accepts the same filters as the opportunity listing.
pub async fn list(
    State(state): State<AppState>,
    RequireBuyer(user): RequireBuyer,
    ApiQuery(params): ApiQuery<ListOpportunitiesParams>,
) -> AppResult<Json<DataResponse<Vec<OpportunityListing>>>> {
    let items = list_matching(&state, &user.caller(), &params, true).await?;
    Ok(Json(DataResponse::new(items)))
}

/// POST /api/live-opportunities/{id}/shortlist
pub async fn add(
    State(state): State<AppState>,
    RequireBuyer(user): RequireBuyer,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<(StatusCode, Json<DataResponse<Shortlist>>)> {
    OpportunityRepo::find_visible(&state.pool, &user.caller(), id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Opportunity",
            id,
        }))?;

    let entry = ShortlistRepo::add(&state.pool, &user.user_id, id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(entry))))
}

/// DELETE /api/live-opportunities/{id}/shortlist
pub async fn remove(
    State(state): State<AppState>,
    RequireBuyer(user): RequireBuyer,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<StatusCode> {
    let removed = ShortlistRepo::remove(&state.pool, &user.user_id, id).await?;
    if !removed {
        tracing::debug!(opportunity_id = id, user_id = %user.user_id, "Shortlist entry already absent");
    }
    Ok(StatusCode::NO_CONTENT)
}
