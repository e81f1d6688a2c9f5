//! Handlers for expressions of interest.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use opphub_core::error::CoreError;
use opphub_core::opportunity::validate_interest_message;
use opphub_core::status::OpportunityStatus;
use opphub_core::types::DbId;
use opphub_db::models::interest::{CreateInterest, Interest};
use opphub_db::repositories::{InterestRepo, OpportunityRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiPath};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireBuyer;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Opportunity",
        id,
    })
}

/// POST /api/live-opportunities/{id}/interest
///
/// A second expression for the same opportunity hits the unique constraint
/// and is reported as 409.
pub async fn express(
    State(state): State<AppState>,
    RequireBuyer(user): RequireBuyer,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(input): ApiJson<CreateInterest>,
) -> AppResult<(StatusCode, Json<DataResponse<Interest>>)> {
    let listing = OpportunityRepo::find_visible(&state.pool, &user.caller(), id)
        .await?
        .ok_or_else(|| not_found(id))?;
    if listing.status != OpportunityStatus::Published.as_str() {
        return Err(CoreError::Conflict(format!(
            "Interest can only be expressed in published opportunities; opportunity {id} is {}",
            listing.status
        ))
        .into());
    }
    validate_interest_message(input.message.as_deref())?;

    let interest =
        InterestRepo::create(&state.pool, id, &user.user_id, input.message.as_deref()).await?;
    tracing::info!(opportunity_id = id, user_id = %user.user_id, "Interest expressed");
    Ok((StatusCode::CREATED, Json(DataResponse::new(interest))))
}

/// GET /api/live-opportunities/{id}/interest
///
/// Only the owner of the opportunity or an admin may read its interests.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<DataResponse<Vec<Interest>>>> {
    let caller = user.caller();
    OpportunityRepo::find_ownership(&state.pool, id)
        .await?
        .filter(|row| caller.may_modify(&row.user_id))
        .ok_or_else(|| not_found(id))?;

    let interests = InterestRepo::list_for_opportunity(&state.pool, id).await?;
    Ok(Json(DataResponse::new(interests)))
}
