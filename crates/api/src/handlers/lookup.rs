//! Reference data used to label and filter opportunities.

use axum::extract::State;
use axum::Json;
use opphub_db::models::lookup::{LocalPlanningAuthority, Region};
use opphub_db::repositories::LookupRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/regions
pub async fn list_regions(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Region>>>> {
    let regions = LookupRepo::list_regions(&state.pool)
        .await
        .map_err(AppError::fetch("Failed to fetch regions"))?;
    Ok(Json(DataResponse::new(regions)))
}

/// GET /api/local-planning-authorities
pub async fn list_lpas(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<LocalPlanningAuthority>>>> {
    let lpas = LookupRepo::list_lpas(&state.pool)
        .await
        .map_err(AppError::fetch("Failed to fetch local planning authorities"))?;
    Ok(Json(DataResponse::new(lpas)))
}
