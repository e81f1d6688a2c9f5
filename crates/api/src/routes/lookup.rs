//! Route definitions for lookup tables.

use axum::routing::get;
use axum::Router;

use crate::handlers::lookup;
use crate::state::AppState;

/// ```text
/// GET /regions                       -> list_regions
/// GET /local-planning-authorities    -> list_lpas
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/regions", get(lookup::list_regions))
        .route("/local-planning-authorities", get(lookup::list_lpas))
}
