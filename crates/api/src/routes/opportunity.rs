//! Route definitions for the `/live-opportunities` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{interest, opportunity, shortlist};
use crate::state::AppState;

/// Routes mounted at `/live-opportunities`.
///
/// ```text
/// GET    /                  -> list
/// POST   /                  -> create
/// GET    /{id}              -> get_by_id
/// PUT    /{id}              -> update
/// DELETE /{id}              -> delete
/// POST   /{id}/submit       -> submit
/// POST   /{id}/review       -> review
/// POST   /{id}/shortlist    -> shortlist::add
/// DELETE /{id}/shortlist    -> shortlist::remove
/// POST   /{id}/interest     -> interest::express
/// GET    /{id}/interest     -> interest::list
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(opportunity::list).post(opportunity::create))
        .route(
            "/{id}",
            get(opportunity::get_by_id)
                .put(opportunity::update)
                .delete(opportunity::delete),
        )
        .route("/{id}/submit", post(opportunity::submit))
        .route("/{id}/review", post(opportunity::review))
        .route(
            "/{id}/shortlist",
            post(shortlist::add).delete(shortlist::remove),
        )
        .route(
            "/{id}/interest",
            post(interest::express).get(interest::list),
        )
}
