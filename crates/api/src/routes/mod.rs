pub mod health;
pub mod lookup;
pub mod opportunity;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /live-opportunities                          list, create
/// /live-opportunities/{id}                     get, update, delete
/// /live-opportunities/{id}/submit              draft -> processing (POST)
/// /live-opportunities/{id}/review              publish or reject (POST, admin)
/// /live-opportunities/{id}/shortlist           add, remove (POST, DELETE)
/// /live-opportunities/{id}/interest            express, list (POST, GET)
///
/// /shortlists                                  caller's shortlisted opportunities
///
/// /regions                                     region lookup
/// /local-planning-authorities                  LPA lookup
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Opportunity listing, lifecycle and per-opportunity sub-resources.
        .nest("/live-opportunities", opportunity::router())
        // The caller's shortlist, filtered like the main listing.
        .route("/shortlists", get(handlers::shortlist::list))
        // Reference data.
        .merge(lookup::router())
}
