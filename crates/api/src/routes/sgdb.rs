//! Route definitions for the SteamGridDB proxy.
//!
//! Mounted at the root and again under `/sgdb`.

use axum::routing::get;
use axum::Router;

use crate::handlers::sgdb;
use crate::state::AppState;

/// ```text
/// GET /search?query=   -> search (upstream body passed through)
/// GET /grids?gameId=   -> grids (upstream body passed through)
/// GET /covers?query=   -> covers (covers of the best search hit)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/search", get(sgdb::search))
        .route("/grids", get(sgdb::grids))
        .route("/covers", get(sgdb::covers))
}
