//! Route definitions for saga groups and saga pages.
//!
//! Mounted at `/sagas` in the API route tree.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::sagas;
use crate::state::AppState;

/// ```text
/// GET  /               -> list_groups
/// GET  /{slug}         -> get_page
/// POST /{slug}/move    -> move_member
/// POST /{slug}/bump    -> bump_member
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(sagas::list_groups))
        .route("/{slug}", get(sagas::get_page))
        .route("/{slug}/move", post(sagas::move_member))
        .route("/{slug}/bump", post(sagas::bump_member))
}
