//! Route definitions for games.
//!
//! Mounted at `/games` in the API route tree.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::games;
use crate::state::AppState;

/// ```text
/// GET    /              -> list_games (filtered, sorted)
/// POST   /              -> create_game
/// GET    /options       -> list_options
/// PUT    /{id}          -> update_game
/// DELETE /{id}          -> delete_game
/// POST   /{id}/backlog  -> move_to_backlog
/// POST   /{id}/done     -> mark_done
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(games::list_games).post(games::create_game))
        .route("/options", get(games::list_options))
        .route("/{id}", put(games::update_game).delete(games::delete_game))
        .route("/{id}/backlog", post(games::move_to_backlog))
        .route("/{id}/done", post(games::mark_done))
}
