pub mod games;
pub mod health;
pub mod sagas;
pub mod sgdb;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /games                         filtered game list, create (POST)
/// /games/options                 picker values (sagas, platforms, genres)
/// /games/{id}                    replace (PUT), delete (DELETE)
/// /games/{id}/backlog            move to the to-do list (POST)
/// /games/{id}/done               take out of the to-do list (POST)
///
/// /sagas                         collections overview (saga groups)
/// /sagas/{slug}                  one saga page, or the to-do list
/// /sagas/{slug}/move             drag-and-drop reorder (POST)
/// /sagas/{slug}/bump             move one step up/down (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/games", games::router())
        .nest("/sagas", sagas::router())
}
