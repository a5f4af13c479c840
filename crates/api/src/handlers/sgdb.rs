//! Handlers for the SteamGridDB proxy.
//!
//! `search` and `grids` forward to SteamGridDB with the server-side key and
//! relay the upstream status and body as-is. `covers` is the typed shortcut
//! used by the cover picker.

use axum::extract::{Query, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use sagashelf_sgdb::UpstreamResponse;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
}

impl SearchParams {
    fn query(&self) -> AppResult<&str> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .ok_or_else(|| AppError::BadRequest("Missing query".into()))
    }
}

#[derive(Debug, Deserialize)]
pub struct GridsParams {
    #[serde(rename = "gameId")]
    pub game_id: Option<String>,
}

impl GridsParams {
    /// Zero, blank and non-numeric ids all count as missing.
    fn game_id(&self) -> AppResult<u64> {
        self.game_id
            .as_deref()
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .filter(|id| *id != 0)
            .ok_or_else(|| AppError::BadRequest("Missing gameId".into()))
    }
}

/// Relay an upstream response. Successful bodies are labelled JSON; error
/// bodies go back with the upstream status and nothing added.
fn pass_through(upstream: UpstreamResponse) -> Response {
    let status = StatusCode::from_u16(upstream.status).unwrap_or(StatusCode::BAD_GATEWAY);
    if status.is_success() {
        (status, [(CONTENT_TYPE, "application/json")], upstream.body).into_response()
    } else {
        (status, upstream.body).into_response()
    }
}

/// GET /search?query=zelda
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Response> {
    let query = params.query()?;

    let upstream = state
        .sgdb
        .search_raw(query)
        .await
        .map_err(|source| AppError::Proxy {
            route: "search",
            source,
        })?;

    tracing::debug!(query, status = upstream.status, "Proxied SteamGridDB search");
    Ok(pass_through(upstream))
}

/// GET /grids?gameId=123
pub async fn grids(
    State(state): State<AppState>,
    Query(params): Query<GridsParams>,
) -> AppResult<Response> {
    let game_id = params.game_id()?;

    let upstream = state
        .sgdb
        .grids_raw(game_id)
        .await
        .map_err(|source| AppError::Proxy {
            route: "grids",
            source,
        })?;

    tracing::debug!(game_id, status = upstream.status, "Proxied SteamGridDB grids");
    Ok(pass_through(upstream))
}

/// GET /covers?query=zelda
///
/// Covers of the best SteamGridDB match, `{ "data": [{ "url": ... }] }`.
pub async fn covers(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let query = params.query()?;
    let covers = state.sgdb.suggest_covers(query).await?;

    tracing::debug!(query, count = covers.len(), "Suggested covers");
    Ok(Json(DataResponse { data: covers }))
}
