//! Handlers for the game list, picker values, and game writes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use sagashelf_core::collection::{available_platforms, available_sagas, next_order, SagaPage};
use sagashelf_core::error::CoreError;
use sagashelf_core::filters::{Filters, SortBy, SortOrder};
use sagashelf_core::game::{GameDraft, GameRecord, DEFAULT_GENRES, MIN_RATING};
use sagashelf_core::types::GameId;
use sagashelf_store::RecordStoreClient;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /api/v1/games`.
///
/// `genres` is comma-separated: `?genres=JRPG,Action`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterParams {
    pub search: Option<String>,
    pub genres: Option<String>,
    pub min_rating: Option<i32>,
    pub platform: Option<String>,
    pub sort_by: Option<SortBy>,
    pub sort_order: Option<SortOrder>,
}

impl FilterParams {
    pub fn into_filters(self) -> Filters {
        let genres = self
            .genres
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|g| !g.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();

        Filters {
            search: self.search.unwrap_or_default(),
            genres,
            min_rating: self.min_rating.unwrap_or(MIN_RATING),
            platform: self.platform.filter(|p| !p.trim().is_empty()),
            sort_by: self.sort_by.unwrap_or_default(),
            sort_order: self.sort_order.unwrap_or_default(),
        }
    }
}

/// Values offered by the entry form and filter pickers.
#[derive(Debug, Serialize)]
pub struct PickerOptions {
    pub sagas: Vec<String>,
    pub platforms: Vec<String>,
    pub genres: Vec<&'static str>,
}

/// Body of `POST /api/v1/games`.
///
/// With `page` set (a saga slug or `a-faire`), the game is placed on that
/// page and appended after its current members unless `order` is given.
#[derive(Debug, Deserialize)]
pub struct CreateGameRequest {
    #[serde(flatten)]
    pub draft: GameDraft,
    #[serde(default)]
    pub page: Option<String>,
}

async fn find_game(store: &RecordStoreClient, id: GameId) -> AppResult<GameRecord> {
    let games = store.list_games().await?;
    games.into_iter().find(|g| g.id == id).ok_or_else(|| {
        CoreError::NotFound {
            entity: "game",
            key: id.to_string(),
        }
        .into()
    })
}

/// GET /api/v1/games
pub async fn list_games(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> AppResult<impl IntoResponse> {
    let filters = params.into_filters();
    let games = state.store()?.list_games().await?;
    let shown = filters.apply(&games);

    tracing::debug!(
        total = games.len(),
        shown = shown.len(),
        filtered = filters.is_active(),
        "Listed games"
    );
    Ok(Json(DataResponse { data: shown }))
}

/// GET /api/v1/games/options
pub async fn list_options(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let games = state.store()?.list_games().await?;

    Ok(Json(DataResponse {
        data: PickerOptions {
            sagas: available_sagas(&games),
            platforms: available_platforms(&games),
            genres: DEFAULT_GENRES.to_vec(),
        },
    }))
}

/// POST /api/v1/games
pub async fn create_game(
    State(state): State<AppState>,
    Json(input): Json<CreateGameRequest>,
) -> AppResult<impl IntoResponse> {
    let store = state.store()?;
    let mut draft = input.draft;
    draft.check()?;

    if let Some(slug) = input.page.as_deref().filter(|s| !s.trim().is_empty()) {
        let page = SagaPage::from_slug(slug);
        draft = page.claim(draft);
        if draft.order.is_none() {
            let games = store.list_games().await?;
            draft.order = Some(next_order(&page.members(&games)));
        }
    }

    let game = store.create_game(&draft).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: game })))
}

/// PUT /api/v1/games/{id}
///
/// Full replace; the stored `createdAt` is kept.
pub async fn update_game(
    State(state): State<AppState>,
    Path(id): Path<GameId>,
    Json(draft): Json<GameDraft>,
) -> AppResult<impl IntoResponse> {
    let store = state.store()?;
    draft.check()?;
    let existing = find_game(store, id).await?;

    let game = store
        .update_game(id, &draft, existing.created_at.as_deref())
        .await?;
    Ok(Json(DataResponse { data: game }))
}

/// DELETE /api/v1/games/{id}
pub async fn delete_game(
    State(state): State<AppState>,
    Path(id): Path<GameId>,
) -> AppResult<StatusCode> {
    state.store()?.delete_game(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/games/{id}/backlog
///
/// Move a game into the to-do list.
pub async fn move_to_backlog(
    State(state): State<AppState>,
    Path(id): Path<GameId>,
) -> AppResult<impl IntoResponse> {
    let store = state.store()?;
    let existing = find_game(store, id).await?;
    let game = store.move_to_backlog(&existing).await?;
    Ok(Json(DataResponse { data: game }))
}

/// POST /api/v1/games/{id}/done
///
/// Take a game out of the to-do list; it lands with the ungrouped games.
pub async fn mark_done(
    State(state): State<AppState>,
    Path(id): Path<GameId>,
) -> AppResult<impl IntoResponse> {
    let store = state.store()?;
    let existing = find_game(store, id).await?;
    let game = store.mark_done(&existing).await?;
    Ok(Json(DataResponse { data: game }))
}
