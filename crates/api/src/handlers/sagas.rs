//! Handlers for saga groups, saga pages, and manual ordering.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use sagashelf_core::collection::{next_order, SagaPage};
use sagashelf_core::error::CoreError;
use sagashelf_core::game::GameRecord;
use sagashelf_core::grouping::{group_by_saga, sort_members};
use sagashelf_core::reorder::{self, apply_updates, Direction, OrderUpdate};
use sagashelf_core::saga::BACKLOG_SLUG;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// One saga page as rendered by the client.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SagaPageView {
    pub title: String,
    pub slug: String,
    pub backlog: bool,
    pub members: Vec<GameRecord>,
    /// `order` to give a game added at the end of this page.
    pub next_order: i64,
}

impl SagaPageView {
    fn new(page: &SagaPage, members: Vec<GameRecord>) -> Self {
        let slug = match page {
            SagaPage::Backlog => BACKLOG_SLUG.to_string(),
            SagaPage::Group(key) => key.slug(),
        };
        Self {
            title: page.title().to_string(),
            slug,
            backlog: matches!(page, SagaPage::Backlog),
            next_order: next_order(&members),
            members,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Deserialize)]
pub struct BumpRequest {
    pub index: usize,
    pub direction: Direction,
}

/// Load the collection and select the page a slug points at.
///
/// An empty saga page is a 404; the to-do list always exists.
async fn load_page(state: &AppState, slug: &str) -> AppResult<(SagaPage, Vec<GameRecord>)> {
    let games = state.store()?.list_games().await?;
    let page = SagaPage::from_slug(slug);
    let members = page.members(&games);

    if members.is_empty() && page != SagaPage::Backlog {
        return Err(CoreError::NotFound {
            entity: "saga",
            key: slug.to_string(),
        }
        .into());
    }

    Ok((page, members))
}

/// Persist order updates and return the page as it now reads.
async fn reorder_page(
    state: &AppState,
    page: &SagaPage,
    mut members: Vec<GameRecord>,
    updates: &[OrderUpdate],
) -> AppResult<SagaPageView> {
    if !updates.is_empty() {
        state.store()?.persist_order(&members, updates).await?;
        apply_updates(&mut members, updates);
        sort_members(&mut members);
    }
    Ok(SagaPageView::new(page, members))
}

/// GET /api/v1/sagas
///
/// Every saga group with its members, ungrouped bucket first.
pub async fn list_groups(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let games = state.store()?.list_games().await?;
    let groups = group_by_saga(&games);

    tracing::debug!(games = games.len(), groups = groups.len(), "Grouped collection");
    Ok(Json(DataResponse { data: groups }))
}

/// GET /api/v1/sagas/{slug}
pub async fn get_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let (page, members) = load_page(&state, &slug).await?;
    Ok(Json(DataResponse {
        data: SagaPageView::new(&page, members),
    }))
}

/// POST /api/v1/sagas/{slug}/move
pub async fn move_member(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(input): Json<MoveRequest>,
) -> AppResult<impl IntoResponse> {
    let (page, members) = load_page(&state, &slug).await?;
    if input.from >= members.len() || input.to >= members.len() {
        return Err(AppError::BadRequest(format!(
            "Position out of range (page has {} games)",
            members.len()
        )));
    }

    let updates = reorder::move_member(&members, input.from, input.to);
    tracing::info!(
        slug = %slug,
        from = input.from,
        to = input.to,
        changed = updates.len(),
        "Moved saga member"
    );

    let view = reorder_page(&state, &page, members, &updates).await?;
    Ok(Json(DataResponse { data: view }))
}

/// POST /api/v1/sagas/{slug}/bump
pub async fn bump_member(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(input): Json<BumpRequest>,
) -> AppResult<impl IntoResponse> {
    let (page, members) = load_page(&state, &slug).await?;
    let updates = reorder::bump(&members, input.index, input.direction).ok_or_else(|| {
        let towards = match input.direction {
            Direction::Up => "up",
            Direction::Down => "down",
        };
        AppError::BadRequest(format!(
            "Cannot move game at position {} {towards}",
            input.index
        ))
    })?;

    tracing::info!(
        slug = %slug,
        index = input.index,
        direction = ?input.direction,
        "Bumped saga member"
    );

    let view = reorder_page(&state, &page, members, &updates).await?;
    Ok(Json(DataResponse { data: view }))
}
