use futures::future::try_join_all;
use sagashelf_core::collection::{mark_done, to_backlog};
use sagashelf_core::error::CoreError;
use sagashelf_core::game::{GameDraft, GameRecord};
use sagashelf_core::reorder::OrderUpdate;
use sagashelf_core::types::{now_timestamp, GameId};
use serde::Serialize;

/// Where the record store lives.
#[derive(Debug, Clone)]
pub struct RecordStoreConfig {
    /// Base URL without trailing slash, e.g. `http://localhost:4000`.
    pub base_url: String,
}

impl RecordStoreConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

/// Errors from the record store layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The store returned a non-2xx status code.
    #[error("Record store error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The payload was rejected before being sent.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Body written on create/replace: the draft plus store-managed timestamps.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WritePayload<'a> {
    #[serde(flatten)]
    draft: &'a GameDraft,
    #[serde(skip_serializing_if = "Option::is_none")]
    created_at: Option<&'a str>,
    updated_at: String,
}

/// HTTP client for the record store. Cheap to clone.
#[derive(Debug, Clone)]
pub struct RecordStoreClient {
    client: reqwest::Client,
    base_url: String,
}

impl RecordStoreClient {
    pub fn new(config: RecordStoreConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Reuse an existing [`reqwest::Client`] (connection pooling).
    pub fn with_client(client: reqwest::Client, config: RecordStoreConfig) -> Self {
        Self {
            client,
            base_url: config.base_url,
        }
    }

    fn games_url(&self) -> String {
        format!("{}/games", self.base_url)
    }

    fn game_url(&self, id: GameId) -> String {
        format!("{}/games/{id}", self.base_url)
    }

    /// All games, most recently created first.
    pub async fn list_games(&self) -> Result<Vec<GameRecord>, StoreError> {
        let response = self
            .client
            .get(self.games_url())
            .query(&[("_sort", "createdAt"), ("_order", "desc")])
            .send()
            .await?;

        let games: Vec<GameRecord> = Self::parse_response(response).await?;
        tracing::debug!(count = games.len(), "Listed games from record store");
        Ok(games)
    }

    /// Create a game; `createdAt` and `updatedAt` are stamped now.
    pub async fn create_game(&self, draft: &GameDraft) -> Result<GameRecord, StoreError> {
        draft.check()?;

        let now = now_timestamp();
        let payload = WritePayload {
            draft,
            created_at: Some(now.as_str()),
            updated_at: now.clone(),
        };

        let response = self
            .client
            .post(self.games_url())
            .json(&payload)
            .send()
            .await?;

        let game: GameRecord = Self::parse_response(response).await?;
        tracing::info!(game_id = game.id, title = %game.title, "Game created");
        Ok(game)
    }

    /// Replace a game. `updatedAt` is stamped now; pass the existing
    /// `createdAt` to keep it, since the store replaces the whole record.
    pub async fn update_game(
        &self,
        id: GameId,
        draft: &GameDraft,
        created_at: Option<&str>,
    ) -> Result<GameRecord, StoreError> {
        draft.check()?;

        let payload = WritePayload {
            draft,
            created_at,
            updated_at: now_timestamp(),
        };

        let response = self
            .client
            .put(self.game_url(id))
            .json(&payload)
            .send()
            .await?;

        let game: GameRecord = Self::parse_response(response).await?;
        tracing::info!(game_id = id, "Game updated");
        Ok(game)
    }

    pub async fn delete_game(&self, id: GameId) -> Result<(), StoreError> {
        let response = self.client.delete(self.game_url(id)).send().await?;
        Self::ensure_success(response).await?;
        tracing::info!(game_id = id, "Game deleted");
        Ok(())
    }

    /// Move a collection game into the to-do list.
    pub async fn move_to_backlog(&self, game: &GameRecord) -> Result<GameRecord, StoreError> {
        self.update_game(game.id, &to_backlog(game), game.created_at.as_deref())
            .await
    }

    /// Take a game out of the to-do list.
    pub async fn mark_done(&self, game: &GameRecord) -> Result<GameRecord, StoreError> {
        self.update_game(game.id, &mark_done(game), game.created_at.as_deref())
            .await
    }

    /// Write a batch of order updates concurrently.
    ///
    /// `games` supplies the full records to replace; an update for an id
    /// not in `games` fails the whole batch before anything is sent.
    pub async fn persist_order(
        &self,
        games: &[GameRecord],
        updates: &[OrderUpdate],
    ) -> Result<Vec<GameRecord>, StoreError> {
        let mut writes = Vec::with_capacity(updates.len());
        for update in updates {
            let game = games
                .iter()
                .find(|g| g.id == update.id)
                .ok_or_else(|| CoreError::NotFound {
                    entity: "game",
                    key: update.id.to_string(),
                })?;

            let mut draft = game.to_draft();
            draft.order = Some(update.order);
            writes.push((game, draft));
        }

        let saved = try_join_all(writes.iter().map(|(game, draft)| {
            self.update_game(game.id, draft, game.created_at.as_deref())
        }))
        .await?;

        tracing::info!(count = saved.len(), "Persisted game order");
        Ok(saved)
    }

    // ---- private helpers ----

    /// Return the response unchanged on success, or a
    /// [`StoreError::Api`] carrying the status and body text.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(status = status.as_u16(), "Record store request failed");
            return Err(StoreError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, StoreError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
