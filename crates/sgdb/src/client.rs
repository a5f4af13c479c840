use reqwest::header::ACCEPT;
use reqwest::Url;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://www.steamgriddb.com/api/v2";

/// Vertical box-art sizes requested from the grids endpoint.
pub const GRID_DIMENSIONS: &str = "600x900,342x482";
/// Static images only (no animated grids).
pub const GRID_TYPES: &str = "static";
pub const GRID_STYLES: &str = "alternate";

/// SteamGridDB connection settings.
#[derive(Debug, Clone)]
pub struct SgdbConfig {
    /// Bearer token. May be empty; calls then fail with
    /// [`SgdbError::MissingApiKey`] without touching the network.
    pub api_key: String,
    pub base_url: String,
}

impl SgdbConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SgdbError {
    #[error("SteamGridDB API key is not configured")]
    MissingApiKey,

    #[error("Invalid SteamGridDB base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("SteamGridDB API error ({status}): {body}")]
    Api { status: u16, body: String },
}

/// Search hit from the autocomplete endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SgdbGame {
    pub id: u64,
    pub name: String,
}

/// One cover image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SgdbGrid {
    pub url: String,
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: Option<Vec<T>>,
}

/// Upstream status and body, untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: String,
}

impl UpstreamResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client for SteamGridDB. Cheap to clone.
#[derive(Debug, Clone)]
pub struct SgdbClient {
    client: reqwest::Client,
    api_key: String,
    base_url: Url,
}

impl SgdbClient {
    pub fn new(config: SgdbConfig) -> Result<Self, SgdbError> {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Reuse an existing [`reqwest::Client`] (connection pooling, test setup).
    pub fn with_client(client: reqwest::Client, config: SgdbConfig) -> Result<Self, SgdbError> {
        let invalid = |reason: String| SgdbError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason,
        };
        let base_url = Url::parse(&config.base_url).map_err(|e| invalid(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(invalid("not a hierarchical URL".into()));
        }

        Ok(Self {
            client,
            api_key: config.api_key,
            base_url,
        })
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Base URL with `segments` appended, each percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn fetch(&self, url: Url) -> Result<UpstreamResponse, SgdbError> {
        if !self.has_api_key() {
            return Err(SgdbError::MissingApiKey);
        }

        tracing::debug!(url = %url, "SteamGridDB request");
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.api_key)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        if !(200..300).contains(&status) {
            tracing::warn!(status, "SteamGridDB returned an error status");
        }
        Ok(UpstreamResponse { status, body })
    }

    /// `GET /search/autocomplete/{query}`, returned verbatim.
    pub async fn search_raw(&self, query: &str) -> Result<UpstreamResponse, SgdbError> {
        self.fetch(self.endpoint(&["search", "autocomplete", query]))
            .await
    }

    /// `GET /grids/game/{id}` restricted to static vertical box art,
    /// returned verbatim.
    pub async fn grids_raw(&self, game_id: u64) -> Result<UpstreamResponse, SgdbError> {
        let mut url = self.endpoint(&["grids", "game", &game_id.to_string()]);
        url.query_pairs_mut()
            .append_pair("dimensions", GRID_DIMENSIONS)
            .append_pair("types", GRID_TYPES)
            .append_pair("styles", GRID_STYLES);
        self.fetch(url).await
    }

    fn decode<T: serde::de::DeserializeOwned>(
        response: UpstreamResponse,
    ) -> Result<Vec<T>, SgdbError> {
        if !response.is_success() {
            return Err(SgdbError::Api {
                status: response.status,
                body: response.body,
            });
        }
        let envelope: Envelope<T> = serde_json::from_str(&response.body).map_err(|e| {
            SgdbError::Api {
                status: response.status,
                body: format!("undecodable body: {e}"),
            }
        })?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// Games whose name matches `query`.
    pub async fn search_games(&self, query: &str) -> Result<Vec<SgdbGame>, SgdbError> {
        Self::decode(self.search_raw(query).await?)
    }

    /// Cover images for a SteamGridDB game.
    pub async fn grids(&self, game_id: u64) -> Result<Vec<SgdbGrid>, SgdbError> {
        Self::decode(self.grids_raw(game_id).await?)
    }

    /// Covers for the best search hit of `query`; empty when nothing matches.
    pub async fn suggest_covers(&self, query: &str) -> Result<Vec<SgdbGrid>, SgdbError> {
        let games = self.search_games(query).await?;
        let Some(best) = games.first() else {
            return Ok(Vec::new());
        };
        tracing::debug!(sgdb_id = best.id, name = %best.name, "Picked SteamGridDB game");
        self.grids(best.id).await
    }
}
