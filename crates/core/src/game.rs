//! Game records as stored in the record store, and the draft payload used
//! to create or replace them.

use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

use crate::error::CoreError;
use crate::types::{parse_timestamp, GameId, Timestamp};

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// Genres offered by the entry form out of the box.
pub const DEFAULT_GENRES: &[&str] = &[
    "JRPG",
    "Aventure",
    "Action",
    "FPS",
    "Stratégie",
    "Simulation",
    "Rogue-lite",
    "Plateforme",
    "Indé",
    "Puzzle",
    "Sport",
    "Course",
    "Autre",
];

fn default_rating() -> i32 {
    MIN_RATING
}

/// Accept any JSON number for `order` and treat everything else as absent.
///
/// Older records carry floats or strings here; they must not make the whole
/// list fail to load.
fn lenient_order<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        _ => None,
    }))
}

/// A game in the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub id: GameId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saga: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    /// Position within the saga group, user assigned.
    #[serde(
        default,
        deserialize_with = "lenient_order",
        skip_serializing_if = "Option::is_none"
    )]
    pub order: Option<i64>,
    #[serde(default = "default_rating")]
    pub rating: i32,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub why_liked: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    /// True while the game sits in the to-do list.
    #[serde(default)]
    pub backlog: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl GameRecord {
    /// A record with only its required fields set.
    pub fn new(id: GameId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            saga: None,
            cover_url: None,
            order: None,
            rating: MIN_RATING,
            genres: Vec::new(),
            why_liked: None,
            platform: None,
            backlog: false,
            finished_at: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Non-blank cover URL, if any.
    pub fn cover(&self) -> Option<&str> {
        self.cover_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Parsed `createdAt`; malformed values read as absent.
    pub fn created(&self) -> Option<Timestamp> {
        self.created_at.as_deref().and_then(parse_timestamp)
    }

    /// Parsed `finishedAt`; malformed values read as absent.
    pub fn finished(&self) -> Option<Timestamp> {
        self.finished_at.as_deref().and_then(parse_timestamp)
    }

    /// Editable part of the record, for a full replace.
    pub fn to_draft(&self) -> GameDraft {
        GameDraft {
            title: self.title.clone(),
            saga: self.saga.clone(),
            cover_url: self.cover_url.clone(),
            order: self.order,
            rating: self.rating,
            genres: self.genres.clone(),
            why_liked: self.why_liked.clone(),
            platform: self.platform.clone(),
            backlog: self.backlog,
            finished_at: self.finished_at.clone(),
        }
    }
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::new("blank_title").with_message("title must not be blank".into()));
    }
    Ok(())
}

/// Create/replace payload: a record minus its store-managed fields
/// (`id`, `createdAt`, `updatedAt`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GameDraft {
    #[validate(custom(function = "validate_title"))]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saga: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[validate(range(min = 1, max = 5))]
    #[serde(default = "default_rating")]
    pub rating: i32,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub why_liked: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default)]
    pub backlog: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<String>,
}

impl GameDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            saga: None,
            cover_url: None,
            order: None,
            rating: MIN_RATING,
            genres: Vec::new(),
            why_liked: None,
            platform: None,
            backlog: false,
            finished_at: None,
        }
    }

    /// Validate the draft before it is sent to the store.
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate()
            .map_err(|e| CoreError::Validation(e.to_string()))
    }
}
