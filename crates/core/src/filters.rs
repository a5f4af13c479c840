//! Search, filtering and sorting of the game list.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::game::{GameRecord, MIN_RATING};
use crate::types::Timestamp;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    Title,
    Rating,
    #[default]
    CreatedAt,
    FinishedAt,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Filter state of the collection view.
///
/// The default shows everything, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Filters {
    pub search: String,
    pub genres: Vec<String>,
    pub min_rating: i32,
    pub platform: Option<String>,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            search: String::new(),
            genres: Vec::new(),
            min_rating: MIN_RATING,
            platform: None,
            sort_by: SortBy::default(),
            sort_order: SortOrder::default(),
        }
    }
}

/// Lower-case and strip accents for substring search.
fn fold(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

impl Filters {
    /// True when anything differs from the default view.
    pub fn is_active(&self) -> bool {
        *self != Self::default()
    }

    fn platform(&self) -> Option<&str> {
        self.platform
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }

    pub fn matches(&self, game: &GameRecord) -> bool {
        let needle = fold(self.search.trim());
        if !needle.is_empty() {
            let in_title = fold(&game.title).contains(&needle);
            let in_saga = game
                .saga
                .as_deref()
                .is_some_and(|saga| fold(saga).contains(&needle));
            if !in_title && !in_saga {
                return false;
            }
        }

        if !self.genres.is_empty() && !game.genres.iter().any(|g| self.genres.contains(g)) {
            return false;
        }

        if game.rating < self.min_rating {
            return false;
        }

        match self.platform() {
            Some(platform) => game.platform.as_deref().map(str::trim) == Some(platform),
            None => true,
        }
    }

    pub fn compare(&self, a: &GameRecord, b: &GameRecord) -> Ordering {
        let primary = match self.sort_by {
            SortBy::Title => self.directed(fold(&a.title).cmp(&fold(&b.title))),
            SortBy::Rating => self.directed(a.rating.cmp(&b.rating)),
            SortBy::CreatedAt => self.by_timestamp(a.created(), b.created()),
            SortBy::FinishedAt => self.by_timestamp(a.finished(), b.finished()),
        };
        primary.then_with(|| a.title.cmp(&b.title))
    }

    fn directed(&self, ord: Ordering) -> Ordering {
        match self.sort_order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    }

    /// Missing dates go last whichever way the list is sorted.
    fn by_timestamp(&self, a: Option<Timestamp>, b: Option<Timestamp>) -> Ordering {
        match (a, b) {
            (Some(a), Some(b)) => self.directed(a.cmp(&b)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }

    /// Matching games, sorted.
    pub fn apply(&self, games: &[GameRecord]) -> Vec<GameRecord> {
        let mut selected: Vec<GameRecord> =
            games.iter().filter(|g| self.matches(g)).cloned().collect();
        selected.sort_by(|a, b| self.compare(a, b));
        selected
    }
}
