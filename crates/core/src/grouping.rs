//! Saga grouping engine.
//!
//! Partitions a game list into saga groups for the collections overview.
//! Groups are derived on every read and never stored; the computation is
//! pure and deterministic (no hash-map ordering leaks into the output).

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::game::GameRecord;
use crate::saga::{normalize, slugify, SAGA_JEUX_SLUG, UNGROUPED_NAME, UNGROUPED_SLUG};

/// Grouping key of a game.
///
/// The ungrouped bucket is its own variant rather than a reserved string,
/// so a saga that happens to normalize to [`UNGROUPED_NAME`] still gets a
/// group of its own. Variant order puts the bucket before every saga.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SagaKey {
    Ungrouped,
    Named(String),
}

impl SagaKey {
    /// Key for a raw saga label.
    pub fn from_label(label: Option<&str>) -> Self {
        let key = normalize(label);
        if key.is_empty() {
            Self::Ungrouped
        } else {
            Self::Named(key)
        }
    }

    pub fn of(game: &GameRecord) -> Self {
        Self::from_label(game.saga.as_deref())
    }

    pub fn is_ungrouped(&self) -> bool {
        matches!(self, Self::Ungrouped)
    }

    pub fn canonical_name(&self) -> &str {
        match self {
            Self::Ungrouped => UNGROUPED_NAME,
            Self::Named(name) => name,
        }
    }

    pub fn slug(&self) -> String {
        match self {
            Self::Ungrouped => UNGROUPED_SLUG.to_string(),
            Self::Named(name) if name == UNGROUPED_NAME => SAGA_JEUX_SLUG.to_string(),
            Self::Named(name) => slugify(name.as_str()),
        }
    }
}

/// A saga and its games, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SagaGroup {
    #[serde(skip)]
    pub key: SagaKey,
    pub canonical_name: String,
    pub slug: String,
    pub ungrouped: bool,
    pub members: Vec<GameRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub representative_cover_url: Option<String>,
}

impl SagaGroup {
    fn new(key: SagaKey, mut members: Vec<GameRecord>) -> Self {
        sort_members(&mut members);
        let representative_cover_url = members
            .iter()
            .find_map(GameRecord::cover)
            .map(str::to_owned);

        Self {
            canonical_name: key.canonical_name().to_string(),
            slug: key.slug(),
            ungrouped: key.is_ungrouped(),
            key,
            members,
            representative_cover_url,
        }
    }
}

fn absent_last<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Order of games inside a saga: `order`, then `createdAt`, then title.
/// Absent (or unparseable) values sort after present ones.
pub fn compare_members(a: &GameRecord, b: &GameRecord) -> Ordering {
    absent_last(a.order, b.order)
        .then_with(|| absent_last(a.created(), b.created()))
        .then_with(|| a.title.cmp(&b.title))
}

/// Stable sort by [`compare_members`].
pub fn sort_members(members: &mut [GameRecord]) {
    members.sort_by(compare_members);
}

/// Group games by normalized saga.
///
/// The ungrouped bucket comes first when present, sagas follow in ascending
/// canonical-name order. Every input game lands in exactly one group.
pub fn group_by_saga(games: &[GameRecord]) -> Vec<SagaGroup> {
    let mut buckets: BTreeMap<SagaKey, Vec<GameRecord>> = BTreeMap::new();

    for game in games {
        buckets.entry(SagaKey::of(game)).or_default().push(game.clone());
    }

    buckets
        .into_iter()
        .map(|(key, members)| SagaGroup::new(key, members))
        .collect()
}

/// Find the group a URL slug points at.
///
/// Exact slugs match first; otherwise the input is re-slugified, so
/// `"Half-Life"` finds `"half-life"`.
pub fn find_group_by_slug<'a>(groups: &'a [SagaGroup], slug: &str) -> Option<&'a SagaGroup> {
    let exact = slug.trim().to_ascii_lowercase();
    if let Some(group) = groups.iter().find(|group| group.slug == exact) {
        return Some(group);
    }

    let wanted = slugify(slug);
    if wanted.is_empty() {
        return None;
    }
    groups.iter().find(|group| group.slug == wanted)
}
