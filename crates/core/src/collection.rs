//! Collection views and state transitions.
//!
//! Selects the games shown on a saga page (or the to-do list), lists the
//! values offered in pickers, and prepares the payloads for moving a game
//! between the collection and the to-do list. The caller persists the
//! payloads through the record store.

use std::collections::BTreeSet;

use crate::game::{GameDraft, GameRecord};
use crate::grouping::{sort_members, SagaKey};
use crate::saga::{
    from_slug, normalize, BACKLOG_NAME, BACKLOG_SLUG, SAGA_JEUX_SLUG, UNGROUPED_NAME, UNGROUPED_SLUG,
};

/// What a `/sagas/{slug}` page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SagaPage {
    /// The to-do list ("À FAIRE").
    Backlog,
    /// A saga group, ungrouped bucket included.
    Group(SagaKey),
}

impl SagaPage {
    pub fn from_slug(slug: &str) -> Self {
        let slug = slug.trim();
        if slug.eq_ignore_ascii_case(BACKLOG_SLUG) {
            return Self::Backlog;
        }
        if slug.eq_ignore_ascii_case(UNGROUPED_SLUG) {
            return Self::Group(SagaKey::Ungrouped);
        }
        if slug.eq_ignore_ascii_case(SAGA_JEUX_SLUG) {
            return Self::Group(SagaKey::Named(UNGROUPED_NAME.to_string()));
        }
        Self::Group(SagaKey::from_label(Some(from_slug(slug).as_str())))
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Backlog => BACKLOG_NAME,
            Self::Group(key) => key.canonical_name(),
        }
    }

    pub fn contains(&self, game: &GameRecord) -> bool {
        match self {
            Self::Backlog => game.backlog,
            Self::Group(key) => SagaKey::of(game) == *key,
        }
    }

    /// Games on this page, in saga member order.
    pub fn members(&self, games: &[GameRecord]) -> Vec<GameRecord> {
        let mut members: Vec<GameRecord> = games
            .iter()
            .filter(|game| self.contains(game))
            .cloned()
            .collect();
        sort_members(&mut members);
        members
    }

    /// Rewrite a draft so that saving it keeps the game on this page.
    pub fn claim(&self, draft: GameDraft) -> GameDraft {
        match self {
            Self::Backlog => into_backlog(draft),
            Self::Group(SagaKey::Ungrouped) => GameDraft {
                saga: None,
                backlog: false,
                ..draft
            },
            Self::Group(SagaKey::Named(name)) => into_saga(draft, name),
        }
    }
}

/// Games on the page a slug points at.
pub fn saga_members(games: &[GameRecord], slug: &str) -> Vec<GameRecord> {
    SagaPage::from_slug(slug).members(games)
}

/// Games currently in the to-do list.
pub fn backlog_games(games: &[GameRecord]) -> Vec<GameRecord> {
    SagaPage::Backlog.members(games)
}

/// Distinct canonical saga names, sorted.
pub fn available_sagas(games: &[GameRecord]) -> Vec<String> {
    games
        .iter()
        .map(|game| normalize(game.saga.as_deref()))
        .filter(|key| !key.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct non-blank platforms, sorted.
pub fn available_platforms(games: &[GameRecord]) -> Vec<String> {
    games
        .iter()
        .filter_map(|game| game.platform.as_deref())
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_owned)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Place a draft in a saga, storing the canonical saga name.
pub fn into_saga(draft: GameDraft, saga_label: &str) -> GameDraft {
    let saga = normalize(saga_label);
    GameDraft {
        saga: (!saga.is_empty()).then_some(saga),
        backlog: false,
        ..draft
    }
}

/// Place a draft in the to-do list; the saga is dropped.
pub fn into_backlog(draft: GameDraft) -> GameDraft {
    GameDraft {
        saga: None,
        backlog: true,
        ..draft
    }
}

/// Send a collection game to the to-do list, keeping its position.
pub fn to_backlog(game: &GameRecord) -> GameDraft {
    let draft = into_backlog(game.to_draft());
    GameDraft {
        order: Some(game.order.unwrap_or(0)),
        ..draft
    }
}

/// Take a game out of the to-do list. It returns without a saga.
pub fn mark_done(game: &GameRecord) -> GameDraft {
    GameDraft {
        saga: None,
        backlog: false,
        ..game.to_draft()
    }
}

/// Order value for a game appended to the end of a page.
pub fn next_order(members: &[GameRecord]) -> i64 {
    match members.last() {
        Some(last) => last
            .order
            .unwrap_or(members.len() as i64 - 1)
            .saturating_add(1),
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(id: i64, title: &str, saga: Option<&str>) -> GameRecord {
        GameRecord {
            saga: saga.map(str::to_owned),
            ..GameRecord::new(id, title)
        }
    }

    fn ids(games: &[GameRecord]) -> Vec<i64> {
        games.iter().map(|g| g.id).collect()
    }

    fn library() -> Vec<GameRecord> {
        vec![
            GameRecord {
                order: Some(1),
                ..game(1, "Half-Life 2", Some("half life"))
            },
            GameRecord {
                order: Some(0),
                ..game(2, "Half-Life", Some("HALF-LIFE"))
            },
            game(3, "Tetris", None),
            GameRecord {
                backlog: true,
                ..game(4, "Celeste", None)
            },
            GameRecord {
                platform: Some("PC".into()),
                ..game(5, "Portal", Some("Portal"))
            },
        ]
    }

    #[test]
    fn page_from_slug() {
        assert_eq!(SagaPage::from_slug("a-faire"), SagaPage::Backlog);
        assert_eq!(SagaPage::from_slug("A-FAIRE"), SagaPage::Backlog);
        assert_eq!(
            SagaPage::from_slug("jeux"),
            SagaPage::Group(SagaKey::Ungrouped)
        );
        assert_eq!(
            SagaPage::from_slug("half-life"),
            SagaPage::Group(SagaKey::Named("HALF LIFE".into()))
        );
        assert_eq!(
            SagaPage::from_slug("jeux--saga"),
            SagaPage::Group(SagaKey::Named("JEUX".into()))
        );
    }

    #[test]
    fn saga_named_jeux_has_its_own_page() {
        let games = vec![game(1, "Party Pack", Some("jeux")), game(2, "Tetris", None)];

        assert_eq!(ids(&saga_members(&games, "jeux")), vec![2]);
        assert_eq!(ids(&saga_members(&games, "jeux--saga")), vec![1]);
    }

    #[test]
    fn page_titles() {
        assert_eq!(SagaPage::Backlog.title(), BACKLOG_NAME);
        assert_eq!(SagaPage::from_slug("jeux").title(), UNGROUPED_NAME);
        assert_eq!(SagaPage::from_slug("half-life").title(), "HALF LIFE");
    }

    #[test]
    fn saga_page_lists_sorted_members() {
        assert_eq!(ids(&saga_members(&library(), "half-life")), vec![2, 1]);
        assert_eq!(ids(&saga_members(&library(), "portal")), vec![5]);
        assert!(saga_members(&library(), "metroid").is_empty());
    }

    #[test]
    fn backlog_page_lists_flagged_games() {
        assert_eq!(ids(&saga_members(&library(), "a-faire")), vec![4]);
        assert_eq!(ids(&backlog_games(&library())), vec![4]);
    }

    #[test]
    fn ungrouped_page_matches_ungrouped_group() {
        let games = library();
        let groups = crate::grouping::group_by_saga(&games);
        let bucket = groups.iter().find(|g| g.ungrouped).unwrap();

        assert_eq!(saga_members(&games, "jeux"), bucket.members);
    }

    #[test]
    fn picker_values() {
        let games = library();
        assert_eq!(available_sagas(&games), vec!["HALF LIFE", "PORTAL"]);
        assert_eq!(available_platforms(&games), vec!["PC"]);
    }

    #[test]
    fn into_saga_stores_canonical_name() {
        let draft = GameDraft {
            backlog: true,
            ..GameDraft::new("Zelda")
        };
        let draft = into_saga(draft, "the-legend-of-zelda");

        assert_eq!(draft.saga.as_deref(), Some("THE LEGEND OF ZELDA"));
        assert!(!draft.backlog);
        assert_eq!(into_saga(GameDraft::new("x"), "  ").saga, None);
    }

    #[test]
    fn backlog_round_trip() {
        let game = game(9, "Hades", Some("Hades"));

        let sent = to_backlog(&game);
        assert!(sent.backlog);
        assert_eq!(sent.saga, None);
        assert_eq!(sent.order, Some(0));

        let record = GameRecord {
            backlog: true,
            order: Some(4),
            ..GameRecord::new(9, "Hades")
        };
        let done = mark_done(&record);
        assert!(!done.backlog);
        assert_eq!(done.saga, None);
        assert_eq!(done.order, Some(4));
    }

    #[test]
    fn claim_keeps_game_on_page() {
        let page = SagaPage::from_slug("half-life");
        let draft = page.claim(GameDraft::new("Opposing Force"));
        assert_eq!(draft.saga.as_deref(), Some("HALF LIFE"));

        let draft = SagaPage::Backlog.claim(GameDraft {
            saga: Some("Foo".into()),
            ..GameDraft::new("x")
        });
        assert!(draft.backlog);
        assert_eq!(draft.saga, None);
    }

    #[test]
    fn next_order_appends() {
        assert_eq!(next_order(&[]), 0);

        let members = saga_members(&library(), "half-life");
        assert_eq!(next_order(&members), 2);

        let unordered = vec![game(1, "a", None), game(2, "b", None)];
        assert_eq!(next_order(&unordered), 2);
    }

    #[test]
    fn next_order_saturates_at_the_top() {
        let huge: GameRecord =
            serde_json::from_str(r#"{"id": 1, "title": "a", "order": 1e300}"#).unwrap();
        assert_eq!(huge.order, Some(i64::MAX));
        assert_eq!(next_order(&[huge]), i64::MAX);
    }
}
