//! Manual ordering of games within a page.
//!
//! Both operations work on the members as currently displayed and return
//! the `order` values to write back; nothing is mutated here.

use serde::{Deserialize, Serialize};

use crate::game::GameRecord;
use crate::types::GameId;

/// New `order` value for one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderUpdate {
    pub id: GameId,
    pub order: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/// Drag-and-drop move: take the member at `from`, insert it at `to`, then
/// number everyone by position. Only members whose order changes are
/// returned; out-of-range or no-op moves return nothing.
pub fn move_member(members: &[GameRecord], from: usize, to: usize) -> Vec<OrderUpdate> {
    if from == to || from >= members.len() || to >= members.len() {
        return Vec::new();
    }

    let mut arranged: Vec<&GameRecord> = members.iter().collect();
    let moved = arranged.remove(from);
    arranged.insert(to, moved);

    arranged
        .into_iter()
        .enumerate()
        .filter_map(|(idx, game)| {
            let order = idx as i64;
            (game.order != Some(order)).then_some(OrderUpdate { id: game.id, order })
        })
        .collect()
}

/// Swap a member with its neighbour. Members without an order count as
/// sitting at their position. `None` at either end of the list.
pub fn bump(members: &[GameRecord], idx: usize, direction: Direction) -> Option<[OrderUpdate; 2]> {
    let other = match direction {
        Direction::Up => idx.checked_sub(1)?,
        Direction::Down => idx + 1,
    };
    let a = members.get(idx)?;
    let b = members.get(other)?;

    let a_order = a.order.unwrap_or(idx as i64);
    let b_order = b.order.unwrap_or(other as i64);

    Some([
        OrderUpdate {
            id: a.id,
            order: b_order,
        },
        OrderUpdate {
            id: b.id,
            order: a_order,
        },
    ])
}

/// Apply updates to an in-memory list (e.g. after the store confirmed them).
pub fn apply_updates(games: &mut [GameRecord], updates: &[OrderUpdate]) {
    for update in updates {
        if let Some(game) = games.iter_mut().find(|g| g.id == update.id) {
            game.order = Some(update.order);
        }
    }
}
