//! Single-step what-if checks.
//!
//! Each check looks at a board one move ahead. The board is a throwaway
//! clone; piles share structure with the original and only the two piles
//! the move touches are copied.

use crate::core::action::Move;
use crate::core::config::PileId;
use crate::core::state::GameState;
use crate::rules::{accepts_on_foundation, accepts_on_tableau, KlondikeRules};

/// The board after `mv`, or `None` if `mv` is illegal.
#[must_use]
pub fn simulate(rules: &KlondikeRules, state: &GameState, mv: &Move) -> Option<GameState> {
    let mut next = state.clone();
    rules.try_move(&mut next, mv).then_some(next)
}

/// Can a Queen from the waste top or another tableau top land on `dest`?
#[must_use]
pub fn queen_ready(after: &GameState, dest: PileId) -> bool {
    let Some(king) = after.top(dest) else {
        return false;
    };
    let tops = std::iter::once(PileId::WASTE)
        .chain(PileId::tableaux().filter(|&t| t != dest))
        .filter_map(|id| after.top(id));

    tops.filter(|c| c.face_up && c.is_queen())
        .any(|queen| queen.is_opposite_color(king))
}

/// Can a face-up run of two or more cards from a third tableau land on
/// `dest`?
#[must_use]
pub fn opens_run(after: &GameState, source: PileId, dest: PileId) -> bool {
    let target = after.pile(dest);
    PileId::tableaux()
        .filter(|&t| t != source && t != dest)
        .any(|t| {
            let pile = after.pile(t);
            let Some(first_up) = pile.first_face_up() else {
                return false;
            };
            (first_up..pile.len().saturating_sub(1))
                .filter_map(|i| pile.get(i))
                .any(|card| accepts_on_tableau(target, card))
        })
}

/// Is the new top of `source` face up and playable to some foundation?
#[must_use]
pub fn exposes_foundation_card(after: &GameState, source: PileId) -> bool {
    match after.top(source) {
        Some(card) if card.face_up => PileId::foundations()
            .any(|f| accepts_on_foundation(after.pile(f), card)),
        _ => false,
    }
}
