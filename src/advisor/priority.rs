//! Fixed-priority move selection.
//!
//! ## Classes
//!
//! Walked in order; the first class with a legal candidate decides:
//!
//! 1. Flip a face-down tableau top.
//! 2. Tableau tops, then the waste, to a foundation.
//! 3. A face-up run onto a tableau. Tableau sources with the most face-down
//!    cards go first (higher index on ties); the waste goes last.
//! 4. Bridge: lift the run covering a card some foundation needs onto a
//!    catcher column.
//! 5. Draw.
//! 6. Redeal.
//!
//! No scoring is involved. A finished game short-circuits: `Collect` when
//! it is won or cleared, `NoMove` when stuck.

use std::cmp::Reverse;

use super::suggestion::Suggestion;
use crate::core::action::Move;
use crate::core::config::PileId;
use crate::core::state::GameState;
use crate::rules::{KlondikeRules, RulesEngine};

/// One priority class: propose the first legal move it knows of.
type PriorityClass = fn(&PriorityAdvisor, &GameState) -> Option<Move>;

/// Outcome of a priority decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advice {
    Play(Move),
    Collect,
    NoMove,
}

/// Deterministic advisor.
///
/// ```
/// use klondike_advisor::advisor::{Advice, PriorityAdvisor};
/// use klondike_advisor::core::{Card, GameState, Move, PileId};
///
/// let mut state = GameState::default();
/// state.pile_mut(PileId::STOCK).add_to_top(Card::unknown());
///
/// let advisor = PriorityAdvisor::new();
/// assert_eq!(advisor.next_move(&state), Advice::Play(Move::draw()));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct PriorityAdvisor {
    rules: KlondikeRules,
}

impl PriorityAdvisor {
    const CLASSES: [(&'static str, PriorityClass); 6] = [
        ("flip", Self::flip_class),
        ("foundation", Self::foundation_class),
        ("tableau", Self::tableau_class),
        ("bridge", Self::bridge_class),
        ("draw", Self::draw_class),
        ("redeal", Self::redeal_class),
    ];

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick the next move without touching `state`.
    #[must_use]
    pub fn next_move(&self, state: &GameState) -> Advice {
        if let Some(result) = self.rules.is_terminal(state) {
            tracing::info!(result = ?result, "game over");
            return if result.is_win() {
                Advice::Collect
            } else {
                Advice::NoMove
            };
        }
        for (name, class) in Self::CLASSES {
            if let Some(mv) = class(self, state) {
                tracing::debug!(class = name, mv = %mv, "priority move");
                return Advice::Play(mv);
            }
        }
        tracing::info!("no priority move available");
        Advice::NoMove
    }

    /// Pick the next move and play it on `state`.
    pub fn play(&self, state: &mut GameState) -> Advice {
        let advice = self.next_move(state);
        if let Advice::Play(mv) = advice {
            if !self.rules.try_move(state, &mv) {
                return Advice::NoMove;
            }
        }
        advice
    }

    /// The decision as a suggestion, labelled against `state`.
    #[must_use]
    pub fn advise(&self, state: &GameState) -> Suggestion {
        match self.next_move(state) {
            Advice::Play(mv) => Suggestion::for_move(state, mv, None),
            Advice::Collect => Suggestion::collect(),
            Advice::NoMove => Suggestion::no_move(),
        }
    }

    fn first_legal(&self, state: &GameState, candidates: impl IntoIterator<Item = Move>) -> Option<Move> {
        candidates
            .into_iter()
            .find(|mv| self.rules.can_move(state, mv))
    }

    fn flip_class(&self, state: &GameState) -> Option<Move> {
        self.first_legal(state, PileId::tableaux().map(Move::flip))
    }

    fn foundation_class(&self, state: &GameState) -> Option<Move> {
        let sources = PileId::tableaux().chain(std::iter::once(PileId::WASTE));
        let candidates = sources.flat_map(|src| {
            PileId::foundations().map(move |f| Move::to_foundation(src, f))
        });
        self.first_legal(state, candidates)
    }

    fn tableau_class(&self, state: &GameState) -> Option<Move> {
        let mut sources: Vec<PileId> = PileId::tableaux().collect();
        sources.sort_by_key(|&id| (Reverse(state.pile(id).num_face_down()), Reverse(id)));

        for src in sources {
            let pile = state.pile(src);
            let Some(start) = pile.first_face_up() else {
                continue;
            };
            let candidates = PileId::tableaux()
                // A King already at the bottom gains nothing from an empty column.
                .filter(|&dst| start > 0 || !state.pile(dst).is_empty())
                .map(|dst| Move::to_tableau(src, start, dst));
            if let Some(mv) = self.first_legal(state, candidates) {
                return Some(mv);
            }
        }

        let top = state.waste().len().checked_sub(1)?;
        self.first_legal(
            state,
            PileId::tableaux().map(|dst| Move::to_tableau(PileId::WASTE, top, dst)),
        )
    }

    fn bridge_class(&self, state: &GameState) -> Option<Move> {
        for f in PileId::foundations() {
            let Some(needed) = state.top(f).copied() else {
                continue;
            };

            let catcher = PileId::tableaux().find(|&t| {
                state.top(t).is_some_and(|c| {
                    c.face_up
                        && c.suit != needed.suit
                        && c.is_same_color(&needed)
                        && c.rank == needed.rank + 1
                })
            });
            let Some(catcher) = catcher else {
                continue;
            };

            // The last column holding a match wins.
            let matched = PileId::tableaux()
                .rev()
                .filter(|&t| t != catcher)
                .find_map(|t| {
                    let pile = state.pile(t);
                    (0..pile.len().saturating_sub(1))
                        .find(|&i| {
                            pile.get(i).is_some_and(|c| {
                                c.face_up && c.suit == needed.suit && c.rank == needed.rank + 1
                            })
                        })
                        .map(|i| (t, i))
                });

            if let Some((pile, index)) = matched {
                let mv = Move::to_tableau(pile, index + 1, catcher);
                if self.rules.can_move(state, &mv) {
                    return Some(mv);
                }
            }
        }
        None
    }

    fn draw_class(&self, state: &GameState) -> Option<Move> {
        self.rules.can_draw(state).then(Move::draw)
    }

    fn redeal_class(&self, state: &GameState) -> Option<Move> {
        self.rules.can_redeal(state).then(Move::redeal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::{Card, Suit, ACE, KING, QUEEN};
    use crate::core::config::RulesConfig;

    fn state_with(piles: &[(PileId, Vec<Card>)]) -> GameState {
        let mut state = GameState::default();
        for (id, cards) in piles {
            *state.pile_mut(*id) = cards.iter().copied().collect();
        }
        state
    }

    #[test]
    fn test_flip_beats_foundation() {
        let state = state_with(&[
            (PileId::tableau(4), vec![Card::unknown()]),
            (PileId::WASTE, vec![Card::up(ACE, Suit::Hearts)]),
        ]);
        let advisor = PriorityAdvisor::new();
        assert_eq!(advisor.next_move(&state), Advice::Play(Move::flip(PileId::tableau(4))));
    }

    #[test]
    fn test_tableau_tops_before_waste_for_foundation() {
        let state = state_with(&[
            (PileId::tableau(6), vec![Card::up(ACE, Suit::Clubs)]),
            (PileId::WASTE, vec![Card::up(ACE, Suit::Hearts)]),
        ]);
        let advisor = PriorityAdvisor::new();
        assert_eq!(
            advisor.next_move(&state),
            Advice::Play(Move::to_foundation(PileId::tableau(6), PileId::foundation(0)))
        );
    }

    #[test]
    fn test_prefers_most_face_down_source() {
        // Both 7♥ runs fit on 8♣; T1 hides more cards.
        let state = state_with(&[
            (PileId::tableau(0), vec![Card::up(8, Suit::Clubs)]),
            (PileId::tableau(1), vec![Card::unknown(), Card::unknown(), Card::up(7, Suit::Hearts)]),
            (PileId::tableau(2), vec![Card::unknown(), Card::up(7, Suit::Diamonds)]),
        ]);
        let advisor = PriorityAdvisor::new();
        assert_eq!(
            advisor.next_move(&state),
            Advice::Play(Move::to_tableau(PileId::tableau(1), 2, PileId::tableau(0)))
        );
    }

    #[test]
    fn test_ties_go_to_higher_index() {
        let state = state_with(&[
            (PileId::tableau(0), vec![Card::up(8, Suit::Clubs)]),
            (PileId::tableau(1), vec![Card::unknown(), Card::up(7, Suit::Hearts)]),
            (PileId::tableau(2), vec![Card::unknown(), Card::up(7, Suit::Diamonds)]),
        ]);
        let advisor = PriorityAdvisor::new();
        assert_eq!(
            advisor.next_move(&state),
            Advice::Play(Move::to_tableau(PileId::tableau(2), 1, PileId::tableau(0)))
        );
    }

    #[test]
    fn test_bottom_king_stays_but_waste_king_moves() {
        let state = state_with(&[
            (PileId::tableau(0), vec![Card::up(KING, Suit::Spades)]),
            (PileId::WASTE, vec![Card::up(KING, Suit::Hearts)]),
        ]);
        let advisor = PriorityAdvisor::new();
        assert_eq!(
            advisor.next_move(&state),
            Advice::Play(Move::to_tableau(PileId::WASTE, 0, PileId::tableau(1)))
        );
    }

    #[test]
    fn test_bridge_frees_needed_card() {
        // F0 holds 5♥. 6♥ sits under 5♠ in T0; 6♦ on T3 can catch the 5♠.
        let state = state_with(&[
            (
                PileId::foundation(0),
                (1..=5).map(|r| Card::up(r, Suit::Hearts)).collect(),
            ),
            (PileId::tableau(0), vec![Card::up(6, Suit::Hearts), Card::up(5, Suit::Spades)]),
            (PileId::tableau(3), vec![Card::up(QUEEN, Suit::Clubs), Card::up(6, Suit::Diamonds)]),
        ]);
        let advisor = PriorityAdvisor::new();
        assert_eq!(
            advisor.next_move(&state),
            Advice::Play(Move::to_tableau(PileId::tableau(0), 1, PileId::tableau(3)))
        );
    }

    #[test]
    fn test_bridge_prefers_last_match() {
        let state = state_with(&[
            (
                PileId::foundation(0),
                (1..=5).map(|r| Card::up(r, Suit::Hearts)).collect(),
            ),
            (PileId::tableau(0), vec![Card::up(6, Suit::Hearts), Card::up(5, Suit::Spades)]),
            (PileId::tableau(2), vec![Card::up(6, Suit::Hearts), Card::up(5, Suit::Clubs)]),
            (PileId::tableau(3), vec![Card::up(QUEEN, Suit::Clubs), Card::up(6, Suit::Diamonds)]),
        ]);
        let advisor = PriorityAdvisor::new();
        assert_eq!(
            advisor.bridge_class(&state),
            Some(Move::to_tableau(PileId::tableau(2), 1, PileId::tableau(3)))
        );
    }

    #[test]
    fn test_zero_draw_count_is_not_a_move() {
        let advisor = PriorityAdvisor::new();
        let mut state = GameState::new(RulesConfig { draw_count: 0, max_passes: 3 });
        state.pile_mut(PileId::STOCK).add_to_top(Card::unknown());
        let before = state.clone();

        assert_eq!(advisor.play(&mut state), Advice::NoMove);
        assert_eq!(state, before);
    }

    #[test]
    fn test_cleared_board_collects() {
        let mut state = state_with(&[(PileId::foundation(0), vec![Card::up(ACE, Suit::Spades)])]);
        state.update_game_ended();
        assert!(!state.is_won());
        assert_eq!(PriorityAdvisor::new().next_move(&state), Advice::Collect);
    }

    #[test]
    fn test_draw_then_redeal_then_nothing() {
        let advisor = PriorityAdvisor::new();

        let mut state = state_with(&[(PileId::STOCK, vec![Card::unknown()])]);
        assert_eq!(advisor.play(&mut state), Advice::Play(Move::draw()));
        assert_eq!(advisor.next_move(&state), Advice::Play(Move::redeal()));

        state.pass = state.rules.max_passes;
        assert_eq!(advisor.next_move(&state), Advice::NoMove);
        assert_eq!(advisor.advise(&state), Suggestion::no_move());
    }

    #[test]
    fn test_won_board_collects() {
        let mut state = GameState::default();
        for (f, suit) in PileId::foundations().zip(Suit::ALL) {
            *state.pile_mut(f) = (ACE..=KING).map(|r| Card::up(r, suit)).collect();
        }
        let advisor = PriorityAdvisor::new();
        assert_eq!(advisor.next_move(&state), Advice::Collect);
        assert_eq!(advisor.advise(&state).label, "Collect Winnings");
    }
}
