//! Rules engine trait and the Klondike implementation.
//!
//! Every move kind is a check-then-mutate pair. A check never mutates; a
//! `try_*` call mutates only when its check passes and reports the outcome
//! as a `bool`, so callers fall through to the next candidate on `false`.
//! Illegal moves are never errors.

use crate::core::card::Card;
use crate::core::config::{PileId, PileKind};
use crate::core::pile::Pile;
use crate::core::state::GameState;
use crate::core::action::{Move, MoveKind, MoveList};

/// How a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// All four foundations are complete.
    Won,
    /// Nothing left on the tableaux, stock or waste.
    Cleared,
    /// Cards remain but no move is legal.
    Stuck,
}

impl GameResult {
    #[must_use]
    pub fn is_win(&self) -> bool {
        matches!(self, GameResult::Won | GameResult::Cleared)
    }
}

/// Rules engine trait.
///
/// The advisors call these methods during search and on what-if copies.
///
/// ## Implementation Notes
///
/// - `is_legal` must not mutate and must agree with `apply_move`
/// - `apply_move` leaves the state untouched when it returns `false`
/// - `legal_moves` order is significant: the heuristic advisor breaks
///   score ties in favour of the first candidate
pub trait RulesEngine {
    /// Would `mv` succeed on `state`?
    fn is_legal(&self, state: &GameState, mv: &Move) -> bool;

    /// Apply `mv` if it is legal.
    fn apply_move(&self, state: &mut GameState, mv: &Move) -> bool;

    // === Convenience Methods ===

    /// Every candidate move in advisory order, filtered by `is_legal`.
    ///
    /// Order: flips, waste to foundation, tableau tops to foundation,
    /// tableau runs to tableau (longest-top-first per source), waste to
    /// tableau, draw, redeal, foundation back to tableau.
    fn legal_moves(&self, state: &GameState) -> MoveList {
        let mut candidates = MoveList::new();

        candidates.extend(PileId::tableaux().map(Move::flip));

        for f in PileId::foundations() {
            candidates.push(Move::to_foundation(PileId::WASTE, f));
        }
        for t in PileId::tableaux() {
            for f in PileId::foundations() {
                candidates.push(Move::to_foundation(t, f));
            }
        }

        for src in PileId::tableaux() {
            let pile = state.pile(src);
            let Some(first_up) = pile.first_face_up() else {
                continue;
            };
            for start in (first_up..pile.len()).rev() {
                for dst in PileId::tableaux().filter(|&d| d != src) {
                    candidates.push(Move::to_tableau(src, start, dst));
                }
            }
        }

        if let Some(top) = state.waste().len().checked_sub(1) {
            for dst in PileId::tableaux() {
                candidates.push(Move::to_tableau(PileId::WASTE, top, dst));
            }
        }

        candidates.push(Move::draw());
        candidates.push(Move::redeal());

        for f in PileId::foundations() {
            if let Some(top) = state.pile(f).len().checked_sub(1) {
                for dst in PileId::tableaux() {
                    candidates.push(Move::to_tableau(f, top, dst));
                }
            }
        }

        candidates.retain(|mv| self.is_legal(state, mv));
        candidates
    }

    /// Check if the game is over.
    ///
    /// Returns `Some(result)` if the game has ended, `None` if it continues.
    fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        if state.is_won() {
            Some(GameResult::Won)
        } else if state.game_ended {
            Some(GameResult::Cleared)
        } else if self.legal_moves(state).is_empty() {
            Some(GameResult::Stuck)
        } else {
            None
        }
    }
}

/// Klondike legality rules.
///
/// Stateless: draw count and pass limit travel with each `GameState`.
#[derive(Clone, Copy, Debug, Default)]
pub struct KlondikeRules;

impl KlondikeRules {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Dispatch on the move kind.
    pub fn try_move(&self, state: &mut GameState, mv: &Move) -> bool {
        match mv.kind() {
            Some(MoveKind::Draw) => self.try_draw(state),
            Some(MoveKind::Redeal) => self.try_redeal(state),
            Some(MoveKind::ToFoundation) => self.try_to_foundation(state, mv.source, mv.dest),
            Some(MoveKind::ToTableau) => {
                self.try_to_tableau(state, mv.source, mv.start, mv.dest)
            }
            Some(MoveKind::Flip) => self.try_flip(state, mv.source),
            None => false,
        }
    }

    /// Check without mutating.
    #[must_use]
    pub fn can_move(&self, state: &GameState, mv: &Move) -> bool {
        match mv.kind() {
            Some(MoveKind::Draw) => self.can_draw(state),
            Some(MoveKind::Redeal) => self.can_redeal(state),
            Some(MoveKind::ToFoundation) => self.can_move_to_foundation(state, mv.source, mv.dest),
            Some(MoveKind::ToTableau) => {
                self.tableau_run_start(state, mv.source, mv.start, mv.dest).is_some()
            }
            Some(MoveKind::Flip) => self.can_flip(state, mv.source),
            None => false,
        }
    }

    // === Draw ===

    /// A draw that would move nothing is not a move.
    #[must_use]
    pub fn can_draw(&self, state: &GameState) -> bool {
        state.rules.draw_count > 0 && !state.stock().is_empty()
    }

    /// Turn up to `draw_count` stock cards onto the waste.
    pub fn try_draw(&self, state: &mut GameState) -> bool {
        if !self.can_draw(state) {
            return false;
        }
        let draw_count = state.rules.draw_count;
        if let Some((stock, waste)) = state.pile_pair_mut(PileId::STOCK, PileId::WASTE) {
            for _ in 0..draw_count {
                if !stock.move_top_to(waste) {
                    break;
                }
                if let Some(card) = waste.top_mut() {
                    card.turn_face_up();
                }
            }
        }
        true
    }

    // === Redeal ===

    #[must_use]
    pub fn can_redeal(&self, state: &GameState) -> bool {
        !state.waste().is_empty() && state.stock().is_empty() && state.has_passes_left()
    }

    /// Recycle the waste into the stock and start the next pass.
    pub fn try_redeal(&self, state: &mut GameState) -> bool {
        if !self.can_redeal(state) {
            return false;
        }
        if let Some((waste, stock)) = state.pile_pair_mut(PileId::WASTE, PileId::STOCK) {
            waste.turn_pile_face_down_to(stock);
        }
        state.pass += 1;
        true
    }

    // === Foundation ===

    #[must_use]
    pub fn can_move_to_foundation(&self, state: &GameState, source: PileId, dest: PileId) -> bool {
        if !dest.is_foundation() {
            return false;
        }
        if !matches!(source.kind(), PileKind::Waste | PileKind::Tableau(_)) {
            return false;
        }
        match state.top(source) {
            Some(card) if card.face_up => accepts_on_foundation(state.pile(dest), card),
            _ => false,
        }
    }

    pub fn try_to_foundation(&self, state: &mut GameState, source: PileId, dest: PileId) -> bool {
        if !self.can_move_to_foundation(state, source, dest) {
            return false;
        }
        state
            .pile_pair_mut(source, dest)
            .is_some_and(|(src, dst)| src.move_top_to(dst))
    }

    // === Tableau ===

    /// Resolve the run start for a tableau move, or `None` if illegal.
    ///
    /// Waste and foundation sources always move their top card, whatever
    /// `start` says.
    fn tableau_run_start(
        &self,
        state: &GameState,
        source: PileId,
        start: Option<usize>,
        dest: PileId,
    ) -> Option<usize> {
        if !dest.is_tableau() || source == dest || source == PileId::STOCK {
            return None;
        }
        let src = state.pile(source);
        let top = src.len().checked_sub(1)?;
        let start = if source.is_tableau() { start? } else { top };
        if !src.is_face_up_from(start) {
            return None;
        }
        let card = src.get(start)?;
        accepts_on_tableau(state.pile(dest), card).then_some(start)
    }

    #[must_use]
    pub fn can_move_to_tableau(
        &self,
        state: &GameState,
        source: PileId,
        start: Option<usize>,
        dest: PileId,
    ) -> bool {
        self.tableau_run_start(state, source, start, dest).is_some()
    }

    /// Move the face-up run `start..top` of `source` onto `dest`.
    pub fn try_to_tableau(
        &self,
        state: &mut GameState,
        source: PileId,
        start: Option<usize>,
        dest: PileId,
    ) -> bool {
        let Some(start) = self.tableau_run_start(state, source, start, dest) else {
            return false;
        };
        state
            .pile_pair_mut(source, dest)
            .is_some_and(|(src, dst)| src.move_subpile_to(start, dst) > 0)
    }

    // === Flip ===

    #[must_use]
    pub fn can_flip(&self, state: &GameState, pile: PileId) -> bool {
        pile.is_tableau() && state.top(pile).is_some_and(|c| !c.face_up)
    }

    pub fn try_flip(&self, state: &mut GameState, pile: PileId) -> bool {
        if !self.can_flip(state, pile) {
            return false;
        }
        if let Some(card) = state.pile_mut(pile).top_mut() {
            card.turn_face_up();
        }
        true
    }
}

impl RulesEngine for KlondikeRules {
    fn is_legal(&self, state: &GameState, mv: &Move) -> bool {
        self.can_move(state, mv)
    }

    fn apply_move(&self, state: &mut GameState, mv: &Move) -> bool {
        self.try_move(state, mv)
    }
}

/// Would `foundation` accept `card` on top?
///
/// An Ace goes on an empty foundation; otherwise the card must match the
/// top's suit and be exactly one rank higher.
#[must_use]
pub fn accepts_on_foundation(foundation: &Pile, card: &Card) -> bool {
    if card.is_unknown() {
        return false;
    }
    match foundation.top() {
        None => card.is_ace(),
        Some(top) => card.suit == top.suit && card.rank == top.rank + 1,
    }
}

/// Would `tableau` accept a run whose bottom card is `card`?
///
/// A King goes on an empty tableau; otherwise the top must be face up, of
/// the opposite color and exactly one rank higher.
#[must_use]
pub fn accepts_on_tableau(tableau: &Pile, card: &Card) -> bool {
    match tableau.top() {
        None => card.is_king(),
        Some(top) => {
            top.face_up && card.is_opposite_color(top) && card.rank + 1 == top.rank
        }
    }
}
