//! Game state: the 13 piles plus pass bookkeeping.
//!
//! ## Layout
//!
//! | Index | Pile |
//! |---|---|
//! | 0 | stock |
//! | 1 | waste |
//! | 2..=5 | foundations |
//! | 6..=12 | tableaux |
//!
//! A `GameState` is rebuilt from every incoming board snapshot and thrown
//! away after the decision. Piles are persistent vectors, so the advisors
//! clone whole states freely for what-if checks.

use serde::{Deserialize, Serialize};

use super::card::{standard_deck, Card, KING};
use super::config::{PileId, RulesConfig, PILE_COUNT, TABLEAU_COUNT};
use super::pile::Pile;
use super::rng::GameRng;

/// Complete board state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    piles: [Pile; PILE_COUNT],

    /// Draw count and pass limit.
    pub rules: RulesConfig,

    /// Current pass through the stock (starts at 1).
    pub pass: u32,

    /// Set once stock, waste and every tableau are empty.
    pub game_ended: bool,
}

impl GameState {
    /// Empty board on pass 1.
    #[must_use]
    pub fn new(rules: RulesConfig) -> Self {
        Self {
            piles: Default::default(),
            rules,
            pass: 1,
            game_ended: false,
        }
    }

    /// Shuffle a fresh deck and deal it.
    ///
    /// Tableau `i` receives `i + 1` cards with only the last face up; the
    /// remaining 24 cards stay face down in the stock.
    ///
    /// ```
    /// use klondike_advisor::core::{GameRng, GameState, PileId, RulesConfig};
    ///
    /// let state = GameState::deal(RulesConfig::default(), &mut GameRng::new(3));
    /// assert_eq!(state.pile(PileId::STOCK).len(), 24);
    /// assert_eq!(state.pile(PileId::tableau(6)).len(), 7);
    /// assert_eq!(state.total_cards(), 52);
    /// ```
    #[must_use]
    pub fn deal(rules: RulesConfig, rng: &mut GameRng) -> Self {
        let mut state = Self::new(rules);
        let mut stock: Pile = standard_deck().into_iter().collect();
        stock.shuffle(rng);

        for i in 0..TABLEAU_COUNT {
            let tableau = state.pile_mut(PileId::tableau(i));
            stock.move_top_to(tableau);
            if let Some(top) = tableau.top_mut() {
                top.turn_face_up();
            }
            for j in i + 1..TABLEAU_COUNT {
                stock.move_top_to(state.pile_mut(PileId::tableau(j)));
            }
        }

        *state.pile_mut(PileId::STOCK) = stock;
        state
    }

    #[must_use]
    pub fn pile(&self, id: PileId) -> &Pile {
        &self.piles[id.index()]
    }

    pub fn pile_mut(&mut self, id: PileId) -> &mut Pile {
        &mut self.piles[id.index()]
    }

    /// Mutable access to two distinct piles at once.
    ///
    /// Returns `None` when `a == b`.
    pub fn pile_pair_mut(&mut self, a: PileId, b: PileId) -> Option<(&mut Pile, &mut Pile)> {
        let (i, j) = (a.index(), b.index());
        if i == j {
            return None;
        }
        if i < j {
            let (lo, hi) = self.piles.split_at_mut(j);
            Some((&mut lo[i], &mut hi[0]))
        } else {
            let (lo, hi) = self.piles.split_at_mut(i);
            Some((&mut hi[0], &mut lo[j]))
        }
    }

    /// Top card of a pile.
    #[must_use]
    pub fn top(&self, id: PileId) -> Option<&Card> {
        self.pile(id).top()
    }

    /// Iterate `(id, pile)` over all 13 piles.
    pub fn piles(&self) -> impl Iterator<Item = (PileId, &Pile)> {
        PileId::all().zip(self.piles.iter())
    }

    #[must_use]
    pub fn stock(&self) -> &Pile {
        self.pile(PileId::STOCK)
    }

    #[must_use]
    pub fn waste(&self) -> &Pile {
        self.pile(PileId::WASTE)
    }

    /// Cards across all piles, placeholders included.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.piles.iter().map(Pile::len).sum()
    }

    /// All four foundations hold a full suit.
    #[must_use]
    pub fn is_won(&self) -> bool {
        PileId::foundations().all(|id| self.pile(id).len() >= KING as usize)
    }

    /// True when the rules allow recycling the waste at all this pass.
    #[must_use]
    pub fn has_passes_left(&self) -> bool {
        self.pass < self.rules.max_passes
    }

    /// Recompute `game_ended` from the pile contents.
    pub fn update_game_ended(&mut self) {
        self.game_ended = self.stock().is_empty()
            && self.waste().is_empty()
            && PileId::tableaux().all(|id| self.pile(id).is_empty());
    }

    /// Forget the identity of cards a player cannot see.
    ///
    /// Stock cards are scrubbed only on the first pass; afterwards their
    /// order is known from the previous pass through the waste. Face-down
    /// tableau cards are always scrubbed.
    pub fn clear_face_down_cards(&mut self) {
        if self.pass == 1 {
            for card in self.pile_mut(PileId::STOCK).iter_mut() {
                card.clear_identity();
            }
        }
        for id in PileId::tableaux() {
            for card in self.pile_mut(id).iter_mut().filter(|c| !c.face_up) {
                card.clear_identity();
            }
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(RulesConfig::default())
    }
}
