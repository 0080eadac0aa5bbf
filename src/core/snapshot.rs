//! Board snapshots: the input contract from the board reader.
//!
//! A `BoardSnapshot` lists the piles the reader could see. Piles it leaves
//! out are empty, and when the stock is not listed its size is inferred as
//! 52 minus every other card on the board. Hidden cards arrive as the
//! `{rank 0, suit 0, face down}` placeholder.
//!
//! Conversion into a `GameState` is the one place malformed input is
//! rejected; after that the rules engine trusts the board.
//!
//! ```
//! use klondike_advisor::core::{BoardSnapshot, Card, PileId, RulesConfig, Suit};
//!
//! let snapshot = BoardSnapshot::new()
//!     .with_pile(PileId::WASTE, vec![Card::up(1, Suit::Spades)])
//!     .with_pile(PileId::tableau(0), vec![Card::unknown(), Card::up(9, Suit::Hearts)]);
//!
//! let state = snapshot.to_state(RulesConfig::default()).unwrap();
//! assert_eq!(state.stock().len(), 49);
//! assert_eq!(state.total_cards(), 52);
//! ```

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::card::{Card, DECK_SIZE, KING};
use super::config::{PileId, RulesConfig};
use super::pile::Pile;
use super::state::GameState;
use crate::error::{Error, Result};

/// One pile as read from the board, bottom card first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotPile {
    /// Raw pile index, validated on conversion.
    pub id: usize,
    pub cards: Vec<Card>,
}

/// Visible board as produced by the reader.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    #[serde(default)]
    pub piles: Vec<SnapshotPile>,

    /// Current pass through the stock.
    #[serde(default = "first_pass")]
    pub pass: u32,

    /// Card the page has already picked up, if any.
    #[serde(default)]
    pub selected: Option<Card>,
}

fn first_pass() -> u32 {
    1
}

impl Default for BoardSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardSnapshot {
    /// Empty snapshot on pass 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            piles: Vec::new(),
            pass: first_pass(),
            selected: None,
        }
    }

    #[must_use]
    pub fn with_pile(mut self, id: PileId, cards: Vec<Card>) -> Self {
        self.piles.push(SnapshotPile {
            id: id.index(),
            cards,
        });
        self
    }

    #[must_use]
    pub fn with_pass(mut self, pass: u32) -> Self {
        self.pass = pass;
        self
    }

    #[must_use]
    pub fn with_selected(mut self, card: Card) -> Self {
        self.selected = Some(card);
        self
    }

    /// Capture the visible parts of an existing state.
    #[must_use]
    pub fn from_state(state: &GameState) -> Self {
        Self {
            piles: state
                .piles()
                .filter(|(_, pile)| !pile.is_empty())
                .map(|(id, pile)| SnapshotPile {
                    id: id.index(),
                    cards: pile.iter().copied().collect(),
                })
                .collect(),
            pass: state.pass,
            selected: None,
        }
    }

    /// Validate and convert into a fresh `GameState`.
    ///
    /// Rejects invalid rules, a pass outside `1..=max_passes`, pile ids
    /// outside the layout, piles listed twice, ranks above King, known
    /// cards seen twice and boards holding more than one deck. Face-down
    /// identities are scrubbed from the result.
    pub fn to_state(&self, rules: RulesConfig) -> Result<GameState> {
        self.build_state(rules).map_err(|err| {
            tracing::warn!(error = %err, "rejected board snapshot");
            err
        })
    }

    fn build_state(&self, rules: RulesConfig) -> Result<GameState> {
        rules.validate()?;
        rules.check_pass(self.pass)?;

        let mut state = GameState::new(rules);
        state.pass = self.pass;

        let mut seen_piles = FxHashSet::default();
        let mut seen_cards = FxHashSet::default();

        for entry in &self.piles {
            let id = PileId::new(entry.id)?;
            if !seen_piles.insert(id) {
                return Err(Error::DuplicatePile(id));
            }
            for card in &entry.cards {
                if card.rank > KING {
                    return Err(Error::InvalidRank(card.rank));
                }
                if !card.is_unknown() && !seen_cards.insert((card.rank, card.suit)) {
                    return Err(Error::DuplicateCard(*card));
                }
            }
            *state.pile_mut(id) = entry.cards.iter().copied().collect::<Pile>();
        }

        let total = state.total_cards();
        if total > DECK_SIZE {
            return Err(Error::TooManyCards(total));
        }
        if !seen_piles.contains(&PileId::STOCK) {
            let stock = state.pile_mut(PileId::STOCK);
            for _ in 0..DECK_SIZE - total {
                stock.add_to_top(Card::unknown());
            }
        }

        state.clear_face_down_cards();
        state.update_game_ended();
        Ok(state)
    }

    /// Fingerprint of what this snapshot shows, for change detection.
    pub fn fingerprint(&self, rules: RulesConfig) -> Result<BoardFingerprint> {
        let state = self.to_state(rules)?;
        Ok(BoardFingerprint::of(&state, self.selected))
    }
}

/// Compact identity of a board for the snapshot cache.
///
/// Covers the waste top, foundation tops, tableau tops, stock size and the
/// selected card. Two snapshots with equal fingerprints produce the same
/// advice.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardFingerprint(String);

#[derive(Serialize)]
struct FingerprintView {
    waste: Option<Card>,
    foundations: Vec<Option<Card>>,
    tableau_tops: Vec<Option<Card>>,
    stock: usize,
    selected: Option<Card>,
}

impl BoardFingerprint {
    #[must_use]
    pub fn of(state: &GameState, selected: Option<Card>) -> Self {
        let view = FingerprintView {
            waste: state.waste().top().copied(),
            foundations: PileId::foundations().map(|id| state.top(id).copied()).collect(),
            tableau_tops: PileId::tableaux().map(|id| state.top(id).copied()).collect(),
            stock: state.stock().len(),
            selected,
        };
        // Serializing plain data with derived impls cannot fail.
        Self(serde_json::to_string(&view).unwrap_or_default())
    }

    /// Rebuild from persisted text.
    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BoardFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
