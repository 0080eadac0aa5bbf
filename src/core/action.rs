//! Move representation: source pile, destination pile, optional run start.
//!
//! The kind of a move is derived from its pile pair rather than stored:
//! - stock -> waste is a draw
//! - waste -> stock is a redeal
//! - a pile onto itself flips its top card
//! - anything onto a foundation or tableau is a card move
//!
//! A run start only matters for tableau destinations; other kinds move the
//! top card.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::config::{PileId, PileKind};
use super::state::GameState;
use crate::error::{Error, Result};

/// Move kinds. Flip covers the tableau top reveal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    Draw,
    Redeal,
    ToFoundation,
    ToTableau,
    Flip,
}

/// A single move as handed to the input layer.
///
/// ## Example
///
/// ```
/// use klondike_advisor::core::{Move, MoveKind, PileId};
///
/// let run = Move::to_tableau(PileId::tableau(0), 2, PileId::tableau(3));
/// assert_eq!(run.kind(), Some(MoveKind::ToTableau));
/// assert_eq!(Move::draw().kind(), Some(MoveKind::Draw));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub source: PileId,
    pub dest: PileId,

    /// First card of the moving run (tableau destinations only).
    pub start: Option<usize>,
}

/// Candidate moves. Rarely more than a dozen on a real board.
pub type MoveList = SmallVec<[Move; 16]>;

impl Move {
    #[must_use]
    pub const fn draw() -> Self {
        Self {
            source: PileId::STOCK,
            dest: PileId::WASTE,
            start: None,
        }
    }

    #[must_use]
    pub const fn redeal() -> Self {
        Self {
            source: PileId::WASTE,
            dest: PileId::STOCK,
            start: None,
        }
    }

    #[must_use]
    pub const fn flip(pile: PileId) -> Self {
        Self {
            source: pile,
            dest: pile,
            start: None,
        }
    }

    #[must_use]
    pub const fn to_foundation(source: PileId, foundation: PileId) -> Self {
        Self {
            source,
            dest: foundation,
            start: None,
        }
    }

    #[must_use]
    pub const fn to_tableau(source: PileId, start: usize, dest: PileId) -> Self {
        Self {
            source,
            dest,
            start: Some(start),
        }
    }

    /// Build a move from raw pile indices, rejecting anything that cannot
    /// address `state`.
    pub fn checked(
        source: usize,
        dest: usize,
        start: Option<usize>,
        state: &GameState,
    ) -> Result<Self> {
        let source = PileId::new(source)?;
        let dest = PileId::new(dest)?;
        if let Some(start) = start {
            let len = state.pile(source).len();
            if start >= len {
                return Err(Error::SubpileOutOfRange {
                    pile: source,
                    start,
                    len,
                });
            }
        }
        Ok(Self { source, dest, start })
    }

    /// Classify by pile pair. `None` for pairs no rule accepts.
    #[must_use]
    pub fn kind(&self) -> Option<MoveKind> {
        match (self.source.kind(), self.dest.kind()) {
            (PileKind::Stock, PileKind::Waste) => Some(MoveKind::Draw),
            (PileKind::Waste, PileKind::Stock) => Some(MoveKind::Redeal),
            _ if self.source == self.dest => Some(MoveKind::Flip),
            (_, PileKind::Foundation(_)) => Some(MoveKind::ToFoundation),
            (_, PileKind::Tableau(_)) => Some(MoveKind::ToTableau),
            _ => None,
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.start {
            Some(start) => write!(f, "{}[{}] -> {}", self.source, start, self.dest),
            None => write!(f, "{} -> {}", self.source, self.dest),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::{Card, Suit};

    #[test]
    fn test_move_kind() {
        assert_eq!(Move::draw().kind(), Some(MoveKind::Draw));
        assert_eq!(Move::redeal().kind(), Some(MoveKind::Redeal));
        assert_eq!(Move::flip(PileId::tableau(2)).kind(), Some(MoveKind::Flip));
        assert_eq!(
            Move::to_foundation(PileId::WASTE, PileId::foundation(1)).kind(),
            Some(MoveKind::ToFoundation)
        );
        assert_eq!(
            Move::to_tableau(PileId::tableau(0), 0, PileId::tableau(1)).kind(),
            Some(MoveKind::ToTableau)
        );

        let to_waste = Move::to_foundation(PileId::tableau(0), PileId::WASTE);
        assert_eq!(to_waste.kind(), None);
    }

    #[test]
    fn test_checked_rejects_bad_indices() {
        let mut state = GameState::default();
        state.pile_mut(PileId::tableau(0)).add_to_top(Card::up(5, Suit::Clubs));

        assert!(Move::checked(6, 7, Some(0), &state).is_ok());
        assert!(matches!(
            Move::checked(13, 7, None, &state),
            Err(Error::PileOutOfRange(13))
        ));
        assert!(matches!(
            Move::checked(6, 7, Some(1), &state),
            Err(Error::SubpileOutOfRange { start: 1, len: 1, .. })
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(Move::draw().to_string(), "Stock -> Waste");
        assert_eq!(
            Move::to_tableau(PileId::tableau(1), 3, PileId::tableau(4)).to_string(),
            "T1[3] -> T4"
        );
    }

    #[test]
    fn test_move_serde() {
        let mv = Move::to_tableau(PileId::tableau(0), 1, PileId::tableau(2));
        let json = serde_json::to_string(&mv).unwrap();
        assert_eq!(json, r#"{"source":6,"dest":8,"start":1}"#);
        let back: Move = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mv);
    }
}
