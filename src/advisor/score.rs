//! Move scores: a category plus a tiebreak inside it.
//!
//! Categories are declared from least to most preferred, so the derived
//! `Ord` is the preference order. `value()` maps each category onto the
//! advisory number shown to users; the numbers respect the same order, but
//! comparisons never go through them.
//!
//! | Category | Value |
//! |---|---|
//! | `Flip` | 7.5 |
//! | `Reveal` | 6.0 + 0.2 per face-down card uncovered |
//! | `WasteKingReadiesQueen` | 5.7 |
//! | `TableauKingReadiesQueen` | 5.6 |
//! | `TableauKingOpensRun` | 5.5 |
//! | `Foundation` | 5.0 |
//! | `WasteKingToEmpty` | 4.9 |
//! | `ClearColumnForWasteKing` | 4.8 |
//! | `TableauKingFeedsFoundation` | 4.3 |
//! | `TableauKingToEmpty` | 4.1 |
//! | `WasteToTableau` | 3.9 |
//! | `Draw` | 0.45 |
//! | `Redeal` | 0.1 |
//! | `TableauShuffleFeedsFoundation` | 5e-10 |
//! | `TableauShuffle` | 1e-10 |
//! | `PointlessKingShuffle` | -10.0 |

use serde::{Deserialize, Serialize};

/// Move category, least preferred first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MoveCategory {
    /// King already alone at the bottom of its column moved to another
    /// empty column.
    PointlessKingShuffle,
    TableauShuffle,
    TableauShuffleFeedsFoundation,
    Redeal,
    Draw,
    WasteToTableau,
    TableauKingToEmpty,
    TableauKingFeedsFoundation,
    /// Run move that empties its column while a King waits on the waste.
    ClearColumnForWasteKing,
    WasteKingToEmpty,
    Foundation,
    TableauKingOpensRun,
    TableauKingReadiesQueen,
    WasteKingReadiesQueen,
    /// Run move uncovering face-down cards.
    Reveal,
    /// Face-down tableau top; the column is frozen until it turns.
    Flip,
}

impl MoveCategory {
    /// Advisory value of the category, ignoring any tiebreak.
    #[must_use]
    pub fn base_value(self) -> f64 {
        match self {
            MoveCategory::PointlessKingShuffle => -10.0,
            MoveCategory::TableauShuffle => 1e-10,
            MoveCategory::TableauShuffleFeedsFoundation => 5e-10,
            MoveCategory::Redeal => 0.1,
            MoveCategory::Draw => 0.45,
            MoveCategory::WasteToTableau => 3.9,
            MoveCategory::TableauKingToEmpty => 4.1,
            MoveCategory::TableauKingFeedsFoundation => 4.3,
            MoveCategory::ClearColumnForWasteKing => 4.8,
            MoveCategory::WasteKingToEmpty => 4.9,
            MoveCategory::Foundation => 5.0,
            MoveCategory::TableauKingOpensRun => 5.5,
            MoveCategory::TableauKingReadiesQueen => 5.6,
            MoveCategory::WasteKingReadiesQueen => 5.7,
            MoveCategory::Reveal => 6.0,
            MoveCategory::Flip => 7.5,
        }
    }
}

/// Category plus the number of face-down cards a reveal uncovers.
///
/// Ordering compares the category first, then `reveals`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Score {
    pub category: MoveCategory,
    pub reveals: u8,
}

impl Score {
    #[must_use]
    pub const fn new(category: MoveCategory) -> Self {
        Self {
            category,
            reveals: 0,
        }
    }

    /// A run move uncovering `count` face-down cards.
    #[must_use]
    pub fn reveal(count: usize) -> Self {
        Self {
            category: MoveCategory::Reveal,
            reveals: u8::try_from(count).unwrap_or(u8::MAX),
        }
    }

    /// Numeric advisory value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.category.base_value() + 0.2 * f64::from(self.reveals)
    }

    /// Negatively scored: legal, but worse than doing nothing.
    #[must_use]
    pub fn is_devalued(&self) -> bool {
        self.value() < 0.0
    }
}

impl From<MoveCategory> for Score {
    fn from(category: MoveCategory) -> Self {
        Self::new(category)
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.9}", self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [MoveCategory; 16] = [
        MoveCategory::PointlessKingShuffle,
        MoveCategory::TableauShuffle,
        MoveCategory::TableauShuffleFeedsFoundation,
        MoveCategory::Redeal,
        MoveCategory::Draw,
        MoveCategory::WasteToTableau,
        MoveCategory::TableauKingToEmpty,
        MoveCategory::TableauKingFeedsFoundation,
        MoveCategory::ClearColumnForWasteKing,
        MoveCategory::WasteKingToEmpty,
        MoveCategory::Foundation,
        MoveCategory::TableauKingOpensRun,
        MoveCategory::TableauKingReadiesQueen,
        MoveCategory::WasteKingReadiesQueen,
        MoveCategory::Reveal,
        MoveCategory::Flip,
    ];

    #[test]
    fn test_order_matches_values() {
        for pair in ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].base_value() < pair[1].base_value(), "{:?}", pair);
        }
    }

    #[test]
    fn test_reveal_tiebreak() {
        let one = Score::reveal(1);
        let three = Score::reveal(3);
        assert!(three > one);
        assert!((three.value() - 6.6).abs() < 1e-9);
        assert!(one > Score::new(MoveCategory::Foundation));
        assert!(three < Score::new(MoveCategory::Flip));
    }

    #[test]
    fn test_devalued() {
        assert!(Score::new(MoveCategory::PointlessKingShuffle).is_devalued());
        assert!(!Score::new(MoveCategory::TableauShuffle).is_devalued());
        assert_eq!(Score::new(MoveCategory::Draw).to_string(), "0.450000000");
    }
}
