//! Playing cards: rank, suit and face orientation.
//!
//! Ranks are plain integers with `0` reserved for the unknown placeholder,
//! `1` for the Ace and `11..=13` for the court cards. Suits follow the
//! board-reader numbering (`0` unknown, then spade, heart, diamond, club)
//! and serialize as those integers.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Placeholder rank for a card whose identity is hidden.
pub const UNKNOWN_RANK: u8 = 0;
/// Ace (low).
pub const ACE: u8 = 1;
/// Jack.
pub const JACK: u8 = 11;
/// Queen.
pub const QUEEN: u8 = 12;
/// King.
pub const KING: u8 = 13;

/// Number of cards in a complete deck.
pub const DECK_SIZE: usize = 52;

/// Card suit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Suit {
    /// Hidden card.
    #[default]
    Unknown = 0,
    Spades = 1,
    Hearts = 2,
    Diamonds = 3,
    Clubs = 4,
}

impl Suit {
    /// The four real suits in board-reader order.
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    /// Color of the suit, `None` for an unknown suit.
    #[must_use]
    pub const fn color(self) -> Option<Color> {
        match self {
            Suit::Spades | Suit::Clubs => Some(Color::Black),
            Suit::Hearts | Suit::Diamonds => Some(Color::Red),
            Suit::Unknown => None,
        }
    }

    /// Single-character symbol used in labels.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Suit::Spades => '\u{2660}',
            Suit::Hearts => '\u{2665}',
            Suit::Diamonds => '\u{2666}',
            Suit::Clubs => '\u{2663}',
            Suit::Unknown => '?',
        }
    }
}

impl TryFrom<u8> for Suit {
    type Error = Error;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(Suit::Unknown),
            1 => Ok(Suit::Spades),
            2 => Ok(Suit::Hearts),
            3 => Ok(Suit::Diamonds),
            4 => Ok(Suit::Clubs),
            other => Err(Error::InvalidSuit(other)),
        }
    }
}

impl From<Suit> for u8 {
    fn from(suit: Suit) -> Self {
        suit as u8
    }
}

/// Card color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    Red,
}

/// A single card.
///
/// Cards are plain values; piles own them and flip them in place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// `0` unknown, `1` Ace .. `13` King.
    pub rank: u8,
    pub suit: Suit,
    #[serde(rename = "faceUp", alias = "face_up")]
    pub face_up: bool,
}

impl Card {
    /// Create a card.
    #[must_use]
    pub const fn new(rank: u8, suit: Suit, face_up: bool) -> Self {
        Self { rank, suit, face_up }
    }

    /// A visible card.
    #[must_use]
    pub const fn up(rank: u8, suit: Suit) -> Self {
        Self::new(rank, suit, true)
    }

    /// A known but face-down card.
    #[must_use]
    pub const fn down(rank: u8, suit: Suit) -> Self {
        Self::new(rank, suit, false)
    }

    /// The hidden placeholder `{rank 0, suit 0, face down}`.
    #[must_use]
    pub const fn unknown() -> Self {
        Self::new(UNKNOWN_RANK, Suit::Unknown, false)
    }

    /// True if rank or suit is not known.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.rank == UNKNOWN_RANK || self.suit == Suit::Unknown
    }

    #[must_use]
    pub fn is_ace(&self) -> bool {
        self.rank == ACE
    }

    #[must_use]
    pub fn is_king(&self) -> bool {
        self.rank == KING
    }

    #[must_use]
    pub fn is_queen(&self) -> bool {
        self.rank == QUEEN
    }

    /// Color of the card, `None` when the suit is unknown.
    #[must_use]
    pub fn color(&self) -> Option<Color> {
        self.suit.color()
    }

    /// True if both colors are known and differ.
    #[must_use]
    pub fn is_opposite_color(&self, other: &Card) -> bool {
        match (self.color(), other.color()) {
            (Some(a), Some(b)) => a != b,
            _ => false,
        }
    }

    /// True if both colors are known and equal.
    #[must_use]
    pub fn is_same_color(&self, other: &Card) -> bool {
        match (self.color(), other.color()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    pub fn turn_face_up(&mut self) {
        self.face_up = true;
    }

    pub fn turn_face_down(&mut self) {
        self.face_up = false;
    }

    /// Forget rank and suit, keeping the orientation.
    pub fn clear_identity(&mut self) {
        self.rank = UNKNOWN_RANK;
        self.suit = Suit::Unknown;
    }

    /// Short rank text: `A`, `2`..`10`, `J`, `Q`, `K`, or `?`.
    #[must_use]
    pub fn rank_str(&self) -> String {
        match self.rank {
            UNKNOWN_RANK => "?".to_string(),
            ACE => "A".to_string(),
            JACK => "J".to_string(),
            QUEEN => "Q".to_string(),
            KING => "K".to_string(),
            n => n.to_string(),
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_unknown() {
            return write!(f, "?");
        }
        write!(f, "{}{}", self.rank_str(), self.suit.symbol())
    }
}

/// All 52 cards face down, suit by suit, Ace to King.
#[must_use]
pub fn standard_deck() -> Vec<Card> {
    Suit::ALL
        .iter()
        .flat_map(|&suit| (ACE..=KING).map(move |rank| Card::down(rank, suit)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colors() {
        assert_eq!(Suit::Spades.color(), Some(Color::Black));
        assert_eq!(Suit::Clubs.color(), Some(Color::Black));
        assert_eq!(Suit::Hearts.color(), Some(Color::Red));
        assert_eq!(Suit::Diamonds.color(), Some(Color::Red));
        assert_eq!(Suit::Unknown.color(), None);
    }

    #[test]
    fn test_opposite_color_needs_known_suits() {
        let red = Card::up(5, Suit::Hearts);
        let black = Card::up(6, Suit::Clubs);
        assert!(red.is_opposite_color(&black));
        assert!(!red.is_opposite_color(&Card::up(6, Suit::Diamonds)));
        assert!(!red.is_opposite_color(&Card::unknown()));
        assert!(!Card::unknown().is_same_color(&Card::unknown()));
    }

    #[test]
    fn test_display() {
        assert_eq!(Card::up(ACE, Suit::Spades).to_string(), "A\u{2660}");
        assert_eq!(Card::up(10, Suit::Hearts).to_string(), "10\u{2665}");
        assert_eq!(Card::up(KING, Suit::Clubs).to_string(), "K\u{2663}");
        assert_eq!(Card::unknown().to_string(), "?");
    }

    #[test]
    fn test_standard_deck() {
        let deck = standard_deck();
        assert_eq!(deck.len(), DECK_SIZE);
        assert!(deck.iter().all(|c| !c.face_up && !c.is_unknown()));
        assert_eq!(deck[0], Card::down(ACE, Suit::Spades));
        assert_eq!(deck[51], Card::down(KING, Suit::Clubs));
    }

    #[test]
    fn test_clear_identity() {
        let mut card = Card::down(7, Suit::Diamonds);
        card.clear_identity();
        assert_eq!(card, Card::unknown());
    }

    #[test]
    fn test_suit_serde_as_integer() {
        let card = Card::up(12, Suit::Hearts);
        let json = serde_json::to_string(&card).unwrap();
        assert_eq!(json, r#"{"rank":12,"suit":2,"faceUp":true}"#);

        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(back, card);

        assert!(serde_json::from_str::<Card>(r#"{"rank":1,"suit":9,"faceUp":true}"#).is_err());
    }
}
