//! Ordered card piles.
//!
//! Index 0 is the bottom of the pile and the last index is the top, the
//! only directly accessible card. Multi-card tableau moves relocate the
//! contiguous run from a start index to the top.
//!
//! Cards are stored in an `im::Vector`, so cloning a pile is O(1) and
//! a cloned pile copies only the chunks it later mutates. Lookahead code
//! relies on this to take throwaway copies of a whole game state.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::card::Card;
use super::rng::GameRng;

/// An ordered stack of cards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pile {
    cards: Vector<Card>,
}

impl Pile {
    /// Create an empty pile.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Card at `index` (0 = bottom).
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    /// Peek at the top card.
    #[must_use]
    pub fn top(&self) -> Option<&Card> {
        self.cards.back()
    }

    /// Mutable access to the top card.
    pub fn top_mut(&mut self) -> Option<&mut Card> {
        self.cards.back_mut()
    }

    /// Iterate bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &Card> + '_ {
        self.cards.iter()
    }

    pub fn add_to_top(&mut self, card: Card) {
        self.cards.push_back(card);
    }

    pub fn remove_top_card(&mut self) -> Option<Card> {
        self.cards.pop_back()
    }

    /// Pop the top card and push it onto `dest`.
    ///
    /// Returns false if this pile is empty.
    pub fn move_top_to(&mut self, dest: &mut Pile) -> bool {
        match self.cards.pop_back() {
            Some(card) => {
                dest.cards.push_back(card);
                true
            }
            None => false,
        }
    }

    /// Relocate the run `start..top` onto `dest`, preserving its order.
    ///
    /// Returns the number of cards moved (0 when `start` is past the top).
    pub fn move_subpile_to(&mut self, start: usize, dest: &mut Pile) -> usize {
        if start >= self.cards.len() {
            return 0;
        }
        let run = self.cards.split_off(start);
        let moved = run.len();
        dest.cards.append(run);
        moved
    }

    /// Move every card onto `dest` one at a time, turning each face down.
    ///
    /// The order reverses, which is exactly how a waste pile is recycled
    /// into the stock.
    pub fn turn_pile_face_down_to(&mut self, dest: &mut Pile) {
        while let Some(mut card) = self.cards.pop_back() {
            card.turn_face_down();
            dest.cards.push_back(card);
        }
    }

    /// Fisher-Yates shuffle.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        for i in (1..self.cards.len()).rev() {
            let j = rng.gen_range_usize(0..i + 1);
            self.cards.swap(i, j);
        }
    }

    /// Index of the lowest face-up card, if any.
    #[must_use]
    pub fn first_face_up(&self) -> Option<usize> {
        self.cards.iter().position(|c| c.face_up)
    }

    /// Face-down cards under the playable part of the pile.
    ///
    /// A pile whose top is face down counts every card.
    #[must_use]
    pub fn num_face_down(&self) -> usize {
        match self.top() {
            None => 0,
            Some(top) if !top.face_up => self.len(),
            Some(_) => self.first_face_up().unwrap_or(0),
        }
    }

    /// Contiguous face-down cards directly beneath `start`.
    #[must_use]
    pub fn face_down_beneath(&self, start: usize) -> usize {
        (0..start.min(self.len()))
            .rev()
            .take_while(|&i| !self.cards[i].face_up)
            .count()
    }

    /// True if every card from `start` to the top is face up.
    #[must_use]
    pub fn is_face_up_from(&self, start: usize) -> bool {
        start < self.len() && self.cards.iter().skip(start).all(|c| c.face_up)
    }

    /// Mutable iteration, bottom to top.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Card> + '_ {
        self.cards.iter_mut()
    }
}

impl FromIterator<Card> for Pile {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self {
            cards: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::{Suit, KING, QUEEN};

    fn pile(cards: &[Card]) -> Pile {
        cards.iter().copied().collect()
    }

    #[test]
    fn test_stack_ops() {
        let mut p = Pile::new();
        assert!(p.top().is_none());
        assert!(p.remove_top_card().is_none());

        p.add_to_top(Card::up(3, Suit::Hearts));
        p.add_to_top(Card::up(4, Suit::Clubs));
        assert_eq!(p.len(), 2);
        assert_eq!(p.top(), Some(&Card::up(4, Suit::Clubs)));
        assert_eq!(p.remove_top_card(), Some(Card::up(4, Suit::Clubs)));
        assert_eq!(p.len(), 1);
    }

    #[test]
    fn test_move_top_to() {
        let mut src = pile(&[Card::up(1, Suit::Spades)]);
        let mut dst = Pile::new();
        assert!(src.move_top_to(&mut dst));
        assert!(!src.move_top_to(&mut dst));
        assert_eq!(dst.top(), Some(&Card::up(1, Suit::Spades)));
    }

    #[test]
    fn test_move_subpile_preserves_order() {
        let mut src = pile(&[
            Card::unknown(),
            Card::up(9, Suit::Spades),
            Card::up(8, Suit::Hearts),
            Card::up(7, Suit::Clubs),
        ]);
        let mut dst = pile(&[Card::up(10, Suit::Diamonds)]);

        assert_eq!(src.move_subpile_to(1, &mut dst), 3);
        assert_eq!(src.len(), 1);
        let moved: Vec<_> = dst.iter().map(|c| c.rank).collect();
        assert_eq!(moved, vec![10, 9, 8, 7]);

        assert_eq!(src.move_subpile_to(5, &mut dst), 0);
    }

    #[test]
    fn test_turn_pile_face_down_reverses() {
        let mut waste = pile(&[
            Card::up(1, Suit::Spades),
            Card::up(2, Suit::Spades),
            Card::up(3, Suit::Spades),
        ]);
        let mut stock = Pile::new();
        waste.turn_pile_face_down_to(&mut stock);

        assert!(waste.is_empty());
        let ranks: Vec<_> = stock.iter().map(|c| c.rank).collect();
        assert_eq!(ranks, vec![3, 2, 1]);
        assert!(stock.iter().all(|c| !c.face_up));
    }

    #[test]
    fn test_face_down_counts() {
        let p = pile(&[
            Card::unknown(),
            Card::unknown(),
            Card::up(KING, Suit::Spades),
            Card::up(QUEEN, Suit::Hearts),
        ]);
        assert_eq!(p.first_face_up(), Some(2));
        assert_eq!(p.num_face_down(), 2);
        assert_eq!(p.face_down_beneath(2), 2);
        assert_eq!(p.face_down_beneath(3), 0);
        assert!(p.is_face_up_from(2));
        assert!(!p.is_face_up_from(1));
        assert!(!p.is_face_up_from(4));

        let all_down = pile(&[Card::unknown(), Card::unknown()]);
        assert_eq!(all_down.num_face_down(), 2);
        assert_eq!(Pile::new().num_face_down(), 0);
    }

    #[test]
    fn test_shuffle_keeps_cards() {
        let mut rng = GameRng::new(7);
        let mut p: Pile = crate::core::card::standard_deck().into_iter().collect();
        let before = p.clone();
        p.shuffle(&mut rng);

        assert_eq!(p.len(), before.len());
        assert_ne!(p, before);
        let mut a: Vec<_> = p.iter().map(|c| (c.suit as u8, c.rank)).collect();
        let mut b: Vec<_> = before.iter().map(|c| (c.suit as u8, c.rank)).collect();
        a.sort_unstable();
        b.sort_unstable();
        assert_eq!(a, b);
    }

    #[test]
    fn test_clone_is_independent() {
        let original = pile(&[Card::up(5, Suit::Hearts), Card::up(4, Suit::Spades)]);
        let mut copy = original.clone();
        copy.remove_top_card();
        assert_eq!(original.len(), 2);
        assert_eq!(copy.len(), 1);
    }
}
