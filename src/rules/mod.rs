//! Move legality.
//!
//! `RulesEngine` is the seam the advisors search through; `KlondikeRules`
//! implements it for draw-three Klondike:
//! - which moves are legal on a given board
//! - how a legal move changes the board
//! - when the game is over

pub mod engine;

pub use engine::{accepts_on_foundation, accepts_on_tableau, GameResult, KlondikeRules, RulesEngine};
