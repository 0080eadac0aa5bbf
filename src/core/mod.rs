//! Core board types: cards, piles, state, moves, snapshots, RNG, configuration.
//!
//! Nothing in here knows the rules of Klondike beyond the pile layout; the
//! `rules` module decides what is legal and the `advisor` module decides
//! what is good.

pub mod card;
pub mod pile;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;
pub mod snapshot;

pub use card::{Card, Color, Suit, ACE, KING, QUEEN};
pub use pile::Pile;
pub use rng::GameRng;
pub use config::{AdvisorConfig, PileId, PileKind, RulesConfig};
pub use action::{Move, MoveKind, MoveList};
pub use state::GameState;
pub use snapshot::{BoardFingerprint, BoardSnapshot, SnapshotPile};
