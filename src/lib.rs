//! # klondike-advisor
//!
//! Decides the next move in draw-three Klondike solitaire from a snapshot
//! of the visible board.
//!
//! ## Design Principles
//!
//! 1. **Stateless Decisions**: every cycle rebuilds a `GameState` from the
//!    incoming snapshot. Only the move history survives between cycles.
//!
//! 2. **Legality Is a Predicate**: illegal moves return `false` and the
//!    caller tries the next candidate. Errors are reserved for malformed
//!    input at the boundary.
//!
//! 3. **Ordered Categories Over Magic Numbers**: heuristic scores compare
//!    by category first; the advisory numbers are for display.
//!
//! ## Architecture
//!
//! - **Persistent Piles**: piles are `im` vectors, so what-if checks clone
//!   the whole board in O(1) and copy only the piles a move touches.
//!
//! - **Two Strategies**: a fixed-priority advisor and a scoring advisor,
//!   both built on the same `RulesEngine`.
//!
//! ## Modules
//!
//! - `core`: cards, piles, state, moves, snapshots, RNG, configuration
//! - `rules`: `RulesEngine` trait and `KlondikeRules`
//! - `advisor`: priority and heuristic advisors, scores, suggestions
//! - `history`: move log, oscillation detection, snapshot cache
//! - `session`: one decision cycle from snapshot to suggestion
//! - `error`: boundary errors

pub mod core;
pub mod error;
pub mod rules;
pub mod advisor;
pub mod history;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    AdvisorConfig, BoardFingerprint, BoardSnapshot, Card, Color, GameRng, GameState, Move,
    MoveKind, MoveList, Pile, PileId, PileKind, RulesConfig, SnapshotPile, Suit,
};

pub use crate::error::{Error, Result};

pub use crate::rules::{GameResult, KlondikeRules, RulesEngine};

pub use crate::advisor::{
    Advice, HeuristicAdvisor, MoveCategory, PriorityAdvisor, Score, Suggestion, SuggestionKind,
};

pub use crate::history::{HistoryTracker, Oscillation};

pub use crate::session::{AdvisorSession, DecisionRequest, DecisionResult, Strategy};
