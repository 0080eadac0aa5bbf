//! Move advisors.
//!
//! Two independent strategies built on the rules engine:
//! - `PriorityAdvisor`: walks fixed priority classes, first legal hit wins
//! - `HeuristicAdvisor`: scores every legal move, best score wins
//!
//! Both are pure functions of the board. History and caching live in
//! `crate::history`.

pub mod score;
pub mod lookahead;
pub mod suggestion;
pub mod priority;
pub mod heuristic;

pub use score::{MoveCategory, Score};
pub use suggestion::{Suggestion, SuggestionKind};
pub use priority::{Advice, PriorityAdvisor};
pub use heuristic::HeuristicAdvisor;
