//! Cross-cycle state: the move log and the last-board cache.
//!
//! The only state that survives between decisions. It is an advisory aid;
//! advice is correct without it.

pub mod tracker;

pub use tracker::{HistoryTracker, Oscillation};
