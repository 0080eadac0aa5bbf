//! Crate error type.
//!
//! Errors only arise at the boundaries: converting an incoming board
//! snapshot, building pile ids or moves from raw integers, parsing the
//! persisted history log and parsing configuration. Move legality is never
//! an error; the rules engine answers with `bool`.

use thiserror::Error;

use crate::core::card::Card;
use crate::core::config::{PileId, MAX_HISTORY_CAPACITY};

/// Errors raised at the crate boundary.
#[derive(Debug, Error)]
pub enum Error {
    #[error("pile index {0} is outside the 13-pile layout")]
    PileOutOfRange(usize),

    #[error("pile {0} appears more than once in the snapshot")]
    DuplicatePile(PileId),

    #[error("card rank {0} is outside 0..=13")]
    InvalidRank(u8),

    #[error("card suit {0} is outside 0..=4")]
    InvalidSuit(u8),

    #[error("card {0} appears more than once among known cards")]
    DuplicateCard(Card),

    #[error("snapshot holds {0} cards, more than a single deck")]
    TooManyCards(usize),

    #[error("subpile start {start} is out of bounds for pile {pile} of length {len}")]
    SubpileOutOfRange { pile: PileId, start: usize, len: usize },

    #[error("draw count must be at least 1")]
    InvalidDrawCount,

    #[error("max passes must be at least 1")]
    InvalidMaxPasses,

    #[error("pass {pass} is outside 1..={max_passes}")]
    PassOutOfRange { pass: u32, max_passes: u32 },

    #[error("history capacity {0} exceeds the limit of {max}", max = MAX_HISTORY_CAPACITY)]
    HistoryCapacity(usize),

    #[error("malformed history record: {0}")]
    MalformedHistory(String),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, Error>;
