//! Advisor output: what to do next, a label for people, and a canonical
//! descriptor for the history log.
//!
//! Labels use the short board notation (`7♥ -> 8♣`, `2♦ -> A♦ (F0)`);
//! descriptors spell the move out (`Move 7♥ from T1 to T3 on 8♣`) so equal
//! moves always compare equal in the history.

use serde::{Deserialize, Serialize};

use super::score::Score;
use crate::core::action::{Move, MoveKind};
use crate::core::config::{PileId, PileKind};
use crate::core::state::GameState;

/// What a suggestion asks the input layer to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SuggestionKind {
    Draw,
    Redeal,
    Foundation,
    Tableau,
    Flip,
    /// The game is won; collect.
    Collect,
    /// Nothing legal. The caller routes this to its recovery path.
    NoMove,
}

impl SuggestionKind {
    /// True for kinds that carry a move.
    #[must_use]
    pub fn is_move(self) -> bool {
        !matches!(self, SuggestionKind::Collect | SuggestionKind::NoMove)
    }
}

/// A recommended action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub label: String,

    /// Present on heuristic suggestions only.
    pub score: Option<Score>,

    /// The move to perform, absent for `Collect` and `NoMove`.
    #[serde(rename = "move")]
    pub mv: Option<Move>,

    /// Canonical history text, absent for `Collect` and `NoMove`.
    pub descriptor: Option<String>,
}

impl Suggestion {
    /// Describe `mv` as seen on `state` before it is played.
    #[must_use]
    pub fn for_move(state: &GameState, mv: Move, score: Option<Score>) -> Self {
        let (kind, label, descriptor) = describe(state, &mv);
        Self {
            kind,
            label,
            score,
            mv: Some(mv),
            descriptor: Some(descriptor),
        }
    }

    #[must_use]
    pub fn collect() -> Self {
        Self::terminal(SuggestionKind::Collect, "Collect Winnings")
    }

    #[must_use]
    pub fn no_move() -> Self {
        Self::terminal(SuggestionKind::NoMove, "No move available")
    }

    fn terminal(kind: SuggestionKind, label: &str) -> Self {
        Self {
            kind,
            label: label.to_string(),
            score: None,
            mv: None,
            descriptor: None,
        }
    }

    /// Numeric score, if any.
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        self.score.map(|s| s.value())
    }

    /// Worth recording in the history log.
    ///
    /// Every move counts except heuristic ones scoring at or below `floor`.
    #[must_use]
    pub fn is_significant(&self, floor: f64) -> bool {
        self.kind.is_move() && self.value().map_or(true, |v| v > floor)
    }
}

impl std::fmt::Display for Suggestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.score {
            Some(score) => write!(f, "[{}] {}", score, self.label),
            None => f.write_str(&self.label),
        }
    }
}

fn source_name(id: PileId) -> String {
    match id.kind() {
        PileKind::Waste => "Waste".to_string(),
        _ => id.to_string(),
    }
}

fn describe(state: &GameState, mv: &Move) -> (SuggestionKind, String, String) {
    let card = |id: PileId, index: Option<usize>| {
        let pile = state.pile(id);
        index
            .filter(|_| id.is_tableau())
            .and_then(|i| pile.get(i))
            .or_else(|| pile.top())
            .map(ToString::to_string)
            .unwrap_or_else(|| "?".to_string())
    };

    match mv.kind() {
        Some(MoveKind::Draw) => (SuggestionKind::Draw, "Draw".into(), "Draw".into()),
        Some(MoveKind::Redeal) => (SuggestionKind::Redeal, "Redeal".into(), "Redeal".into()),
        Some(MoveKind::Flip) => (
            SuggestionKind::Flip,
            format!("Flip top card {}", mv.source),
            format!("Flip {}", mv.source),
        ),
        Some(MoveKind::ToFoundation) => {
            let moving = card(mv.source, None);
            let n = match mv.dest.kind() {
                PileKind::Foundation(n) => n,
                _ => 0,
            };
            let label = match state.top(mv.dest) {
                Some(top) => format!("{} -> {} ({})", moving, top, mv.dest),
                None => format!("{} -> {}", moving, mv.dest),
            };
            let descriptor = format!(
                "Move {} from {} to Foundation {}",
                moving,
                source_name(mv.source),
                n
            );
            (SuggestionKind::Foundation, label, descriptor)
        }
        Some(MoveKind::ToTableau) | None => {
            let moving = card(mv.source, mv.start);
            let (label, descriptor) = match state.top(mv.dest) {
                Some(top) => (
                    format!("{} -> {}", moving, top),
                    format!(
                        "Move {} from {} to {} on {}",
                        moving,
                        source_name(mv.source),
                        mv.dest,
                        top
                    ),
                ),
                None => (
                    format!("{} -> {}", moving, mv.dest),
                    format!("Move {} from {} to empty {}", moving, source_name(mv.source), mv.dest),
                ),
            };
            (SuggestionKind::Tableau, label, descriptor)
        }
    }
}
