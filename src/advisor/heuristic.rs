//! Score every legal move and pick the best.
//!
//! Candidates come from `RulesEngine::legal_moves`, so their order is the
//! engine's advisory order and ties go to the first one found. Enablement
//! checks (Queen ready, run ready, foundation ready) look a single move
//! ahead on a cloned board; nothing here searches deeper.

use super::lookahead::{exposes_foundation_card, opens_run, queen_ready, simulate};
use super::score::{MoveCategory, Score};
use super::suggestion::Suggestion;
use crate::core::action::{Move, MoveKind};
use crate::core::config::{AdvisorConfig, PileKind};
use crate::core::state::GameState;
use crate::rules::{KlondikeRules, RulesEngine};

/// Heuristic advisor.
#[derive(Clone, Copy, Debug)]
pub struct HeuristicAdvisor {
    rules: KlondikeRules,
    surface_devalued_moves: bool,
}

impl Default for HeuristicAdvisor {
    fn default() -> Self {
        Self {
            rules: KlondikeRules::new(),
            surface_devalued_moves: true,
        }
    }
}

impl HeuristicAdvisor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_config(config: &AdvisorConfig) -> Self {
        Self::default().with_devalued_moves(config.surface_devalued_moves)
    }

    /// Whether a negatively scored move may be suggested when it is the
    /// best on the board. When false the advisor reports `NoMove` instead.
    #[must_use]
    pub fn with_devalued_moves(mut self, surface: bool) -> Self {
        self.surface_devalued_moves = surface;
        self
    }

    /// Score a legal move against the board it would be played on.
    ///
    /// Returns `None` for moves the advisor never suggests (foundation
    /// back to tableau) and for illegal moves.
    #[must_use]
    pub fn score_move(&self, state: &GameState, mv: &Move) -> Option<Score> {
        if !self.rules.can_move(state, mv) {
            return None;
        }
        let category = match mv.kind()? {
            MoveKind::Flip => MoveCategory::Flip,
            MoveKind::Draw => MoveCategory::Draw,
            MoveKind::Redeal => MoveCategory::Redeal,
            MoveKind::ToFoundation => MoveCategory::Foundation,
            MoveKind::ToTableau => match mv.source.kind() {
                PileKind::Waste => self.score_waste_to_tableau(state, mv),
                PileKind::Tableau(_) => return self.score_run(state, mv),
                _ => return None,
            },
        };
        Some(Score::new(category))
    }

    fn score_waste_to_tableau(&self, state: &GameState, mv: &Move) -> MoveCategory {
        if !state.pile(mv.dest).is_empty() {
            return MoveCategory::WasteToTableau;
        }
        let ready = simulate(&self.rules, state, mv).is_some_and(|after| queen_ready(&after, mv.dest));
        if ready {
            MoveCategory::WasteKingReadiesQueen
        } else {
            MoveCategory::WasteKingToEmpty
        }
    }

    fn score_run(&self, state: &GameState, mv: &Move) -> Option<Score> {
        let start = mv.start?;
        let after = simulate(&self.rules, state, mv)?;

        if state.pile(mv.dest).is_empty() {
            let category = if start == 0 {
                MoveCategory::PointlessKingShuffle
            } else if queen_ready(&after, mv.dest) {
                MoveCategory::TableauKingReadiesQueen
            } else if opens_run(&after, mv.source, mv.dest) {
                MoveCategory::TableauKingOpensRun
            } else if exposes_foundation_card(&after, mv.source) {
                MoveCategory::TableauKingFeedsFoundation
            } else {
                MoveCategory::TableauKingToEmpty
            };
            return Some(Score::new(category));
        }

        let reveals = state.pile(mv.source).face_down_beneath(start);
        let waste_king = state.waste().top().is_some_and(|c| c.face_up && c.is_king());

        let score = if start == 0 && waste_king {
            Score::new(MoveCategory::ClearColumnForWasteKing)
        } else if reveals > 0 {
            Score::reveal(reveals)
        } else if exposes_foundation_card(&after, mv.source) {
            Score::new(MoveCategory::TableauShuffleFeedsFoundation)
        } else {
            Score::new(MoveCategory::TableauShuffle)
        };
        Some(score)
    }

    /// Every suggestible legal move with its score, in discovery order.
    #[must_use]
    pub fn scored_moves(&self, state: &GameState) -> Vec<(Move, Score)> {
        self.rules
            .legal_moves(state)
            .into_iter()
            .filter_map(|mv| {
                let score = self.score_move(state, &mv)?;
                tracing::trace!(mv = %mv, score = %score, "scored candidate");
                Some((mv, score))
            })
            .collect()
    }

    /// Highest-scoring move; the first one found wins ties.
    #[must_use]
    pub fn best_move(&self, state: &GameState) -> Option<(Move, Score)> {
        self.scored_moves(state)
            .into_iter()
            .fold(None, |best, (mv, score)| match best {
                Some((_, best_score)) if best_score >= score => best,
                _ => Some((mv, score)),
            })
    }

    /// Recommend the next action for `state`.
    #[must_use]
    pub fn advise(&self, state: &GameState) -> Suggestion {
        if let Some(result) = self.rules.is_terminal(state) {
            tracing::info!(result = ?result, "game over");
            return if result.is_win() {
                Suggestion::collect()
            } else {
                Suggestion::no_move()
            };
        }

        match self.best_move(state) {
            Some((_, score)) if score.is_devalued() && !self.surface_devalued_moves => {
                tracing::info!(score = %score, "only devalued moves remain");
                Suggestion::no_move()
            }
            Some((mv, score)) => {
                tracing::debug!(mv = %mv, score = %score, "heuristic move");
                Suggestion::for_move(state, mv, Some(score))
            }
            None => {
                tracing::info!("no heuristic move available");
                Suggestion::no_move()
            }
        }
    }
}
