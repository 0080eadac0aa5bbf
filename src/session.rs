//! Decision cycle: snapshot in, suggestion out.
//!
//! The caller decides when to ask (polling, change notifications); each
//! call is independent apart from the history the session carries. A
//! request names the strategy to use, and the result says either that the
//! board is unchanged since the last answer or what to do now.
//!
//! ```
//! use klondike_advisor::core::{AdvisorConfig, BoardSnapshot, Card, PileId, Suit};
//! use klondike_advisor::session::{AdvisorSession, DecisionRequest, DecisionResult, Strategy};
//!
//! let mut session = AdvisorSession::new(AdvisorConfig::default());
//! let snapshot = BoardSnapshot::new().with_pile(PileId::WASTE, vec![Card::up(1, Suit::Spades)]);
//!
//! let result = session.decide(DecisionRequest::new(snapshot.clone(), Strategy::Heuristic)).unwrap();
//! let suggestion = result.suggestion().unwrap();
//! assert_eq!(suggestion.label, "A\u{2660} -> F0");
//!
//! let again = session.decide(DecisionRequest::new(snapshot, Strategy::Heuristic)).unwrap();
//! assert_eq!(again, DecisionResult::Unchanged);
//! ```

use serde::{Deserialize, Serialize};

use crate::advisor::{HeuristicAdvisor, PriorityAdvisor, Suggestion};
use crate::core::card::Card;
use crate::core::config::{AdvisorConfig, PileId};
use crate::core::snapshot::{BoardFingerprint, BoardSnapshot};
use crate::error::Result;
use crate::history::{HistoryTracker, Oscillation};

/// Which advisor answers a request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    Priority,
    #[default]
    Heuristic,
}

/// One decision request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecisionRequest {
    pub snapshot: BoardSnapshot,
    pub strategy: Strategy,

    /// Ignore the snapshot cache for this request.
    pub force_refresh: bool,
}

impl DecisionRequest {
    #[must_use]
    pub fn new(snapshot: BoardSnapshot, strategy: Strategy) -> Self {
        Self {
            snapshot,
            strategy,
            force_refresh: false,
        }
    }

    #[must_use]
    pub fn with_force_refresh(mut self) -> Self {
        self.force_refresh = true;
        self
    }
}

/// Answer to a `DecisionRequest`.
#[derive(Clone, Debug, PartialEq)]
pub enum DecisionResult {
    /// Same board as last time; the previous suggestion still stands.
    Unchanged,
    Decided {
        suggestion: Suggestion,

        /// Set when this move completes an `[A, B, A, B]` cycle.
        oscillation: Option<Oscillation>,

        /// Card the page already has picked up.
        selected: Option<Card>,

        /// Where the previous move was headed, to finish a pick-up.
        resume_to: Option<PileId>,
    },
}

impl DecisionResult {
    #[must_use]
    pub fn suggestion(&self) -> Option<&Suggestion> {
        match self {
            DecisionResult::Decided { suggestion, .. } => Some(suggestion),
            DecisionResult::Unchanged => None,
        }
    }

    #[must_use]
    pub fn oscillation(&self) -> Option<&Oscillation> {
        match self {
            DecisionResult::Decided { oscillation, .. } => oscillation.as_ref(),
            DecisionResult::Unchanged => None,
        }
    }
}

/// Advisors plus the history that outlives a single decision.
#[derive(Clone, Debug)]
pub struct AdvisorSession {
    config: AdvisorConfig,
    priority: PriorityAdvisor,
    heuristic: HeuristicAdvisor,
    history: HistoryTracker,
}

impl AdvisorSession {
    #[must_use]
    pub fn new(config: AdvisorConfig) -> Self {
        Self {
            priority: PriorityAdvisor::new(),
            heuristic: HeuristicAdvisor::from_config(&config),
            history: HistoryTracker::from_config(&config),
            config,
        }
    }

    /// Resume with a previously persisted history.
    #[must_use]
    pub fn with_history(mut self, history: HistoryTracker) -> Self {
        self.history = history;
        self
    }

    #[must_use]
    pub fn config(&self) -> &AdvisorConfig {
        &self.config
    }

    #[must_use]
    pub fn history(&self) -> &HistoryTracker {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut HistoryTracker {
        &mut self.history
    }

    /// Run one decision cycle.
    ///
    /// Fails only when the snapshot is malformed; a board with nothing to
    /// do yields a `NoMove` suggestion.
    pub fn decide(&mut self, request: DecisionRequest) -> Result<DecisionResult> {
        let state = request.snapshot.to_state(self.config.rules)?;
        let selected = request.snapshot.selected;
        let fingerprint = BoardFingerprint::of(&state, selected);

        if self.config.use_snapshot_cache
            && !request.force_refresh
            && self.history.is_unchanged(&fingerprint)
        {
            tracing::debug!("board unchanged, reusing last decision");
            return Ok(DecisionResult::Unchanged);
        }

        let resume_to = selected.and(self.history.last_destination());
        let suggestion = match request.strategy {
            Strategy::Priority => self.priority.advise(&state),
            Strategy::Heuristic => self.heuristic.advise(&state),
        };
        let oscillation = self
            .history
            .record_suggestion(&suggestion, self.config.significance_floor);
        self.history.remember(fingerprint);

        Ok(DecisionResult::Decided {
            suggestion,
            oscillation,
            selected,
            resume_to,
        })
    }
}

impl Default for AdvisorSession {
    fn default() -> Self {
        Self::new(AdvisorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::SuggestionKind;
    use crate::core::card::{Suit, ACE, KING};

    #[test]
    fn test_cache_and_force_refresh() {
        let mut session = AdvisorSession::default();
        let snapshot = BoardSnapshot::new().with_pile(PileId::WASTE, vec![Card::up(ACE, Suit::Hearts)]);

        let first = session
            .decide(DecisionRequest::new(snapshot.clone(), Strategy::Priority))
            .unwrap();
        assert_eq!(first.suggestion().unwrap().kind, SuggestionKind::Foundation);
        assert_eq!(session.history().len(), 1);

        let cached = session
            .decide(DecisionRequest::new(snapshot.clone(), Strategy::Priority))
            .unwrap();
        assert_eq!(cached, DecisionResult::Unchanged);

        let forced = session
            .decide(DecisionRequest::new(snapshot, Strategy::Priority).with_force_refresh())
            .unwrap();
        assert!(forced.suggestion().is_some());
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn test_cache_disabled() {
        let config = AdvisorConfig::default().with_snapshot_cache(false);
        let mut session = AdvisorSession::new(config);
        let snapshot = BoardSnapshot::new();

        for _ in 0..2 {
            let result = session
                .decide(DecisionRequest::new(snapshot.clone(), Strategy::Heuristic))
                .unwrap();
            assert!(result.suggestion().is_some());
        }
    }

    #[test]
    fn test_devalued_move_not_logged() {
        let mut session = AdvisorSession::default();
        let snapshot = BoardSnapshot::new()
            .with_pile(PileId::STOCK, vec![])
            .with_pile(PileId::tableau(0), vec![Card::up(KING, Suit::Spades)]);

        let result = session
            .decide(DecisionRequest::new(snapshot, Strategy::Heuristic))
            .unwrap();
        assert_eq!(result.suggestion().unwrap().value(), Some(-10.0));
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_selected_card_resumes_last_destination() {
        let mut session = AdvisorSession::default();
        let before = BoardSnapshot::new().with_pile(PileId::WASTE, vec![Card::up(ACE, Suit::Hearts)]);
        session
            .decide(DecisionRequest::new(before, Strategy::Heuristic))
            .unwrap();

        let picked = BoardSnapshot::new()
            .with_pile(PileId::WASTE, vec![Card::up(ACE, Suit::Hearts)])
            .with_selected(Card::up(ACE, Suit::Hearts));
        let result = session
            .decide(DecisionRequest::new(picked, Strategy::Heuristic))
            .unwrap();

        match result {
            DecisionResult::Decided { selected, resume_to, .. } => {
                assert_eq!(selected, Some(Card::up(ACE, Suit::Hearts)));
                assert_eq!(resume_to, Some(PileId::foundation(0)));
            }
            DecisionResult::Unchanged => panic!("selection changes the fingerprint"),
        }
    }

    #[test]
    fn test_malformed_snapshot_is_an_error() {
        let mut session = AdvisorSession::default();
        let bad = BoardSnapshot::new()
            .with_pile(PileId::WASTE, vec![Card::up(3, Suit::Clubs)])
            .with_pile(PileId::WASTE, vec![]);
        assert!(session.decide(DecisionRequest::new(bad, Strategy::Priority)).is_err());
        assert!(session.history().fingerprint().is_none());
    }
}
