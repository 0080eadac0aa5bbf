//! Bounded move log, oscillation detection and the snapshot cache.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::advisor::Suggestion;
use crate::core::config::{AdvisorConfig, PileId, MAX_HISTORY_CAPACITY};
use crate::core::snapshot::BoardFingerprint;
use crate::error::{Error, Result};

/// Entries compared when looking for an `[A, B, A, B]` cycle.
const CYCLE_WINDOW: usize = 4;

/// Two moves undoing each other, twice in a row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Oscillation {
    pub first: String,
    pub second: String,
}

impl std::fmt::Display for Oscillation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{a}, {b}, {a}, {b}",
            a = self.first,
            b = self.second
        )
    }
}

/// Cross-cycle memory of the advisor.
///
/// Holds the last few committed move descriptors, the destination of the
/// most recent move and the fingerprint of the last board advised on.
/// Access is sequential; one caller owns the tracker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryTracker {
    capacity: usize,
    log: VecDeque<String>,
    last_destination: Option<PileId>,
    fingerprint: Option<BoardFingerprint>,
}

impl Default for HistoryTracker {
    fn default() -> Self {
        Self::new(CYCLE_WINDOW)
    }
}

impl HistoryTracker {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            log: VecDeque::new(),
            last_destination: None,
            fingerprint: None,
        }
    }

    #[must_use]
    pub fn from_config(config: &AdvisorConfig) -> Self {
        Self::new(config.history_capacity)
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.log.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    /// Logged descriptors, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.log.iter().map(String::as_str)
    }

    /// Destination pile of the most recently recorded move.
    #[must_use]
    pub fn last_destination(&self) -> Option<PileId> {
        self.last_destination
    }

    /// Append a descriptor, evicting the oldest past capacity.
    ///
    /// Returns the oscillation the new entry completes, if any.
    pub fn record(&mut self, descriptor: impl Into<String>, dest: Option<PileId>) -> Option<Oscillation> {
        if self.capacity == 0 {
            return None;
        }
        let descriptor = descriptor.into();
        tracing::debug!(descriptor = %descriptor, "history append");

        self.log.push_back(descriptor);
        while self.log.len() > self.capacity {
            self.log.pop_front();
        }
        if dest.is_some() {
            self.last_destination = dest;
        }

        let oscillation = self.detect_oscillation();
        if let Some(cycle) = &oscillation {
            tracing::warn!(cycle = %cycle, "move oscillation detected");
        }
        oscillation
    }

    /// Record `suggestion` if it carries a significant move.
    ///
    /// Heuristic suggestions scoring at or below `floor` are skipped, as
    /// are `Collect` and `NoMove`.
    pub fn record_suggestion(&mut self, suggestion: &Suggestion, floor: f64) -> Option<Oscillation> {
        if !suggestion.is_significant(floor) {
            return None;
        }
        let descriptor = suggestion.descriptor.as_deref()?;
        let dest = suggestion.mv.map(|mv| mv.dest);
        self.record(descriptor, dest)
    }

    /// `[A, B, A, B]` with `A != B` over the last four entries.
    #[must_use]
    pub fn detect_oscillation(&self) -> Option<Oscillation> {
        if self.log.len() < CYCLE_WINDOW {
            return None;
        }
        let tail: Vec<&String> = self.log.iter().skip(self.log.len() - CYCLE_WINDOW).collect();
        let (a, b) = (tail[0], tail[1]);
        (a == tail[2] && b == tail[3] && a != b).then(|| Oscillation {
            first: a.clone(),
            second: b.clone(),
        })
    }

    /// True if `fingerprint` matches the last board advised on.
    #[must_use]
    pub fn is_unchanged(&self, fingerprint: &BoardFingerprint) -> bool {
        self.fingerprint.as_ref() == Some(fingerprint)
    }

    /// Remember the board just advised on.
    pub fn remember(&mut self, fingerprint: BoardFingerprint) {
        self.fingerprint = Some(fingerprint);
    }

    #[must_use]
    pub fn fingerprint(&self) -> Option<&BoardFingerprint> {
        self.fingerprint.as_ref()
    }

    /// Drop the log and the cached board.
    pub fn clear(&mut self) {
        self.log.clear();
        self.last_destination = None;
        self.fingerprint = None;
    }

    /// Persist as `key=value` lines.
    ///
    /// ```text
    /// capacity=4
    /// move=Draw
    /// move=Move 7♥ from T1 to T3 on 8♣
    /// last_destination=9
    /// fingerprint={"waste":null,...}
    /// ```
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = format!("capacity={}\n", self.capacity);
        for entry in &self.log {
            out.push_str(&format!("move={}\n", entry));
        }
        if let Some(dest) = self.last_destination {
            out.push_str(&format!("last_destination={}\n", dest.index()));
        }
        if let Some(fingerprint) = &self.fingerprint {
            out.push_str(&format!("fingerprint={}\n", fingerprint));
        }
        out
    }

    /// Parse text written by `to_text`. Blank lines are ignored.
    pub fn from_text(text: &str) -> Result<Self> {
        let mut tracker = Self::default();
        let mut moves = Vec::new();

        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            let (key, value) = line
                .split_once('=')
                .ok_or_else(|| Error::MalformedHistory(line.to_string()))?;
            match key.trim() {
                "capacity" => {
                    let capacity: usize = value
                        .trim()
                        .parse()
                        .map_err(|_| Error::MalformedHistory(line.to_string()))?;
                    if capacity > MAX_HISTORY_CAPACITY {
                        return Err(Error::HistoryCapacity(capacity));
                    }
                    tracker.capacity = capacity;
                }
                "move" => moves.push(value.to_string()),
                "last_destination" => {
                    let raw: usize = value
                        .trim()
                        .parse()
                        .map_err(|_| Error::MalformedHistory(line.to_string()))?;
                    tracker.last_destination = Some(PileId::new(raw)?);
                }
                "fingerprint" => tracker.fingerprint = Some(BoardFingerprint::from_raw(value)),
                _ => return Err(Error::MalformedHistory(line.to_string())),
            }
        }

        let skip = moves.len().saturating_sub(tracker.capacity);
        tracker.log = moves.into_iter().skip(skip).collect();
        Ok(tracker)
    }
}
