//! Board geometry and configuration types.
//!
//! - `PileId`: validated index into the fixed 13-pile layout
//! - `RulesConfig`: draw count and pass limit carried by every `GameState`
//! - `AdvisorConfig`: knobs for the advisors and the history tracker
//!
//! The pile layout is fixed: stock at 0, waste at 1, foundations at 2..=5
//! and tableaux at 6..=12.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Total number of piles on the board.
pub const PILE_COUNT: usize = 13;
/// Number of foundation piles.
pub const FOUNDATION_COUNT: usize = 4;
/// Number of tableau piles.
pub const TABLEAU_COUNT: usize = 7;

/// Largest move log an `AdvisorConfig` may ask for.
pub const MAX_HISTORY_CAPACITY: usize = 64;

const FOUNDATION_BASE: u8 = 2;
const TABLEAU_BASE: u8 = 6;

/// Pile identifier. Always within `0..PILE_COUNT`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PileId(u8);

/// What role a pile plays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PileKind {
    Stock,
    Waste,
    /// Foundation number `0..4`.
    Foundation(u8),
    /// Tableau number `0..7`.
    Tableau(u8),
}

impl PileId {
    pub const STOCK: PileId = PileId(0);
    pub const WASTE: PileId = PileId(1);

    /// Validate a raw pile index.
    pub fn new(raw: usize) -> Result<Self> {
        if raw < PILE_COUNT {
            Ok(Self(raw as u8))
        } else {
            Err(Error::PileOutOfRange(raw))
        }
    }

    /// Foundation number `n` (`0..4`).
    ///
    /// Panics if `n` is out of range; callers iterate `foundations()`.
    #[must_use]
    pub const fn foundation(n: usize) -> Self {
        assert!(n < FOUNDATION_COUNT, "foundation index out of range");
        Self(FOUNDATION_BASE + n as u8)
    }

    /// Tableau number `n` (`0..7`).
    ///
    /// Panics if `n` is out of range; callers iterate `tableaux()`.
    #[must_use]
    pub const fn tableau(n: usize) -> Self {
        assert!(n < TABLEAU_COUNT, "tableau index out of range");
        Self(TABLEAU_BASE + n as u8)
    }

    /// All foundation ids in order.
    pub fn foundations() -> impl DoubleEndedIterator<Item = PileId> {
        (0..FOUNDATION_COUNT).map(PileId::foundation)
    }

    /// All tableau ids in order.
    pub fn tableaux() -> impl DoubleEndedIterator<Item = PileId> {
        (0..TABLEAU_COUNT).map(PileId::tableau)
    }

    /// All 13 pile ids.
    pub fn all() -> impl Iterator<Item = PileId> {
        (0..PILE_COUNT as u8).map(PileId)
    }

    /// Raw index into the pile array.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub const fn kind(self) -> PileKind {
        match self.0 {
            0 => PileKind::Stock,
            1 => PileKind::Waste,
            n if n < TABLEAU_BASE => PileKind::Foundation(n - FOUNDATION_BASE),
            n => PileKind::Tableau(n - TABLEAU_BASE),
        }
    }

    #[must_use]
    pub const fn is_foundation(self) -> bool {
        matches!(self.kind(), PileKind::Foundation(_))
    }

    #[must_use]
    pub const fn is_tableau(self) -> bool {
        matches!(self.kind(), PileKind::Tableau(_))
    }
}

impl TryFrom<usize> for PileId {
    type Error = Error;

    fn try_from(raw: usize) -> Result<Self> {
        Self::new(raw)
    }
}

impl From<PileId> for usize {
    fn from(id: PileId) -> Self {
        id.index()
    }
}

impl std::fmt::Display for PileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind() {
            PileKind::Stock => write!(f, "Stock"),
            PileKind::Waste => write!(f, "Waste"),
            PileKind::Foundation(n) => write!(f, "F{}", n),
            PileKind::Tableau(n) => write!(f, "T{}", n),
        }
    }
}

/// Game rules that vary between solitaire sites.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Cards moved from stock to waste per draw.
    pub draw_count: usize,

    /// Passes through the stock allowed, counting the first.
    pub max_passes: u32,
}

impl RulesConfig {
    /// Checked constructor.
    pub fn new(draw_count: usize, max_passes: u32) -> Result<Self> {
        let rules = Self {
            draw_count,
            max_passes,
        };
        rules.validate()?;
        Ok(rules)
    }

    /// A draw must move at least one card and at least one pass must be
    /// allowed.
    pub fn validate(&self) -> Result<()> {
        if self.draw_count == 0 {
            return Err(Error::InvalidDrawCount);
        }
        if self.max_passes == 0 {
            return Err(Error::InvalidMaxPasses);
        }
        Ok(())
    }

    /// Reject a pass counter the rules could never reach.
    pub fn check_pass(&self, pass: u32) -> Result<()> {
        if (1..=self.max_passes).contains(&pass) {
            Ok(())
        } else {
            Err(Error::PassOutOfRange {
                pass,
                max_passes: self.max_passes,
            })
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            draw_count: 3,
            max_passes: 3,
        }
    }
}

/// Advisor and history configuration.
///
/// Every field has a default, so a config file only needs the keys it
/// changes:
///
/// ```
/// use klondike_advisor::core::AdvisorConfig;
///
/// let config = AdvisorConfig::from_json(r#"{ "history_capacity": 6 }"#).unwrap();
/// assert_eq!(config.history_capacity, 6);
/// assert_eq!(config.rules.draw_count, 3);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    /// Rules applied to snapshots converted into game states.
    pub rules: RulesConfig,

    /// Committed moves kept for oscillation detection.
    pub history_capacity: usize,

    /// Heuristic suggestions scoring at or below this are not logged.
    pub significance_floor: f64,

    /// Surface a negatively scored move when it is the only option.
    /// When false, such a board reports `NoMove` instead.
    pub surface_devalued_moves: bool,

    /// Skip recomputation when the board fingerprint is unchanged.
    pub use_snapshot_cache: bool,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            rules: RulesConfig::default(),
            history_capacity: 4,
            significance_floor: 0.0,
            surface_devalued_moves: true,
            use_snapshot_cache: true,
        }
    }
}

impl AdvisorConfig {
    /// Parse a JSON config; missing keys take their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the rules and the history bound.
    pub fn validate(&self) -> Result<()> {
        self.rules.validate()?;
        if self.history_capacity > MAX_HISTORY_CAPACITY {
            return Err(Error::HistoryCapacity(self.history_capacity));
        }
        Ok(())
    }

    /// Unchecked; snapshot conversion rejects invalid rules.
    #[must_use]
    pub fn with_rules(mut self, rules: RulesConfig) -> Self {
        self.rules = rules;
        self
    }

    /// Unchecked; see `validate`. The log grows on demand, so an oversized
    /// capacity costs nothing up front.
    #[must_use]
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_significance_floor(mut self, floor: f64) -> Self {
        self.significance_floor = floor;
        self
    }

    #[must_use]
    pub fn with_devalued_moves(mut self, surface: bool) -> Self {
        self.surface_devalued_moves = surface;
        self
    }

    #[must_use]
    pub fn with_snapshot_cache(mut self, enabled: bool) -> Self {
        self.use_snapshot_cache = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pile_id_layout() {
        assert_eq!(PileId::STOCK.kind(), PileKind::Stock);
        assert_eq!(PileId::WASTE.kind(), PileKind::Waste);
        assert_eq!(PileId::foundation(0).index(), 2);
        assert_eq!(PileId::foundation(3).index(), 5);
        assert_eq!(PileId::tableau(0).index(), 6);
        assert_eq!(PileId::tableau(6).index(), 12);
        assert_eq!(PileId::new(9).unwrap().kind(), PileKind::Tableau(3));
        assert_eq!(PileId::all().count(), PILE_COUNT);
    }

    #[test]
    fn test_pile_id_out_of_range() {
        assert!(matches!(PileId::new(13), Err(Error::PileOutOfRange(13))));
        assert!(serde_json::from_str::<PileId>("42").is_err());
    }

    #[test]
    fn test_pile_id_display() {
        assert_eq!(PileId::STOCK.to_string(), "Stock");
        assert_eq!(PileId::foundation(1).to_string(), "F1");
        assert_eq!(PileId::tableau(4).to_string(), "T4");
    }

    #[test]
    #[should_panic(expected = "tableau index out of range")]
    fn test_tableau_out_of_range_panics() {
        let _ = PileId::tableau(7);
    }

    #[test]
    fn test_default_config() {
        let config = AdvisorConfig::default();
        assert_eq!(config.rules.draw_count, 3);
        assert_eq!(config.rules.max_passes, 3);
        assert_eq!(config.history_capacity, 4);
        assert!(config.surface_devalued_moves);
    }

    #[test]
    fn test_builder_pattern() {
        let config = AdvisorConfig::default()
            .with_history_capacity(8)
            .with_devalued_moves(false)
            .with_snapshot_cache(false)
            .with_rules(RulesConfig { draw_count: 1, max_passes: 1 });

        assert_eq!(config.history_capacity, 8);
        assert!(!config.surface_devalued_moves);
        assert!(!config.use_snapshot_cache);
        assert_eq!(config.rules.draw_count, 1);
    }

    #[test]
    fn test_config_from_json() {
        let config = AdvisorConfig::from_json(
            r#"{ "rules": { "max_passes": 1 }, "surface_devalued_moves": false }"#,
        )
        .unwrap();
        assert_eq!(config.rules.max_passes, 1);
        assert_eq!(config.rules.draw_count, 3);
        assert!(!config.surface_devalued_moves);

        assert!(matches!(AdvisorConfig::from_json("{ nope"), Err(Error::Config(_))));
    }

    #[test]
    fn test_rules_validation() {
        assert!(RulesConfig::new(1, 1).is_ok());
        assert!(matches!(RulesConfig::new(0, 3), Err(Error::InvalidDrawCount)));
        assert!(matches!(RulesConfig::new(3, 0), Err(Error::InvalidMaxPasses)));

        let rules = RulesConfig::default();
        assert!(rules.check_pass(1).is_ok());
        assert!(rules.check_pass(3).is_ok());
        assert!(matches!(
            rules.check_pass(0),
            Err(Error::PassOutOfRange { pass: 0, max_passes: 3 })
        ));
        assert!(rules.check_pass(4).is_err());
    }

    #[test]
    fn test_from_json_rejects_bad_values() {
        assert!(matches!(
            AdvisorConfig::from_json(r#"{ "rules": { "draw_count": 0 } }"#),
            Err(Error::InvalidDrawCount)
        ));
        assert!(matches!(
            AdvisorConfig::from_json(r#"{ "rules": { "max_passes": 0 } }"#),
            Err(Error::InvalidMaxPasses)
        ));
        assert!(matches!(
            AdvisorConfig::from_json(r#"{ "history_capacity": 18446744073709551615 }"#),
            Err(Error::HistoryCapacity(usize::MAX))
        ));

        let at_limit = format!(r#"{{ "history_capacity": {} }}"#, MAX_HISTORY_CAPACITY);
        assert!(AdvisorConfig::from_json(&at_limit).is_ok());
    }
}
