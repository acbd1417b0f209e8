//! Engine configuration.
//!
//! Hosts configure the engine once at startup. Everything here has a
//! sensible default so `EngineConfig::default()` gives the standard rules:
//! - 100-point threshold
//! - 50 games of history
//! - 10 XP per level, placement awards 5/3/2 and 1 for everyone else
//!
//! ## Profile player
//!
//! Placement XP needs to know whose placement counts. That is
//! `profile_name`, and it is unset by default: until a host calls
//! `with_profile`, every completed game awards the flat participation XP.

use serde::{Deserialize, Serialize};

/// Cumulative score that ends a game when no threshold is chosen.
pub const DEFAULT_THRESHOLD: u32 = 100;

/// Maximum number of games kept in history.
pub const DEFAULT_HISTORY_CAP: usize = 50;

/// XP needed for one level.
pub const DEFAULT_XP_PER_LEVEL: u32 = 10;

/// XP awarded per completed game, by placement.
///
/// Placement 0 is the winner (lowest total). Placements beyond the table get
/// `participation`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpTable {
    /// Award for placement `i` at index `i`.
    pub placement_awards: Vec<u32>,

    /// Award for any other placement, or when the profile player is unknown.
    pub participation: u32,
}

impl Default for XpTable {
    fn default() -> Self {
        Self {
            placement_awards: vec![5, 3, 2],
            participation: 1,
        }
    }
}

impl XpTable {
    /// Same award whatever the placement.
    #[must_use]
    pub fn flat(award: u32) -> Self {
        Self {
            placement_awards: Vec::new(),
            participation: award,
        }
    }

    /// XP for a placement (`None` = participation only).
    #[must_use]
    pub fn award(&self, placement: Option<usize>) -> u32 {
        placement
            .and_then(|p| self.placement_awards.get(p).copied())
            .unwrap_or(self.participation)
    }
}

/// Engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Threshold used when a session starts without one.
    pub default_threshold: u32,

    /// Maximum games kept in history (oldest evicted first).
    pub history_cap: usize,

    /// XP needed to gain one level.
    pub xp_per_level: u32,

    /// XP awards by placement.
    pub xp_table: XpTable,

    /// Name of the player whose placement drives XP.
    ///
    /// Defaults to `None`, which awards `xp_table.participation` for every
    /// game regardless of placement. Set it to enable placement awards.
    pub profile_name: Option<String>,

    /// How many recent games the stats time series covers.
    pub recent_games: usize,
}

/// Standard rules. No profile player, so XP is participation only.
impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_threshold: DEFAULT_THRESHOLD,
            history_cap: DEFAULT_HISTORY_CAP,
            xp_per_level: DEFAULT_XP_PER_LEVEL,
            xp_table: XpTable::default(),
            profile_name: None,
            recent_games: 10,
        }
    }
}

impl EngineConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: u32) -> Self {
        self.default_threshold = threshold;
        self
    }

    /// Set the history cap.
    #[must_use]
    pub fn with_history_cap(mut self, cap: usize) -> Self {
        self.history_cap = cap;
        self
    }

    /// Set XP per level.
    #[must_use]
    pub fn with_xp_per_level(mut self, xp: u32) -> Self {
        assert!(xp > 0, "XP per level must be positive");
        self.xp_per_level = xp;
        self
    }

    /// Set the XP table.
    #[must_use]
    pub fn with_xp_table(mut self, table: XpTable) -> Self {
        self.xp_table = table;
        self
    }

    /// Set the profile player name.
    #[must_use]
    pub fn with_profile(mut self, name: impl Into<String>) -> Self {
        self.profile_name = Some(name.into());
        self
    }

    /// Set the recent-games window.
    #[must_use]
    pub fn with_recent_games(mut self, count: usize) -> Self {
        self.recent_games = count;
        self
    }
}
