//! Persistent progression state: level, XP, unlocked achievements.

use serde::{Deserialize, Serialize};

use super::achievements::AchievementId;

/// Level, XP and achievements accumulated across games.
///
/// ## Level-up notification
///
/// The engine only ever raises `level`. A pending celebration is
/// `level > last_acknowledged_level`, which stays true through any number of
/// reads until `acknowledge_level_up` is called.
///
/// Deserializing goes through `restore`, so stored state is clamped the same
/// way.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredProgression")]
pub struct ProgressionState {
    level: u32,
    current_xp: u32,
    last_acknowledged_level: u32,
    achievements: Vec<AchievementId>,
}

/// Wire form of `ProgressionState`, before clamping.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredProgression {
    level: u32,
    current_xp: u32,
    last_acknowledged_level: u32,
    achievements: Vec<AchievementId>,
}

impl From<StoredProgression> for ProgressionState {
    fn from(stored: StoredProgression) -> Self {
        Self::restore(
            stored.level,
            stored.current_xp,
            stored.last_acknowledged_level,
            stored.achievements,
        )
    }
}

impl Default for ProgressionState {
    fn default() -> Self {
        Self {
            level: 1,
            current_xp: 0,
            last_acknowledged_level: 1,
            achievements: Vec::new(),
        }
    }
}

impl ProgressionState {
    /// Fresh state at level 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a saved state.
    ///
    /// Out-of-range values are clamped: level at least 1, acknowledged level
    /// at most level.
    #[must_use]
    pub fn restore(level: u32, current_xp: u32, last_acknowledged_level: u32, achievements: Vec<AchievementId>) -> Self {
        let level = level.max(1);
        let mut state = Self {
            level,
            current_xp,
            last_acknowledged_level: last_acknowledged_level.min(level),
            achievements: Vec::new(),
        };
        for id in achievements {
            state.unlock(id);
        }
        state
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub fn current_xp(&self) -> u32 {
        self.current_xp
    }

    #[must_use]
    pub fn last_acknowledged_level(&self) -> u32 {
        self.last_acknowledged_level
    }

    /// Unlocked achievements in unlock order.
    #[must_use]
    pub fn achievements(&self) -> &[AchievementId] {
        &self.achievements
    }

    /// Add XP, levelling up for every full `xp_per_level`.
    ///
    /// Returns the number of levels gained.
    pub fn add_xp(&mut self, amount: u32, xp_per_level: u32) -> u32 {
        assert!(xp_per_level > 0, "XP per level must be positive");
        self.current_xp += amount;
        let mut gained = 0;
        while self.current_xp >= xp_per_level {
            self.current_xp -= xp_per_level;
            self.level += 1;
            gained += 1;
        }
        gained
    }

    /// Convert any XP at or above `xp_per_level` into levels.
    ///
    /// Returns the number of levels gained.
    pub fn normalize(&mut self, xp_per_level: u32) -> u32 {
        self.add_xp(0, xp_per_level)
    }

    /// Check if a level-up has not been celebrated yet.
    #[must_use]
    pub fn has_pending_level_up(&self) -> bool {
        self.level > self.last_acknowledged_level
    }

    /// Mark the current level as celebrated.
    pub fn acknowledge_level_up(&mut self) {
        self.last_acknowledged_level = self.level;
    }

    /// Check if an achievement is unlocked.
    #[must_use]
    pub fn is_unlocked(&self, id: &AchievementId) -> bool {
        self.achievements.contains(id)
    }

    /// Unlock an achievement. Returns false if it was already unlocked.
    pub fn unlock(&mut self, id: AchievementId) -> bool {
        if self.is_unlocked(&id) {
            return false;
        }
        self.achievements.push(id);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = ProgressionState::new();
        assert_eq!(state.level(), 1);
        assert_eq!(state.current_xp(), 0);
        assert!(!state.has_pending_level_up());
    }

    #[test]
    fn test_add_xp_carry() {
        let mut state = ProgressionState::restore(1, 8, 1, Vec::new());
        let gained = state.add_xp(4, 10);

        assert_eq!(gained, 1);
        assert_eq!(state.level(), 2);
        assert_eq!(state.current_xp(), 2);
        assert_eq!(state.last_acknowledged_level(), 1);
    }

    #[test]
    fn test_add_xp_multiple_levels() {
        let mut state = ProgressionState::new();
        let gained = state.add_xp(27, 10);

        assert_eq!(gained, 2);
        assert_eq!(state.level(), 3);
        assert_eq!(state.current_xp(), 7);
    }

    #[test]
    fn test_pending_level_up_survives_reads() {
        let mut state = ProgressionState::new();
        state.add_xp(10, 10);

        assert!(state.has_pending_level_up());
        assert!(state.has_pending_level_up());

        state.acknowledge_level_up();
        assert!(!state.has_pending_level_up());
        assert_eq!(state.last_acknowledged_level(), 2);
    }

    #[test]
    fn test_unlock_idempotent() {
        let mut state = ProgressionState::new();
        let id = AchievementId::new("first_game");

        assert!(state.unlock(id.clone()));
        assert!(!state.unlock(id.clone()));
        assert_eq!(state.achievements().len(), 1);
    }

    #[test]
    fn test_restore_clamps() {
        let state = ProgressionState::restore(0, 3, 9, vec![AchievementId::new("a"), AchievementId::new("a")]);
        assert_eq!(state.level(), 1);
        assert_eq!(state.last_acknowledged_level(), 1);
        assert_eq!(state.achievements().len(), 1);
    }

    #[test]
    fn test_serialization() {
        let mut state = ProgressionState::new();
        state.unlock(AchievementId::new("sub_zero"));
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("lastAcknowledgedLevel"));

        let deserialized: ProgressionState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }

    #[test]
    fn test_deserialize_clamps() {
        let json = r#"{"level":2,"currentXp":4,"lastAcknowledgedLevel":9,"achievements":["a","a"]}"#;
        let state: ProgressionState = serde_json::from_str(json).unwrap();

        assert_eq!(state.level(), 2);
        assert_eq!(state.last_acknowledged_level(), 2);
        assert_eq!(state.achievements().len(), 1);
        assert!(!state.has_pending_level_up());
    }

    #[test]
    fn test_normalize_excess_xp() {
        let mut state = ProgressionState::restore(1, 23, 1, Vec::new());
        assert_eq!(state.normalize(10), 2);
        assert_eq!(state.level(), 3);
        assert_eq!(state.current_xp(), 3);
    }
}
