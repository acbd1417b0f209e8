//! XP, level and achievement evaluation for completed games.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::{EngineConfig, XpTable};
use crate::history::GameHistory;

use super::achievements::{AchievementId, AchievementRegistry};
use super::outcome::GameOutcome;
use super::state::ProgressionState;

/// What one evaluation changed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionReport {
    pub xp_awarded: u32,
    pub previous_level: u32,
    pub level: u32,

    /// Achievements unlocked by this evaluation, in registry order.
    pub unlocked: Vec<AchievementId>,
}

impl ProgressionReport {
    /// Levels gained by this evaluation.
    #[must_use]
    pub fn levels_gained(&self) -> u32 {
        self.level - self.previous_level
    }
}

/// Applies completed games to a `ProgressionState`.
#[derive(Clone, Debug)]
pub struct ProgressionEngine {
    xp_table: XpTable,
    xp_per_level: u32,
    profile_name: Option<String>,
    registry: AchievementRegistry,
}

impl Default for ProgressionEngine {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl ProgressionEngine {
    /// Build from engine configuration with the standard achievements.
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            xp_table: config.xp_table.clone(),
            xp_per_level: config.xp_per_level,
            profile_name: config.profile_name.clone(),
            registry: AchievementRegistry::standard(),
        }
    }

    /// Replace the achievement registry (builder pattern).
    #[must_use]
    pub fn with_registry(mut self, registry: AchievementRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// The achievement registry.
    #[must_use]
    pub fn registry(&self) -> &AchievementRegistry {
        &self.registry
    }

    /// XP this outcome is worth.
    ///
    /// Uses the profile player's placement; participation XP when there is
    /// no profile or the profile player was not in the game.
    #[must_use]
    pub fn xp_for(&self, outcome: &GameOutcome) -> u32 {
        let placement = self
            .profile_name
            .as_deref()
            .and_then(|name| outcome.placement_of(name));
        self.xp_table.award(placement)
    }

    /// Apply a completed game.
    ///
    /// `history` must already contain the game. Achievements already in
    /// `state` are not re-evaluated and never reported twice.
    pub fn evaluate(
        &self,
        state: &mut ProgressionState,
        history: &GameHistory,
        outcome: &GameOutcome,
    ) -> ProgressionReport {
        let previous_level = state.level();
        let xp_awarded = self.xp_for(outcome);
        let gained = state.add_xp(xp_awarded, self.xp_per_level);
        if gained > 0 {
            info!(level = state.level(), gained, "level up");
        }

        let mut unlocked = Vec::new();
        for achievement in self.registry.iter() {
            if state.is_unlocked(&achievement.id) {
                continue;
            }
            if achievement.condition.evaluate(history, outcome) && state.unlock(achievement.id.clone()) {
                info!(id = %achievement.id, "achievement unlocked");
                unlocked.push(achievement.id.clone());
            }
        }

        debug!(xp_awarded, xp = state.current_xp(), "progression evaluated");
        ProgressionReport {
            xp_awarded,
            previous_level,
            level: state.level(),
            unlocked,
        }
    }
}
