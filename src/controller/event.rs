//! Notifications for observers.
//!
//! The controller queues events while a command runs and hands them out in
//! order through `SessionController::drain_events`. Presentation code plays
//! sounds, confetti and toasts from these; nothing in the engine reads them.

use serde::{Deserialize, Serialize};

use crate::progression::AchievementId;

/// Something observers may react to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// A round was committed.
    RoundCommitted {
        index: usize,
        finisher_doubled: bool,
    },

    /// The last round was removed.
    RoundUndone { index: usize },

    /// The session went back to SETUP.
    GameReset,

    /// A game completed and was written to history.
    GameFinished {
        entry_id: String,
        winner: Option<String>,
    },

    /// Level increased. Fired once per evaluation that gains levels.
    LevelUp { previous: u32, level: u32 },

    /// An achievement was unlocked. Fired once per achievement, ever.
    AchievementUnlocked { id: AchievementId },

    /// Entries were merged from an import.
    HistoryImported { added: usize },
}

impl EngineEvent {
    /// Check if this event should trigger a celebration.
    #[must_use]
    pub fn is_celebration(&self) -> bool {
        matches!(self, Self::LevelUp { .. } | Self::AchievementUnlocked { .. })
    }
}
