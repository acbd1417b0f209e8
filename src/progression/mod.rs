//! Meta-progression across games: XP, levels, achievements.
//!
//! `ProgressionEngine::evaluate` runs once per completed game, after the game
//! has been written to history.

pub mod state;
pub mod outcome;
pub mod achievements;
pub mod engine;

pub use state::ProgressionState;
pub use outcome::{GameOutcome, Placement};
pub use achievements::{Achievement, AchievementCondition, AchievementId, AchievementRegistry};
pub use engine::{ProgressionEngine, ProgressionReport};
