//! Achievement registry.
//!
//! Achievements are a fixed, ordered list. Each entry pairs a stable id with
//! an `AchievementCondition`, a tagged predicate over the game history and the
//! outcome of the game that just finished. Conditions compose with `All` and
//! `Any`, the same way trigger conditions do in a rules engine.
//!
//! The registry is walked in order, so unlock notifications for a single game
//! always come out in the same sequence.

use serde::{Deserialize, Serialize};

use crate::history::GameHistory;

use super::outcome::GameOutcome;

/// Stable achievement identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AchievementId(pub String);

impl AchievementId {
    /// Create an achievement id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AchievementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A predicate over `(history, outcome)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AchievementCondition {
    // === History ===

    /// History holds at least N games.
    GamesPlayed(usize),

    // === Outcome ===

    /// The game had at least N players.
    MinPlayers(usize),

    /// The game lasted at least N rounds.
    MinRounds(usize),

    /// The game ended within N rounds.
    MaxRounds(usize),

    /// Some round ended with a negative final score.
    NegativeRound,

    /// Some finisher had their score doubled.
    FinisherDoubled,

    /// The winner's final total is at most N.
    WinnerAtMost(i64),

    /// First and second place are at most N points apart.
    MarginAtMost(i64),

    // === Combinators ===

    /// All conditions must be true.
    All(Vec<AchievementCondition>),

    /// At least one condition must be true.
    Any(Vec<AchievementCondition>),
}

impl AchievementCondition {
    /// Evaluate against the history (already including this game) and the outcome.
    #[must_use]
    pub fn evaluate(&self, history: &GameHistory, outcome: &GameOutcome) -> bool {
        match self {
            Self::GamesPlayed(n) => history.len() >= *n,

            Self::MinPlayers(n) => outcome.player_count() >= *n,

            Self::MinRounds(n) => outcome.rounds_played >= *n,

            Self::MaxRounds(n) => outcome.rounds_played > 0 && outcome.rounds_played <= *n,

            Self::NegativeRound => outcome.has_negative_round(),

            Self::FinisherDoubled => outcome.has_doubled_finisher(),

            Self::WinnerAtMost(max) => outcome.winner().is_some_and(|w| w.total <= *max),

            Self::MarginAtMost(max) => outcome.winning_margin().is_some_and(|m| m <= *max),

            Self::All(conditions) => conditions.iter().all(|c| c.evaluate(history, outcome)),

            Self::Any(conditions) => conditions.iter().any(|c| c.evaluate(history, outcome)),
        }
    }
}

/// A registry entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: AchievementId,

    /// Display title.
    pub title: String,

    /// One-line description for the achievements screen.
    pub description: String,

    pub condition: AchievementCondition,
}

impl Achievement {
    /// Create an achievement.
    pub fn new(
        id: &str,
        title: impl Into<String>,
        description: impl Into<String>,
        condition: AchievementCondition,
    ) -> Self {
        Self {
            id: AchievementId::new(id),
            title: title.into(),
            description: description.into(),
            condition,
        }
    }
}

/// Ordered achievement list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementRegistry {
    achievements: Vec<Achievement>,
}

impl Default for AchievementRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl AchievementRegistry {
    /// Empty registry.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            achievements: Vec::new(),
        }
    }

    /// The built-in achievements.
    #[must_use]
    pub fn standard() -> Self {
        use AchievementCondition::*;

        Self::empty()
            .with(Achievement::new("first_game", "First Steps", "Complete a game", GamesPlayed(1)))
            .with(Achievement::new("regular", "Regular", "Complete 10 games", GamesPlayed(10)))
            .with(Achievement::new("veteran", "Veteran", "Complete 25 games", GamesPlayed(25)))
            .with(Achievement::new("full_table", "Full Table", "Play a game with 6 or more players", MinPlayers(6)))
            .with(Achievement::new("long_haul", "Long Haul", "Play a game lasting 10 rounds or more", MinRounds(10)))
            .with(Achievement::new("quick_game", "Quick Game", "Finish a game within 3 rounds", MaxRounds(3)))
            .with(Achievement::new("sub_zero", "Sub Zero", "Score below zero in a round", NegativeRound))
            .with(Achievement::new("finisher_penalty", "Ouch", "See a finisher get doubled", FinisherDoubled))
            .with(Achievement::new("cold_finish", "Ice Cold", "Win a game with a total of zero or less", WinnerAtMost(0)))
            .with(Achievement::new("photo_finish", "Photo Finish", "Win by a single point or a tie", MarginAtMost(1)))
    }

    /// Append an achievement (builder pattern).
    ///
    /// Ids must be unique.
    #[must_use]
    pub fn with(mut self, achievement: Achievement) -> Self {
        assert!(
            self.get(&achievement.id).is_none(),
            "Duplicate achievement id: {}",
            achievement.id
        );
        self.achievements.push(achievement);
        self
    }

    /// Look up an achievement.
    #[must_use]
    pub fn get(&self, id: &AchievementId) -> Option<&Achievement> {
        self.achievements.iter().find(|a| &a.id == id)
    }

    /// Iterate in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &Achievement> {
        self.achievements.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.achievements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.achievements.is_empty()
    }
}
