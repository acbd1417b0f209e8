//! Completed-game records.
//!
//! A `GameHistoryEntry` is written once when a game completes, whichever mode
//! it was played in. Local games keep full round detail; games reported by
//! external modes (AI, online) may only carry a round count.

use chrono::{DateTime, Utc};
use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, Round, DEFAULT_EMOJI};

/// How a game was played.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameType {
    /// Against computer opponents.
    Ai,
    /// Scored at the table with this engine.
    #[default]
    Local,
    /// Through the external online-session component.
    Online,
}

impl std::fmt::Display for GameType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Ai => "ai",
            Self::Local => "local",
            Self::Online => "online",
        };
        f.write_str(name)
    }
}

fn default_emoji() -> String {
    DEFAULT_EMOJI.to_string()
}

/// A player's result in a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPlayer {
    /// Session id, used to attribute round detail. Absent in some imports.
    #[serde(default)]
    pub id: Option<PlayerId>,

    pub name: String,

    #[serde(default = "default_emoji")]
    pub emoji: String,

    /// Cumulative score at the end of the game.
    pub final_score: i64,
}

impl HistoryPlayer {
    /// Create a result without a session id.
    pub fn new(name: impl Into<String>, final_score: i64) -> Self {
        Self {
            id: None,
            name: name.into(),
            emoji: default_emoji(),
            final_score,
        }
    }

    /// Set the session id (builder pattern).
    #[must_use]
    pub fn with_id(mut self, id: PlayerId) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the emoji (builder pattern).
    #[must_use]
    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = emoji.into();
        self
    }
}

/// One completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameHistoryEntry {
    /// Unique id, the merge key for imports.
    pub id: String,

    /// When the game completed.
    pub date: DateTime<Utc>,

    #[serde(default)]
    pub game_type: GameType,

    /// Results in roster order.
    pub players: Vec<HistoryPlayer>,

    /// Full round detail, when available.
    #[serde(default)]
    pub rounds: Option<Vector<Round>>,

    /// Round count, for entries without detail.
    #[serde(default)]
    pub rounds_played: Option<u32>,

    /// Threshold the game was played to.
    #[serde(default)]
    pub threshold: Option<u32>,
}

impl GameHistoryEntry {
    /// Create an entry without round detail.
    pub fn new(id: impl Into<String>, date: DateTime<Utc>, game_type: GameType) -> Self {
        Self {
            id: id.into(),
            date,
            game_type,
            players: Vec::new(),
            rounds: None,
            rounds_played: None,
            threshold: None,
        }
    }

    /// Add a player result (builder pattern).
    #[must_use]
    pub fn with_player(mut self, player: HistoryPlayer) -> Self {
        self.players.push(player);
        self
    }

    /// Attach full round detail (builder pattern).
    #[must_use]
    pub fn with_rounds(mut self, rounds: Vector<Round>) -> Self {
        self.rounds_played = Some(rounds.len() as u32);
        self.rounds = Some(rounds);
        self
    }

    /// Set the round count only (builder pattern).
    #[must_use]
    pub fn with_rounds_played(mut self, count: u32) -> Self {
        self.rounds_played = Some(count);
        self
    }

    /// Set the threshold (builder pattern).
    #[must_use]
    pub fn with_threshold(mut self, threshold: u32) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Check if this entry carries round-by-round detail.
    #[must_use]
    pub fn has_round_detail(&self) -> bool {
        self.rounds.is_some()
    }

    /// Number of rounds played, from detail when present.
    #[must_use]
    pub fn rounds_played(&self) -> usize {
        match &self.rounds {
            Some(rounds) => rounds.len(),
            None => self.rounds_played.unwrap_or(0) as usize,
        }
    }

    /// Players sorted by final score, lowest first. Ties keep roster order.
    #[must_use]
    pub fn placements(&self) -> Vec<&HistoryPlayer> {
        let mut sorted: Vec<_> = self.players.iter().collect();
        sorted.sort_by_key(|p| p.final_score);
        sorted
    }

    /// The winner (lowest final score), if any players are recorded.
    #[must_use]
    pub fn winner(&self) -> Option<&HistoryPlayer> {
        self.placements().into_iter().next()
    }
}
