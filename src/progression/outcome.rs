//! Final placements of a completed game.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{PlayerId, Round};
use crate::history::{GameHistoryEntry, GameType};

/// One player's finishing position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub id: Option<PlayerId>,
    pub name: String,
    pub total: i64,
}

/// A completed game, players ordered by placement (lowest total first).
///
/// Built from the history entry so local and external games go through the
/// same path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub game_type: GameType,

    /// Placement 0 is the winner. Ties keep roster order.
    pub placements: SmallVec<[Placement; 8]>,

    pub rounds: Option<Vector<Round>>,
    pub rounds_played: usize,
}

impl GameOutcome {
    /// Derive placements from a history entry.
    #[must_use]
    pub fn from_entry(entry: &GameHistoryEntry) -> Self {
        let placements = entry
            .placements()
            .into_iter()
            .map(|p| Placement {
                id: p.id,
                name: p.name.clone(),
                total: p.final_score,
            })
            .collect();

        Self {
            game_type: entry.game_type,
            placements,
            rounds: entry.rounds.clone(),
            rounds_played: entry.rounds_played(),
        }
    }

    /// The winner.
    #[must_use]
    pub fn winner(&self) -> Option<&Placement> {
        self.placements.first()
    }

    /// Placement of a player by name.
    #[must_use]
    pub fn placement_of(&self, name: &str) -> Option<usize> {
        self.placements.iter().position(|p| p.name == name)
    }

    /// Number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.placements.len()
    }

    /// Points between first and second place.
    #[must_use]
    pub fn winning_margin(&self) -> Option<i64> {
        match self.placements.as_slice() {
            [first, second, ..] => Some(second.total - first.total),
            _ => None,
        }
    }

    /// Check if any round ended with a negative final score.
    #[must_use]
    pub fn has_negative_round(&self) -> bool {
        self.rounds
            .iter()
            .flatten()
            .any(|round| round.scores.values().any(|&s| s < 0))
    }

    /// Check if any finisher was doubled.
    #[must_use]
    pub fn has_doubled_finisher(&self) -> bool {
        self.rounds.iter().flatten().any(Round::finisher_doubled)
    }
}
