//! Read-only session views handed to presentation code.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{Player, Round};

use super::status::SessionStatus;

/// A player with their running total.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub player: Player,
    pub total: i64,
}

/// Immutable view of a session.
///
/// Rounds share structure with the live session, so taking a snapshot after
/// every command is cheap.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    pub threshold: Option<u32>,

    /// Players sorted by total, lowest first. Ties keep roster order.
    pub standings: Vec<Standing>,

    pub rounds: Vector<Round>,
}

impl SessionSnapshot {
    /// The leading player (lowest total).
    #[must_use]
    pub fn leader(&self) -> Option<&Standing> {
        self.standings.first()
    }

    /// Number of committed rounds.
    #[must_use]
    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    /// Points the player can still score before reaching the threshold.
    #[must_use]
    pub fn points_to_threshold(&self, standing: &Standing) -> Option<i64> {
        self.threshold.map(|t| i64::from(t) - standing.total)
    }
}
