//! Per-player aggregates across history.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, Round, Score};

/// Aggregated results for one player name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub name: String,

    /// Emoji from the most recent game seen.
    pub emoji: String,

    pub games_played: u32,
    pub wins: u32,

    /// Sum of final scores over all games.
    pub total_score: i64,

    pub rounds_played: u32,

    /// Lowest single-round score (detailed games only).
    pub best_round: Option<Score>,

    /// Highest single-round score (detailed games only).
    pub worst_round: Option<Score>,

    /// Rounds this player closed.
    pub finishes: u32,

    /// Closed rounds where the score was doubled.
    pub doubled_finishes: u32,

    /// Rounds with a final score below zero.
    pub negative_rounds: u32,
}

impl PlayerStats {
    /// Create empty statistics for a player.
    pub fn new(name: impl Into<String>, emoji: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            emoji: emoji.into(),
            ..Self::default()
        }
    }

    /// Fold one detailed round into the aggregate.
    pub fn record_round(&mut self, round: &Round, player: PlayerId) {
        let Some(score) = round.score(player) else {
            return;
        };

        self.rounds_played += 1;
        self.best_round = Some(self.best_round.map_or(score, |b| b.min(score)));
        self.worst_round = Some(self.worst_round.map_or(score, |w| w.max(score)));
        if score < 0 {
            self.negative_rounds += 1;
        }
        if round.is_finisher(player) {
            self.finishes += 1;
            if round.is_doubled(player) {
                self.doubled_finishes += 1;
            }
        }
    }

    /// Average final score per round (0 when no rounds).
    #[must_use]
    pub fn avg_per_round(&self) -> f64 {
        if self.rounds_played == 0 {
            0.0
        } else {
            self.total_score as f64 / self.rounds_played as f64
        }
    }

    /// Percentage of games won (0 when no games).
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            self.wins as f64 / self.games_played as f64 * 100.0
        }
    }

    /// Percentage of closed rounds that were not doubled.
    ///
    /// `None` when the player never closed a round.
    #[must_use]
    pub fn finish_success_rate(&self) -> Option<f64> {
        if self.finishes == 0 {
            None
        } else {
            Some((self.finishes - self.doubled_finishes) as f64 / self.finishes as f64 * 100.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::score_map;

    #[test]
    fn test_derived_metrics_empty() {
        let stats = PlayerStats::new("Alice", "🦊");
        assert_eq!(stats.avg_per_round(), 0.0);
        assert_eq!(stats.win_rate(), 0.0);
        assert_eq!(stats.finish_success_rate(), None);
    }

    #[test]
    fn test_derived_metrics() {
        let stats = PlayerStats {
            games_played: 4,
            wins: 1,
            total_score: 90,
            rounds_played: 30,
            finishes: 4,
            doubled_finishes: 1,
            ..PlayerStats::new("Alice", "🦊")
        };

        assert_eq!(stats.avg_per_round(), 3.0);
        assert_eq!(stats.win_rate(), 25.0);
        assert_eq!(stats.finish_success_rate(), Some(75.0));
    }

    #[test]
    fn test_record_round() {
        let a = PlayerId::new(0);
        let b = PlayerId::new(1);
        let round = Round {
            index: 0,
            scores: score_map([(a, -3), (b, 14)]),
            raw_scores: score_map([(a, -3), (b, 7)]),
            finisher_id: b,
        };

        let mut alice = PlayerStats::new("Alice", "🦊");
        let mut bob = PlayerStats::new("Bob", "🐻");
        alice.record_round(&round, a);
        bob.record_round(&round, b);

        assert_eq!(alice.negative_rounds, 1);
        assert_eq!(alice.best_round, Some(-3));
        assert_eq!(alice.finishes, 0);
        assert_eq!(bob.finishes, 1);
        assert_eq!(bob.doubled_finishes, 1);
        assert_eq!(bob.worst_round, Some(14));

        bob.record_round(&round, PlayerId::new(9));
        assert_eq!(bob.rounds_played, 1);
    }
}
