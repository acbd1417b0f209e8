//! Committed rounds.
//!
//! A `Round` is created exactly once when a round is added to a session and
//! never changes afterwards. It keeps both the scores as entered (`raw_scores`)
//! and the scores after the finisher rule (`scores`), so a reader can always
//! tell whether the finisher was doubled.

use im::OrdMap;
use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// Points scored in a single round. Can be negative.
pub type Score = i32;

/// Per-player scores for one round, ordered by player id.
pub type ScoreMap = OrdMap<PlayerId, Score>;

/// Build a `ScoreMap` from `(id, score)` pairs.
///
/// ```
/// use skyjo_ledger::core::{score_map, PlayerId};
///
/// let scores = score_map([(PlayerId::new(0), -2), (PlayerId::new(1), 5)]);
/// assert_eq!(scores.get(&PlayerId::new(1)), Some(&5));
/// ```
pub fn score_map(pairs: impl IntoIterator<Item = (PlayerId, Score)>) -> ScoreMap {
    pairs.into_iter().collect()
}

/// One committed round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    /// 0-based position in the session.
    pub index: usize,

    /// Final scores after the finisher rule.
    pub scores: ScoreMap,

    /// Scores as entered.
    pub raw_scores: ScoreMap,

    /// Player who closed the round.
    pub finisher_id: PlayerId,
}

impl Round {
    /// Final score for a player, if they played this round.
    #[must_use]
    pub fn score(&self, player: PlayerId) -> Option<Score> {
        self.scores.get(&player).copied()
    }

    /// Entered score for a player, if they played this round.
    #[must_use]
    pub fn raw_score(&self, player: PlayerId) -> Option<Score> {
        self.raw_scores.get(&player).copied()
    }

    /// Check if the player closed this round.
    #[must_use]
    pub fn is_finisher(&self, player: PlayerId) -> bool {
        self.finisher_id == player
    }

    /// Check if the player's score was changed by the finisher rule.
    #[must_use]
    pub fn is_doubled(&self, player: PlayerId) -> bool {
        match (self.score(player), self.raw_score(player)) {
            (Some(score), Some(raw)) => score != raw,
            _ => false,
        }
    }

    /// Check if the finisher paid the doubling penalty.
    #[must_use]
    pub fn finisher_doubled(&self) -> bool {
        self.is_doubled(self.finisher_id)
    }

    /// Number of players with a score in this round.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.scores.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doubled_round() -> Round {
        let a = PlayerId::new(0);
        let b = PlayerId::new(1);
        Round {
            index: 0,
            scores: score_map([(a, -2), (b, 10)]),
            raw_scores: score_map([(a, -2), (b, 5)]),
            finisher_id: b,
        }
    }

    #[test]
    fn test_round_accessors() {
        let round = doubled_round();
        assert_eq!(round.score(PlayerId::new(1)), Some(10));
        assert_eq!(round.raw_score(PlayerId::new(1)), Some(5));
        assert_eq!(round.score(PlayerId::new(9)), None);
        assert_eq!(round.player_count(), 2);
    }

    #[test]
    fn test_round_doubling_flags() {
        let round = doubled_round();
        assert!(round.is_finisher(PlayerId::new(1)));
        assert!(round.is_doubled(PlayerId::new(1)));
        assert!(!round.is_doubled(PlayerId::new(0)));
        assert!(round.finisher_doubled());
    }

    #[test]
    fn test_round_serialization_uses_camel_case() {
        let round = doubled_round();
        let json = serde_json::to_string(&round).unwrap();
        assert!(json.contains("rawScores"));
        assert!(json.contains("finisherId"));

        let deserialized: Round = serde_json::from_str(&json).unwrap();
        assert_eq!(round, deserialized);
    }
}
