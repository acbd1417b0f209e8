//! Round scoring and running totals.
//!
//! ## Finisher rule
//!
//! The player who closes a round keeps their entered score only if it is the
//! lowest entered score of the round (ties at the minimum count as lowest).
//! Otherwise their score for the round is doubled. Everyone else keeps the
//! entered score. Doubling a negative score makes it more negative; the rule
//! does not look at the sign.
//!
//! ```
//! use skyjo_ledger::core::{score_map, PlayerId};
//! use skyjo_ledger::ledger::RoundLedger;
//!
//! let a = PlayerId::new(0);
//! let b = PlayerId::new(1);
//! let raw = score_map([(a, -2), (b, 5)]);
//!
//! let scores = RoundLedger::apply_finisher_rule(&raw, b);
//! assert_eq!(scores[&a], -2);
//! assert_eq!(scores[&b], 10);
//! ```

use im::Vector;
use rustc_hash::FxHashMap;

use crate::core::{PlayerId, Round, Score, ScoreMap};

/// Stateless scoring helper.
pub struct RoundLedger;

impl RoundLedger {
    /// Check if a score can be entered for a round.
    ///
    /// Any accepted score can be doubled without leaving `Score`.
    #[must_use]
    pub const fn score_in_range(score: Score) -> bool {
        score.checked_mul(2).is_some()
    }

    /// Apply the finisher rule to entered scores.
    ///
    /// A finisher with no entry leaves the scores unchanged. Scores outside
    /// `score_in_range` saturate when doubled.
    #[must_use]
    pub fn apply_finisher_rule(raw_scores: &ScoreMap, finisher: PlayerId) -> ScoreMap {
        let Some(round_min) = raw_scores.values().copied().min() else {
            return ScoreMap::new();
        };

        let mut scores = raw_scores.clone();
        if let Some(finisher_score) = raw_scores.get(&finisher).copied() {
            if finisher_score != round_min {
                scores.insert(finisher, finisher_score.saturating_mul(2));
            }
        }
        scores
    }

    /// Sum each player's final scores across all rounds.
    ///
    /// Players with no rounds total 0.
    #[must_use]
    pub fn compute_totals(
        rounds: &Vector<Round>,
        player_ids: impl IntoIterator<Item = PlayerId>,
    ) -> FxHashMap<PlayerId, i64> {
        player_ids
            .into_iter()
            .map(|player| (player, Self::total_for(rounds, player)))
            .collect()
    }

    /// Total for a single player.
    #[must_use]
    pub fn total_for(rounds: &Vector<Round>, player: PlayerId) -> i64 {
        rounds
            .iter()
            .filter_map(|round| round.score(player))
            .map(i64::from)
            .sum()
    }

    /// A player's final score in each round, in round order.
    ///
    /// Rounds the player has no score for are skipped.
    #[must_use]
    pub fn round_breakdown(rounds: &Vector<Round>, player: PlayerId) -> Vec<Score> {
        rounds.iter().filter_map(|round| round.score(player)).collect()
    }
}
