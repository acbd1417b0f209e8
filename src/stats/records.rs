//! Record holders.
//!
//! Every record keeps the first player to reach the winning value, walking
//! players in aggregation order. Later players only take a record by strictly
//! beating it.

use serde::{Deserialize, Serialize};

use crate::core::Score;

use super::player::PlayerStats;

/// Who holds a record, and at what value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordHolder<T> {
    pub name: String,
    pub value: T,
}

/// All tracked records.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Records {
    /// Lowest single-round score by anyone.
    pub best_round_ever: Option<RecordHolder<Score>>,

    pub most_wins: Option<RecordHolder<u32>>,

    /// Lowest average per round.
    pub best_average: Option<RecordHolder<f64>>,

    pub best_win_rate: Option<RecordHolder<f64>>,

    pub most_negative_rounds: Option<RecordHolder<u32>>,
}

/// Keep the first candidate unless a later one is strictly better.
fn take_if_better<T: Copy>(
    slot: &mut Option<RecordHolder<T>>,
    name: &str,
    value: T,
    better: impl Fn(T, T) -> bool,
) {
    let replace = match slot {
        Some(current) => better(value, current.value),
        None => true,
    };
    if replace {
        *slot = Some(RecordHolder {
            name: name.to_string(),
            value,
        });
    }
}

impl Records {
    /// Compute records over players in aggregation order.
    #[must_use]
    pub fn from_players(players: &[PlayerStats]) -> Self {
        let mut records = Self::default();

        for p in players {
            if let Some(best) = p.best_round {
                take_if_better(&mut records.best_round_ever, &p.name, best, |a, b| a < b);
            }
            if p.wins > 0 {
                take_if_better(&mut records.most_wins, &p.name, p.wins, |a, b| a > b);
            }
            if p.rounds_played > 0 {
                take_if_better(&mut records.best_average, &p.name, p.avg_per_round(), |a, b| a < b);
            }
            if p.games_played > 0 {
                take_if_better(&mut records.best_win_rate, &p.name, p.win_rate(), |a, b| a > b);
            }
            if p.negative_rounds > 0 {
                take_if_better(&mut records.most_negative_rounds, &p.name, p.negative_rounds, |a, b| a > b);
            }
        }

        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(name: &str, best: Option<Score>, wins: u32) -> PlayerStats {
        PlayerStats {
            best_round: best,
            wins,
            games_played: 3,
            ..PlayerStats::new(name, "🙂")
        }
    }

    #[test]
    fn test_best_round_ties_keep_first() {
        let players = vec![player("Alice", Some(-5), 0), player("Bob", Some(-5), 0)];
        let records = Records::from_players(&players);
        assert_eq!(records.best_round_ever.unwrap().name, "Alice");
    }

    #[test]
    fn test_best_round_skips_players_without_rounds() {
        let players = vec![player("Alice", None, 0), player("Bob", Some(4), 0)];
        let records = Records::from_players(&players);
        assert_eq!(
            records.best_round_ever,
            Some(RecordHolder {
                name: "Bob".to_string(),
                value: 4
            })
        );
    }

    #[test]
    fn test_most_wins() {
        let players = vec![player("Alice", None, 1), player("Bob", None, 2), player("Chloé", None, 2)];
        let records = Records::from_players(&players);
        assert_eq!(records.most_wins.unwrap().name, "Bob");
    }

    #[test]
    fn test_no_records_when_empty() {
        let records = Records::from_players(&[]);
        assert_eq!(records, Records::default());
    }
}
