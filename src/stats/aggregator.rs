//! History aggregation.
//!
//! Aggregation walks history newest first and players in entry order. A
//! player's stats row is created the first time their name is seen; that
//! order is the "aggregation order" used for ties everywhere in the report.
//!
//! Names, not ids, are the key: ids only identify a player within one game.

use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::history::{GameHistory, GameHistoryEntry, GameType};

use super::player::PlayerStats;
use super::records::Records;

/// Leaderboard line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    /// 1-based rank.
    pub rank: usize,
    pub name: String,
    pub emoji: String,
    pub wins: u32,
    pub games_played: u32,
    pub win_rate: f64,
}

/// One point of the recent-games series.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentGame {
    pub id: String,
    pub date: DateTime<Utc>,
    pub game_type: GameType,
    pub winner: Option<String>,
    pub winning_score: Option<i64>,
    pub rounds_played: usize,

    /// `(name, final score)` in roster order.
    pub scores: Vec<(String, i64)>,
}

impl RecentGame {
    fn from_entry(entry: &GameHistoryEntry) -> Self {
        let winner = entry.winner();
        Self {
            id: entry.id.clone(),
            date: entry.date,
            game_type: entry.game_type,
            winner: winner.map(|w| w.name.clone()),
            winning_score: winner.map(|w| w.final_score),
            rounds_played: entry.rounds_played(),
            scores: entry
                .players
                .iter()
                .map(|p| (p.name.clone(), p.final_score))
                .collect(),
        }
    }
}

/// Everything the stats screens display.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsReport {
    pub total_games: usize,

    /// Per-player rows in aggregation order.
    pub players: Vec<PlayerStats>,

    /// Most wins first; ties keep aggregation order.
    pub leaderboard: Vec<LeaderboardRow>,

    pub records: Records,

    /// Most recent games, oldest first (chart order).
    pub recent_games: Vec<RecentGame>,
}

impl StatsReport {
    /// Look up a player's row.
    #[must_use]
    pub fn player(&self, name: &str) -> Option<&PlayerStats> {
        self.players.iter().find(|p| p.name == name)
    }
}

/// Read-only aggregation over history.
pub struct StatsAggregator;

impl StatsAggregator {
    /// Aggregate per-player rows.
    #[must_use]
    pub fn player_stats(history: &GameHistory) -> Vec<PlayerStats> {
        let mut rows: Vec<PlayerStats> = Vec::new();
        let mut index: FxHashMap<String, usize> = FxHashMap::default();

        for entry in history.iter() {
            let winner = entry.winner();

            for player in &entry.players {
                let slot = *index.entry(player.name.clone()).or_insert_with(|| {
                    rows.push(PlayerStats::new(player.name.clone(), player.emoji.clone()));
                    rows.len() - 1
                });
                let stats = &mut rows[slot];

                stats.games_played += 1;
                stats.total_score += player.final_score;
                // Placement 0 only, even if an imported entry repeats the name
                if winner.is_some_and(|w| std::ptr::eq(w, player)) {
                    stats.wins += 1;
                }

                match (&entry.rounds, player.id) {
                    (Some(rounds), Some(id)) => {
                        for round in rounds {
                            stats.record_round(round, id);
                        }
                    }
                    _ => stats.rounds_played += entry.rounds_played() as u32,
                }
            }
        }

        rows
    }

    /// Leaderboard from per-player rows.
    #[must_use]
    pub fn leaderboard(players: &[PlayerStats]) -> Vec<LeaderboardRow> {
        let mut sorted: Vec<&PlayerStats> = players.iter().collect();
        sorted.sort_by(|a, b| b.wins.cmp(&a.wins));

        sorted
            .into_iter()
            .enumerate()
            .map(|(i, p)| LeaderboardRow {
                rank: i + 1,
                name: p.name.clone(),
                emoji: p.emoji.clone(),
                wins: p.wins,
                games_played: p.games_played,
                win_rate: p.win_rate(),
            })
            .collect()
    }

    /// The `count` most recent games, oldest first.
    #[must_use]
    pub fn recent_games(history: &GameHistory, count: usize) -> Vec<RecentGame> {
        let mut games: Vec<RecentGame> = history.iter().take(count).map(RecentGame::from_entry).collect();
        games.reverse();
        games
    }

    /// Full report.
    #[must_use]
    pub fn aggregate(history: &GameHistory, recent_count: usize) -> StatsReport {
        let players = Self::player_stats(history);
        debug!(games = history.len(), players = players.len(), "aggregated stats");

        StatsReport {
            total_games: history.len(),
            leaderboard: Self::leaderboard(&players),
            records: Records::from_players(&players),
            recent_games: Self::recent_games(history, recent_count),
            players,
        }
    }
}
