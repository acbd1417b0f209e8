//! Statistics over completed games: per-player rows, leaderboard, records,
//! recent-games series.

pub mod player;
pub mod records;
pub mod aggregator;

pub use player::PlayerStats;
pub use records::{RecordHolder, Records};
pub use aggregator::{LeaderboardRow, RecentGame, StatsAggregator, StatsReport};
