//! # skyjo-ledger
//!
//! Score tracking and meta-progression for a Skyjo-style card game.
//!
//! ## Design Principles
//!
//! 1. **Derived, not stored**: Totals and session status are recomputed from
//!    the round ledger. Nothing can drift out of sync with the rounds.
//!
//! 2. **One owner**: `SessionController` is the only thing that mutates
//!    session, history and progression. A finished game reaches history and
//!    progression in the same command that finished it.
//!
//! 3. **Bounded history**: At most `EngineConfig::history_cap` games are kept,
//!    newest first. Imports merge by entry id and are idempotent.
//!
//! ## Scoring
//!
//! Each round, one player "finishes" (closes the round). If the finisher's
//! raw score is not the lowest of the round (ties count as lowest), it is
//! doubled. Game ends when any total reaches the threshold; lowest total wins.
//!
//! ## Modules
//!
//! - `core`: Player ids, rounds, configuration, entry ids
//! - `ledger`: Finisher rule and totals
//! - `session`: Local state machine and external game mirrors
//! - `history`: Capped game log, import/export
//! - `progression`: XP, levels, achievements
//! - `stats`: Per-player stats, leaderboard, records
//! - `controller`: Command surface and events

pub mod core;
pub mod error;
pub mod ledger;
pub mod session;
pub mod history;
pub mod progression;
pub mod stats;
pub mod controller;

// Re-export commonly used types
pub use crate::core::{
    EngineConfig, EntryIdGen, Player, PlayerId,
    Round, Score, ScoreMap, XpTable, score_map,
};

pub use crate::error::{EngineError, Result, ValidationError};

pub use crate::ledger::RoundLedger;

pub use crate::session::{
    ActiveGameSession, ExternalSession, GameSession, SessionSnapshot, SessionStatus, Standing,
};

pub use crate::history::{GameHistory, GameHistoryEntry, GameType, HistoryPlayer, MergeSummary};

pub use crate::progression::{
    AchievementId, AchievementRegistry, ProgressionEngine, ProgressionReport, ProgressionState,
};

pub use crate::stats::{PlayerStats, Records, StatsAggregator, StatsReport};

pub use crate::controller::{EngineEvent, EngineSnapshot, SessionController};
