//! Core types: players, rounds, configuration, id generation.
//!
//! Everything else in the crate is built from these. They carry no behavior
//! beyond accessors; rules live in `ledger` and `session`.

pub mod player;
pub mod round;
pub mod config;
pub mod rng;

pub use player::{Player, PlayerId, DEFAULT_EMOJI};
pub use round::{score_map, Round, Score, ScoreMap};
pub use config::{EngineConfig, XpTable, DEFAULT_HISTORY_CAP, DEFAULT_THRESHOLD, DEFAULT_XP_PER_LEVEL};
pub use rng::{EntryIdGen, EntryIdGenState};
