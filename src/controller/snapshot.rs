//! Storage snapshot.
//!
//! The engine does not persist anything itself. It hands storage an
//! `EngineSnapshot` (or its bincode bytes) and takes one back on startup.

use serde::{Deserialize, Serialize};

use crate::core::EntryIdGenState;
use crate::error::Result;
use crate::history::GameHistory;
use crate::progression::ProgressionState;
use crate::session::GameSession;

/// Snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Everything needed to restore a controller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub version: u32,
    pub session: GameSession,
    pub history: GameHistory,
    pub progression: ProgressionState,
    pub id_gen: EntryIdGenState,

    /// History entry written for the current session, if it finished.
    pub recorded_entry: Option<String>,
}

impl EngineSnapshot {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from bincode.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}
