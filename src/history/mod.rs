//! Completed-game history: entries, the capped log, import/export.

pub mod entry;
pub mod log;
pub mod envelope;

pub use entry::{GameHistoryEntry, GameType, HistoryPlayer};
pub use log::{GameHistory, MergeSummary};
pub use envelope::{HistoryEnvelope, EXPORT_VERSION};
