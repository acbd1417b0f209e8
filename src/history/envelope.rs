//! Import/export envelope.
//!
//! Exported histories are JSON documents of the form
//! `{"version": 1, "exportDate": "...", "gameHistory": [...]}`. Imports only
//! require the `gameHistory` array; every element must parse as a
//! `GameHistoryEntry` or the whole import is rejected.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::{EngineError, Result};

use super::entry::GameHistoryEntry;
use super::log::{GameHistory, MergeSummary};

/// Envelope format version written by `export`.
pub const EXPORT_VERSION: u32 = 1;

/// Serialized history payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEnvelope {
    pub version: u32,
    pub export_date: DateTime<Utc>,
    pub game_history: Vec<GameHistoryEntry>,
}

impl HistoryEnvelope {
    /// Wrap the current history for export.
    #[must_use]
    pub fn export(history: &GameHistory, export_date: DateTime<Utc>) -> Self {
        Self {
            version: EXPORT_VERSION,
            export_date,
            game_history: history.iter().cloned().collect(),
        }
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| EngineError::InvalidFormat(e.to_string()))
    }

    /// Extract history entries from a JSON payload.
    ///
    /// Only `gameHistory` is required; `version` and `exportDate` are not
    /// checked so older exports still load.
    pub fn parse_entries(payload: &str) -> Result<Vec<GameHistoryEntry>> {
        let value: Value = serde_json::from_str(payload).map_err(|e| {
            warn!(error = %e, "import payload is not JSON");
            EngineError::InvalidFormat(e.to_string())
        })?;
        Self::entries_from_value(value)
    }

    /// Extract history entries from an already-parsed payload.
    pub fn entries_from_value(value: Value) -> Result<Vec<GameHistoryEntry>> {
        let Value::Object(mut fields) = value else {
            return Err(EngineError::InvalidFormat("payload is not an object".to_string()));
        };

        let Some(Value::Array(items)) = fields.remove("gameHistory") else {
            warn!("import payload has no gameHistory array");
            return Err(EngineError::InvalidFormat("missing gameHistory array".to_string()));
        };

        items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                serde_json::from_value(item).map_err(|e| {
                    warn!(index = i, error = %e, "malformed history entry");
                    EngineError::InvalidFormat(format!("entry {i}: {e}"))
                })
            })
            .collect()
    }
}

impl GameHistory {
    /// Merge a JSON payload into history.
    ///
    /// On any format error history is left untouched.
    pub fn import_json(&mut self, payload: &str) -> Result<MergeSummary> {
        let entries = HistoryEnvelope::parse_entries(payload)?;
        Ok(self.merge(entries))
    }

    /// Export as a JSON payload.
    pub fn export_json(&self, export_date: DateTime<Utc>) -> Result<String> {
        HistoryEnvelope::export(self, export_date).to_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{GameType, HistoryPlayer};
    use chrono::TimeZone;

    fn sample_history() -> GameHistory {
        let mut history = GameHistory::new(50);
        let date = Utc.with_ymd_and_hms(2024, 3, 2, 18, 30, 0).unwrap();
        history.record(
            GameHistoryEntry::new("g1", date, GameType::Local)
                .with_player(HistoryPlayer::new("Alice", 88))
                .with_player(HistoryPlayer::new("Bob", 102))
                .with_rounds_played(6),
        );
        history
    }

    #[test]
    fn test_export_shape() {
        let date = Utc.with_ymd_and_hms(2024, 3, 3, 0, 0, 0).unwrap();
        let json = sample_history().export_json(date).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["version"], 1);
        assert!(value["exportDate"].is_string());
        assert_eq!(value["gameHistory"].as_array().unwrap().len(), 1);
        assert_eq!(value["gameHistory"][0]["gameType"], "local");
    }

    #[test]
    fn test_export_then_import_into_empty() {
        let date = Utc.with_ymd_and_hms(2024, 3, 3, 0, 0, 0).unwrap();
        let json = sample_history().export_json(date).unwrap();

        let mut fresh = GameHistory::new(50);
        let summary = fresh.import_json(&json).unwrap();
        assert_eq!(summary.added, 1);
        assert_eq!(fresh.get("g1").unwrap().players.len(), 2);
    }

    #[test]
    fn test_reject_non_json() {
        let mut history = sample_history();
        let err = history.import_json("not json").unwrap_err();
        assert!(matches!(err, EngineError::InvalidFormat(_)));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_reject_missing_array() {
        let mut history = sample_history();
        assert!(history.import_json(r#"{"version": 1}"#).is_err());
        assert!(history.import_json(r#"{"gameHistory": {}}"#).is_err());
        assert!(history.import_json("[]").is_err());
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_reject_whole_import_on_bad_entry() {
        let mut history = sample_history();
        let payload = r#"{"gameHistory": [
            {"id": "ok", "date": "2024-01-01T00:00:00Z", "players": []},
            {"id": "bad", "players": "nope"}
        ]}"#;

        let err = history.import_json(payload).unwrap_err();
        assert!(err.to_string().contains("entry 1"));
        assert_eq!(history.len(), 1);
        assert!(!history.contains_id("ok"));
    }
}
