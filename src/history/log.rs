//! Capped game history.
//!
//! Entries are kept newest first. Once the cap is reached, recording or
//! importing a game evicts the oldest entries. Merging is keyed on entry id.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::DEFAULT_HISTORY_CAP;

use super::entry::GameHistoryEntry;

/// Outcome of a merge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeSummary {
    /// Entries that are now in history.
    pub added: usize,

    /// Entries skipped because their id was already present.
    pub duplicates: usize,

    /// Entries dropped to stay within the cap (old or new).
    pub evicted: usize,
}

/// Newest-first, capped log of completed games.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameHistory {
    entries: Vector<GameHistoryEntry>,
    cap: usize,
}

impl Default for GameHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAP)
    }
}

impl GameHistory {
    /// Create an empty history holding at most `cap` games.
    #[must_use]
    pub fn new(cap: usize) -> Self {
        assert!(cap > 0, "History cap must be positive");
        Self {
            entries: Vector::new(),
            cap,
        }
    }

    /// Maximum number of entries kept.
    #[must_use]
    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Change the cap, dropping the oldest entries if needed.
    pub fn set_cap(&mut self, cap: usize) {
        assert!(cap > 0, "History cap must be positive");
        self.cap = cap;
        if self.entries.len() > cap {
            self.entries.truncate(cap);
        }
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if history is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &GameHistoryEntry> {
        self.entries.iter()
    }

    /// All entries, newest first.
    #[must_use]
    pub fn entries(&self) -> &Vector<GameHistoryEntry> {
        &self.entries
    }

    /// Most recent entry.
    #[must_use]
    pub fn latest(&self) -> Option<&GameHistoryEntry> {
        self.entries.front()
    }

    /// Find an entry by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&GameHistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Check if an entry with this id is present.
    #[must_use]
    pub fn contains_id(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Record a completed game as the newest entry.
    ///
    /// Returns the entry evicted to stay within the cap, if any.
    pub fn record(&mut self, entry: GameHistoryEntry) -> Option<GameHistoryEntry> {
        debug!(id = %entry.id, game_type = %entry.game_type, "recording game");
        self.entries.push_front(entry);
        if self.entries.len() > self.cap {
            self.entries.pop_back()
        } else {
            None
        }
    }

    /// Remove an entry by id.
    pub fn remove(&mut self, id: &str) -> Option<GameHistoryEntry> {
        let pos = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(pos))
    }

    /// Merge entries from another source.
    ///
    /// Entries whose id is already present (or repeated in `incoming`) are
    /// skipped. New entries are sorted newest first and placed before the
    /// existing ones, then history is truncated to the cap.
    pub fn merge(&mut self, incoming: impl IntoIterator<Item = GameHistoryEntry>) -> MergeSummary {
        let mut seen: FxHashSet<String> = self.entries.iter().map(|e| e.id.clone()).collect();
        let mut summary = MergeSummary::default();

        let mut fresh: Vec<GameHistoryEntry> = Vec::new();
        for entry in incoming {
            if seen.insert(entry.id.clone()) {
                fresh.push(entry);
            } else {
                summary.duplicates += 1;
            }
        }

        if fresh.is_empty() {
            return summary;
        }

        fresh.sort_by(|a, b| b.date.cmp(&a.date));
        let fresh_count = fresh.len();

        let mut merged: Vector<GameHistoryEntry> = fresh.into_iter().collect();
        merged.append(self.entries.clone());
        if merged.len() > self.cap {
            summary.evicted = merged.len() - self.cap;
            merged.truncate(self.cap);
        }
        self.entries = merged;

        summary.added = fresh_count.min(self.cap);
        debug!(
            added = summary.added,
            duplicates = summary.duplicates,
            evicted = summary.evicted,
            "merged history"
        );
        summary
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{GameType, HistoryPlayer};
    use chrono::{Duration, TimeZone, Utc};

    fn entry(id: &str, day: i64) -> GameHistoryEntry {
        let date = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap() + Duration::days(day);
        GameHistoryEntry::new(id, date, GameType::Local)
            .with_player(HistoryPlayer::new("Alice", 40))
            .with_rounds_played(5)
    }

    #[test]
    fn test_record_newest_first() {
        let mut history = GameHistory::new(10);
        history.record(entry("a", 0));
        history.record(entry("b", 1));

        assert_eq!(history.len(), 2);
        assert_eq!(history.latest().unwrap().id, "b");
    }

    #[test]
    fn test_record_evicts_oldest_at_cap() {
        let mut history = GameHistory::new(3);
        for (i, id) in ["a", "b", "c"].iter().enumerate() {
            assert!(history.record(entry(id, i as i64)).is_none());
        }

        let evicted = history.record(entry("d", 3));
        assert_eq!(evicted.unwrap().id, "a");
        assert_eq!(history.len(), 3);
        assert!(!history.contains_id("a"));
    }

    #[test]
    fn test_remove_by_id() {
        let mut history = GameHistory::new(10);
        history.record(entry("a", 0));
        history.record(entry("b", 1));

        assert_eq!(history.remove("a").unwrap().id, "a");
        assert!(history.remove("a").is_none());
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_merge_dedups_against_existing() {
        let mut history = GameHistory::new(10);
        history.record(entry("a", 0));

        let summary = history.merge([entry("a", 0), entry("b", 1)]);
        assert_eq!(summary.added, 1);
        assert_eq!(summary.duplicates, 1);
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_merge_dedups_within_payload() {
        let mut history = GameHistory::new(10);
        let summary = history.merge([entry("x", 0), entry("x", 0)]);
        assert_eq!(summary.added, 1);
        assert_eq!(summary.duplicates, 1);
    }

    #[test]
    fn test_merge_prepends_newest_first() {
        let mut history = GameHistory::new(10);
        history.record(entry("old", 0));

        history.merge([entry("n1", 5), entry("n2", 9)]);

        let ids: Vec<_> = history.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["n2", "n1", "old"]);
    }

    #[test]
    fn test_merge_truncates_to_cap() {
        let mut history = GameHistory::new(3);
        history.record(entry("a", 0));
        history.record(entry("b", 1));

        let summary = history.merge([entry("c", 2), entry("d", 3)]);
        assert_eq!(summary.added, 2);
        assert_eq!(summary.evicted, 1);
        assert_eq!(history.len(), 3);
        assert!(!history.contains_id("a"));
    }

    #[test]
    fn test_merge_nothing_new_is_noop() {
        let mut history = GameHistory::new(3);
        history.record(entry("a", 0));
        let before = history.clone();

        let summary = history.merge([entry("a", 0)]);
        assert_eq!(summary.added, 0);
        assert_eq!(history, before);
    }

    #[test]
    #[should_panic(expected = "History cap must be positive")]
    fn test_zero_cap() {
        let _ = GameHistory::new(0);
    }
}
