//! The session controller.
//!
//! Owns the local session, any external session, the history and the
//! progression state, and is the only thing that mutates them. Every command
//! runs the whole side-effect chain before returning:
//!
//! ```text
//! add_round ─▶ session commit ─▶ history append ─▶ progression ─▶ events
//! ```
//!
//! so a caller that sees FINISHED also sees the history entry and the
//! updated level in the same step.
//!
//! ## Undo after finishing
//!
//! Undoing the round that finished a game removes that game's history entry.
//! Finishing again writes the entry back under the same id. XP and
//! achievements are awarded on the first finish only.

use chrono::Utc;
use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use crate::core::{EngineConfig, EntryIdGen, Player, PlayerId, ScoreMap};
use crate::error::{Result, ValidationError};
use crate::history::{GameHistory, GameHistoryEntry, GameType, MergeSummary};
use crate::progression::{GameOutcome, ProgressionEngine, ProgressionReport, ProgressionState};
use crate::session::{ActiveGameSession, ExternalSession, GameSession, SessionSnapshot};
use crate::stats::{StatsAggregator, StatsReport};

use super::event::EngineEvent;
use super::snapshot::{EngineSnapshot, SNAPSHOT_VERSION};

/// Single owner of all mutable engine state.
pub struct SessionController {
    config: EngineConfig,
    session: GameSession,
    external: Option<ExternalSession>,
    active: GameType,
    history: GameHistory,
    progression: ProgressionState,
    engine: ProgressionEngine,
    ids: EntryIdGen,
    recorded_entry: Option<String>,
    progression_awarded: bool,
    events: Vec<EngineEvent>,
}

impl SessionController {
    /// Create a controller with OS-seeded entry ids.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self::with_ids(config, EntryIdGen::from_entropy())
    }

    /// Create a controller with a fixed id seed (reproducible ids).
    #[must_use]
    pub fn with_seed(config: EngineConfig, seed: u64) -> Self {
        Self::with_ids(config, EntryIdGen::new(seed))
    }

    fn with_ids(config: EngineConfig, ids: EntryIdGen) -> Self {
        Self {
            history: GameHistory::new(config.history_cap),
            engine: ProgressionEngine::from_config(&config),
            config,
            session: GameSession::new(),
            external: None,
            active: GameType::Local,
            progression: ProgressionState::new(),
            ids,
            recorded_entry: None,
            progression_awarded: false,
            events: Vec::new(),
        }
    }

    /// Replace the progression engine (custom achievements or XP).
    #[must_use]
    pub fn with_engine(mut self, engine: ProgressionEngine) -> Self {
        self.engine = engine;
        self
    }

    // === Reads ===

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The local session.
    #[must_use]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Snapshot of the local session.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    #[must_use]
    pub fn history(&self) -> &GameHistory {
        &self.history
    }

    #[must_use]
    pub fn progression(&self) -> &ProgressionState {
        &self.progression
    }

    /// Check if a level-up is waiting to be celebrated.
    #[must_use]
    pub fn has_pending_level_up(&self) -> bool {
        self.progression.has_pending_level_up()
    }

    /// Aggregate statistics over history.
    #[must_use]
    pub fn stats(&self) -> StatsReport {
        StatsAggregator::aggregate(&self.history, self.config.recent_games)
    }

    /// Which kind of game the UI is currently showing.
    #[must_use]
    pub fn active_type(&self) -> GameType {
        self.active
    }

    /// The game selected by `active_type`, if one is running.
    #[must_use]
    pub fn active_session(&self) -> Option<&dyn ActiveGameSession> {
        match self.active {
            GameType::Local => Some(&self.session as &dyn ActiveGameSession),
            other => self
                .external
                .as_ref()
                .filter(|e| e.game_type() == other)
                .map(|e| e as &dyn ActiveGameSession),
        }
    }

    /// Take all queued events, oldest first.
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    // === Setup commands ===

    /// Add a player to the local roster.
    pub fn add_player(&mut self, name: &str, emoji: &str) -> Result<PlayerId> {
        Ok(self.session.add_player(name, emoji)?)
    }

    /// Remove a player from the local roster.
    pub fn remove_player(&mut self, id: PlayerId) -> Result<Player> {
        Ok(self.session.remove_player(id)?)
    }

    /// Set the local threshold.
    pub fn set_threshold(&mut self, threshold: u32) -> Result<()> {
        Ok(self.session.set_threshold(threshold)?)
    }

    /// Start the local game, using the configured threshold if none was set.
    pub fn start_game(&mut self) -> Result<SessionSnapshot> {
        if self.session.threshold().is_none() {
            self.session.set_threshold(self.config.default_threshold)?;
        }
        self.session.start()?;
        self.active = GameType::Local;
        Ok(self.session.snapshot())
    }

    /// Replace the local session with a started one for this roster.
    pub fn start_with_players(&mut self, players: Vec<Player>, threshold: u32) -> Result<SessionSnapshot> {
        self.session = GameSession::with_players(players, threshold)?;
        self.recorded_entry = None;
        self.progression_awarded = false;
        self.active = GameType::Local;
        Ok(self.session.snapshot())
    }

    // === Play commands ===

    /// Commit a round to the local session.
    ///
    /// When the round finishes the game, the history entry, progression and
    /// events are all applied before this returns.
    pub fn add_round(&mut self, scores: ScoreMap, finisher: PlayerId) -> Result<SessionSnapshot> {
        let commit = self.session.add_round(scores, finisher).map_err(|e| {
            warn!(error = %e, "round rejected");
            e
        })?;

        self.events.push(EngineEvent::RoundCommitted {
            index: commit.round.index,
            finisher_doubled: commit.round.finisher_doubled(),
        });

        if commit.finished {
            let id = match &self.recorded_entry {
                Some(id) => id.clone(),
                None => self.ids.next_id(Utc::now().timestamp_millis()),
            };
            let entry = self.session.to_history_entry(id.clone(), Utc::now());
            self.recorded_entry = Some(id);

            if self.progression_awarded {
                debug!("re-finished after undo, progression already awarded");
                self.record_entry(entry);
            } else {
                self.progression_awarded = true;
                self.complete_game(entry);
            }
        }

        Ok(self.session.snapshot())
    }

    /// Remove the last local round.
    pub fn undo_last_round(&mut self) -> Result<SessionSnapshot> {
        let was_finished = self.session.status().is_finished();
        let round = self.session.undo_last_round()?;
        self.events.push(EngineEvent::RoundUndone { index: round.index });

        if was_finished && !self.session.status().is_finished() {
            if let Some(id) = &self.recorded_entry {
                if self.history.remove(id).is_some() {
                    info!(%id, "finished game reopened, history entry withdrawn");
                }
            }
        }

        Ok(self.session.snapshot())
    }

    /// Clear the local session back to SETUP.
    pub fn reset_game(&mut self) -> SessionSnapshot {
        self.session.reset_game();
        self.recorded_entry = None;
        self.progression_awarded = false;
        self.events.push(EngineEvent::GameReset);
        self.session.snapshot()
    }

    // === External games ===

    /// Start mirroring an AI or online game and make it the active one.
    ///
    /// Local games go through `start_game`; `GameType::Local` is rejected.
    pub fn start_external(&mut self, game_type: GameType, players: Vec<Player>, threshold: u32) -> Result<()> {
        if game_type == GameType::Local {
            return Err(ValidationError::NotStarted.into());
        }
        self.external = Some(ExternalSession::new(game_type, players, threshold)?);
        self.active = game_type;
        Ok(())
    }

    /// Push totals from the external game.
    ///
    /// Returns the progression report when these totals finish the game.
    pub fn push_external_totals(&mut self, totals: FxHashMap<PlayerId, i64>) -> Result<Option<ProgressionReport>> {
        let external = self.external.as_mut().ok_or(ValidationError::NotStarted)?;
        external.push_round_totals(totals)?;
        if !external.status().is_finished() {
            return Ok(None);
        }

        let id = self.ids.next_id(Utc::now().timestamp_millis());
        let entry = external.to_history_entry(id, Utc::now());
        self.external = None;
        self.active = GameType::Local;
        Ok(Some(self.complete_game(entry)))
    }

    /// Record a game completed entirely outside the engine.
    pub fn record_external_game(&mut self, entry: GameHistoryEntry) -> ProgressionReport {
        self.complete_game(entry)
    }

    /// Choose which game the UI shows.
    pub fn set_active(&mut self, game_type: GameType) {
        self.active = game_type;
    }

    // === Progression ===

    /// Mark the current level as celebrated.
    pub fn acknowledge_level_up(&mut self) {
        self.progression.acknowledge_level_up();
    }

    // === History ===

    /// Merge an exported payload into history.
    pub fn import_history(&mut self, payload: &str) -> Result<MergeSummary> {
        let summary = self.history.import_json(payload)?;
        info!(added = summary.added, duplicates = summary.duplicates, "history imported");
        self.events.push(EngineEvent::HistoryImported { added: summary.added });
        Ok(summary)
    }

    /// Export history as a JSON payload.
    pub fn export_history(&self) -> Result<String> {
        self.history.export_json(Utc::now())
    }

    // === Storage ===

    /// Capture everything storage needs.
    #[must_use]
    pub fn to_snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            version: SNAPSHOT_VERSION,
            session: self.session.clone(),
            history: self.history.clone(),
            progression: self.progression.clone(),
            id_gen: self.ids.state(),
            recorded_entry: self.recorded_entry.clone(),
        }
    }

    /// Rebuild a controller from a stored snapshot.
    ///
    /// The current config wins: history is truncated to its cap and XP beyond
    /// its level size is converted into levels.
    #[must_use]
    pub fn from_snapshot(config: EngineConfig, snapshot: EngineSnapshot) -> Self {
        let mut history = snapshot.history;
        history.set_cap(config.history_cap);

        let mut controller = Self::with_ids(config, EntryIdGen::from_state(&snapshot.id_gen));
        controller.progression_awarded = snapshot.recorded_entry.is_some();
        controller.session = snapshot.session;
        controller.history = history;
        controller.progression = snapshot.progression;
        controller.recorded_entry = snapshot.recorded_entry;

        let gained = controller.progression.normalize(controller.config.xp_per_level);
        if gained > 0 {
            debug!(gained, "stored XP exceeded the configured level size");
        }
        controller
    }

    // === Internals ===

    fn record_entry(&mut self, entry: GameHistoryEntry) {
        if let Some(evicted) = self.history.record(entry) {
            debug!(id = %evicted.id, "oldest game evicted");
        }
    }

    /// History append, progression, events, in that order.
    fn complete_game(&mut self, entry: GameHistoryEntry) -> ProgressionReport {
        let outcome = GameOutcome::from_entry(&entry);
        let entry_id = entry.id.clone();
        self.record_entry(entry);

        let report = self.engine.evaluate(&mut self.progression, &self.history, &outcome);

        self.events.push(EngineEvent::GameFinished {
            entry_id,
            winner: outcome.winner().map(|w| w.name.clone()),
        });
        if report.levels_gained() > 0 {
            self.events.push(EngineEvent::LevelUp {
                previous: report.previous_level,
                level: report.level,
            });
        }
        for id in &report.unlocked {
            self.events.push(EngineEvent::AchievementUnlocked { id: id.clone() });
        }

        info!(
            xp = report.xp_awarded,
            level = report.level,
            unlocked = report.unlocked.len(),
            "game completed"
        );
        report
    }
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
