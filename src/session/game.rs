//! The game session state machine.
//!
//! ## Lifecycle
//!
//! ```text
//! SETUP ──start()──▶ PLAYING ──add_round() crosses threshold──▶ FINISHED
//!   ▲                   ▲                                           │
//!   │                   └──────── undo_last_round() ────────────────┘
//!   └──────────────── reset_game() (from any state)
//! ```
//!
//! Status is recomputed from the rounds and threshold on every read. Undo can
//! therefore never leave a stale FINISHED flag behind.
//!
//! ## Example
//!
//! ```
//! use skyjo_ledger::core::score_map;
//! use skyjo_ledger::session::{GameSession, SessionStatus};
//!
//! let mut session = GameSession::new();
//! let alice = session.add_player("Alice", "🦊").unwrap();
//! let bob = session.add_player("Bob", "🐻").unwrap();
//! session.set_threshold(100).unwrap();
//! session.start().unwrap();
//!
//! let commit = session.add_round(score_map([(alice, -2), (bob, 5)]), bob).unwrap();
//! assert_eq!(commit.round.scores[&bob], 10);
//! assert_eq!(session.status(), SessionStatus::Playing);
//! ```

use chrono::{DateTime, Utc};
use im::Vector;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::{Player, PlayerId, Round, ScoreMap};
use crate::error::{EngineError, Result, ValidationError};
use crate::history::{GameHistoryEntry, GameType, HistoryPlayer};
use crate::ledger::RoundLedger;

use super::snapshot::{SessionSnapshot, Standing};
use super::status::SessionStatus;

/// Result of committing a round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundCommit {
    /// The committed round.
    pub round: Round,

    /// Status after the commit.
    pub status: SessionStatus,

    /// True when this round moved the session to FINISHED.
    pub finished: bool,
}

/// One local game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    players: Vec<Player>,
    threshold: Option<u32>,
    rounds: Vector<Round>,
    started: bool,
    next_player_id: u32,
}

impl GameSession {
    /// Create an empty session in SETUP.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a started session from a validated roster.
    pub fn with_players(players: Vec<Player>, threshold: u32) -> std::result::Result<Self, ValidationError> {
        if players.is_empty() {
            return Err(ValidationError::EmptyRoster);
        }
        if threshold == 0 {
            return Err(ValidationError::InvalidThreshold);
        }

        let mut ids = FxHashSet::default();
        let mut names = FxHashSet::default();
        for player in &players {
            let name = player.name.trim();
            if name.is_empty() {
                return Err(ValidationError::EmptyName);
            }
            if !ids.insert(player.id) {
                return Err(ValidationError::DuplicatePlayer(player.id));
            }
            if !names.insert(name) {
                return Err(ValidationError::DuplicateName(name.to_string()));
            }
        }

        let next_player_id = players.iter().map(|p| p.id.raw() + 1).max().unwrap_or(0);
        Ok(Self {
            players,
            threshold: Some(threshold),
            rounds: Vector::new(),
            started: true,
            next_player_id,
        })
    }

    // === Accessors ===

    /// Roster in seating order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Look up a player.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Check if a player is on the roster.
    #[must_use]
    pub fn has_player(&self, id: PlayerId) -> bool {
        self.player(id).is_some()
    }

    /// Score at which the game ends.
    #[must_use]
    pub fn threshold(&self) -> Option<u32> {
        self.threshold
    }

    /// Committed rounds.
    #[must_use]
    pub fn rounds(&self) -> &Vector<Round> {
        &self.rounds
    }

    /// Number of committed rounds.
    #[must_use]
    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> SessionStatus {
        let max_total = self.players.iter().map(|p| self.total(p.id)).max();
        SessionStatus::derive(
            self.started,
            self.rounds.len(),
            max_total,
            self.threshold.unwrap_or(u32::MAX),
        )
    }

    /// Running total for one player.
    #[must_use]
    pub fn total(&self, player: PlayerId) -> i64 {
        RoundLedger::total_for(&self.rounds, player)
    }

    /// Running totals for the roster.
    #[must_use]
    pub fn totals(&self) -> FxHashMap<PlayerId, i64> {
        RoundLedger::compute_totals(&self.rounds, self.players.iter().map(|p| p.id))
    }

    /// Players with totals, lowest first. Ties keep roster order.
    #[must_use]
    pub fn standings(&self) -> Vec<Standing> {
        let totals = self.totals();
        let mut standings: Vec<_> = self
            .players
            .iter()
            .map(|p| Standing {
                player: p.clone(),
                total: totals.get(&p.id).copied().unwrap_or(0),
            })
            .collect();
        standings.sort_by_key(|s| s.total);
        standings
    }

    /// Immutable view for presentation.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            status: self.status(),
            threshold: self.threshold,
            standings: self.standings(),
            rounds: self.rounds.clone(),
        }
    }

    // === Setup ===

    fn require_setup(&self) -> std::result::Result<(), ValidationError> {
        if self.started {
            Err(ValidationError::RosterLocked)
        } else {
            Ok(())
        }
    }

    /// Names key historical stats, so they must be unique on the roster.
    fn require_unique_name(&self, name: &str, except: Option<PlayerId>) -> std::result::Result<(), ValidationError> {
        let taken = self
            .players
            .iter()
            .any(|p| Some(p.id) != except && p.name.trim() == name);
        if taken {
            Err(ValidationError::DuplicateName(name.to_string()))
        } else {
            Ok(())
        }
    }

    /// Add a player to the roster.
    pub fn add_player(
        &mut self,
        name: impl Into<String>,
        emoji: impl Into<String>,
    ) -> std::result::Result<PlayerId, ValidationError> {
        self.require_setup()?;
        let name: String = name.into();
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        self.require_unique_name(&name, None)?;

        let id = PlayerId::new(self.next_player_id);
        self.next_player_id += 1;
        self.players.push(Player::new(id, name).with_emoji(emoji));
        debug!(%id, "player added");
        Ok(id)
    }

    /// Remove a player from the roster.
    pub fn remove_player(&mut self, id: PlayerId) -> std::result::Result<Player, ValidationError> {
        self.require_setup()?;
        let pos = self
            .players
            .iter()
            .position(|p| p.id == id)
            .ok_or(ValidationError::UnknownPlayer(id))?;
        Ok(self.players.remove(pos))
    }

    /// Rename a player.
    pub fn rename_player(
        &mut self,
        id: PlayerId,
        name: impl Into<String>,
    ) -> std::result::Result<(), ValidationError> {
        self.require_setup()?;
        let name: String = name.into();
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if !self.has_player(id) {
            return Err(ValidationError::UnknownPlayer(id));
        }
        self.require_unique_name(&name, Some(id))?;
        let player = self
            .players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(ValidationError::UnknownPlayer(id))?;
        player.name = name;
        Ok(())
    }

    /// Set the score at which the game ends.
    pub fn set_threshold(&mut self, threshold: u32) -> std::result::Result<(), ValidationError> {
        self.require_setup()?;
        if threshold == 0 {
            return Err(ValidationError::InvalidThreshold);
        }
        self.threshold = Some(threshold);
        Ok(())
    }

    /// Lock the roster and begin play.
    pub fn start(&mut self) -> std::result::Result<(), ValidationError> {
        self.require_setup()?;
        if self.players.is_empty() {
            return Err(ValidationError::EmptyRoster);
        }
        if self.threshold.is_none() {
            return Err(ValidationError::InvalidThreshold);
        }
        self.started = true;
        info!(players = self.players.len(), threshold = ?self.threshold, "game started");
        Ok(())
    }

    // === Play ===

    fn validate_round(&self, scores: &ScoreMap, finisher: PlayerId) -> std::result::Result<(), ValidationError> {
        if self.players.is_empty() {
            return Err(ValidationError::EmptyRoster);
        }
        match self.status() {
            SessionStatus::Setup => return Err(ValidationError::NotStarted),
            SessionStatus::Finished => return Err(ValidationError::GameFinished),
            SessionStatus::Playing => {}
        }
        if let Some(missing) = self.players.iter().find(|p| !scores.contains_key(&p.id)) {
            return Err(ValidationError::MissingScore(missing.id));
        }
        if let Some(unknown) = scores.keys().find(|id| !self.has_player(**id)) {
            return Err(ValidationError::UnknownPlayer(*unknown));
        }
        if !self.has_player(finisher) {
            return Err(ValidationError::UnknownFinisher(finisher));
        }
        if let Some((id, _)) = scores.iter().find(|(_, s)| !RoundLedger::score_in_range(**s)) {
            return Err(ValidationError::ScoreOutOfRange(*id));
        }
        Ok(())
    }

    /// Score and commit a round.
    ///
    /// `scores` must hold exactly one entry per roster player. On error the
    /// session is unchanged.
    pub fn add_round(
        &mut self,
        scores: ScoreMap,
        finisher: PlayerId,
    ) -> std::result::Result<RoundCommit, ValidationError> {
        self.validate_round(&scores, finisher)?;

        let round = Round {
            index: self.rounds.len(),
            scores: RoundLedger::apply_finisher_rule(&scores, finisher),
            raw_scores: scores,
            finisher_id: finisher,
        };
        self.rounds.push_back(round.clone());

        let status = self.status();
        let finished = status.is_finished();
        debug!(
            index = round.index,
            %finisher,
            doubled = round.finisher_doubled(),
            %status,
            "round committed"
        );
        if finished {
            info!(rounds = self.rounds.len(), "game finished");
        }

        Ok(RoundCommit { round, status, finished })
    }

    /// Remove the most recent round.
    pub fn undo_last_round(&mut self) -> Result<Round> {
        let round = self.rounds.pop_back().ok_or(EngineError::EmptyLedger)?;
        debug!(index = round.index, status = %self.status(), "round undone");
        Ok(round)
    }

    /// Clear roster, rounds and threshold, back to SETUP.
    pub fn reset_game(&mut self) {
        *self = Self::default();
        debug!("game reset");
    }

    // === Completion ===

    /// Build the history record for this game.
    #[must_use]
    pub fn to_history_entry(&self, id: impl Into<String>, date: DateTime<Utc>) -> GameHistoryEntry {
        let totals = self.totals();
        let mut entry = GameHistoryEntry::new(id, date, GameType::Local).with_rounds(self.rounds.clone());
        if let Some(threshold) = self.threshold {
            entry = entry.with_threshold(threshold);
        }
        for player in &self.players {
            entry = entry.with_player(
                HistoryPlayer::new(player.name.clone(), totals.get(&player.id).copied().unwrap_or(0))
                    .with_id(player.id)
                    .with_emoji(player.emoji.clone()),
            );
        }
        entry
    }
}
