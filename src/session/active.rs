//! One view over every kind of running game.
//!
//! Presentation code shows "the current game" without caring whether it is
//! scored locally or driven by an external AI/online component. Both kinds
//! implement `ActiveGameSession`; the controller picks one by `GameType`.

use chrono::{DateTime, Utc};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::core::{Player, PlayerId};
use crate::error::ValidationError;
use crate::history::{GameHistoryEntry, GameType, HistoryPlayer};

use super::game::GameSession;
use super::snapshot::Standing;
use super::status::SessionStatus;

/// Read-only capabilities shared by all running games.
pub trait ActiveGameSession {
    /// How this game is being played.
    fn game_type(&self) -> GameType;

    /// Roster in seating order.
    fn players(&self) -> &[Player];

    /// Running totals by player.
    fn totals(&self) -> FxHashMap<PlayerId, i64>;

    /// Current status.
    fn status(&self) -> SessionStatus;

    /// Score at which the game ends.
    fn threshold(&self) -> Option<u32>;

    /// Players with totals, lowest first. Ties keep roster order.
    fn standings(&self) -> Vec<Standing> {
        let totals = self.totals();
        let mut standings: Vec<_> = self
            .players()
            .iter()
            .map(|p| Standing {
                player: p.clone(),
                total: totals.get(&p.id).copied().unwrap_or(0),
            })
            .collect();
        standings.sort_by_key(|s| s.total);
        standings
    }

    /// The leading player (lowest total).
    fn leader(&self) -> Option<Standing> {
        self.standings().into_iter().next()
    }
}

impl ActiveGameSession for GameSession {
    fn game_type(&self) -> GameType {
        GameType::Local
    }

    fn players(&self) -> &[Player] {
        GameSession::players(self)
    }

    fn totals(&self) -> FxHashMap<PlayerId, i64> {
        GameSession::totals(self)
    }

    fn status(&self) -> SessionStatus {
        GameSession::status(self)
    }

    fn threshold(&self) -> Option<u32> {
        GameSession::threshold(self)
    }

    fn standings(&self) -> Vec<Standing> {
        GameSession::standings(self)
    }
}

/// A game scored by an external component (AI opponents, online play).
///
/// The external component pushes totals after each of its rounds; this type
/// only mirrors them so the rest of the engine can treat it like a local
/// session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalSession {
    game_type: GameType,
    players: Vec<Player>,
    totals: FxHashMap<PlayerId, i64>,
    threshold: u32,
    rounds_played: u32,
}

impl ExternalSession {
    /// Mirror a new external game.
    pub fn new(game_type: GameType, players: Vec<Player>, threshold: u32) -> Result<Self, ValidationError> {
        if players.is_empty() {
            return Err(ValidationError::EmptyRoster);
        }
        if threshold == 0 {
            return Err(ValidationError::InvalidThreshold);
        }
        let mut names = FxHashSet::default();
        for player in &players {
            let name = player.name.trim();
            if name.is_empty() {
                return Err(ValidationError::EmptyName);
            }
            if !names.insert(name) {
                return Err(ValidationError::DuplicateName(name.to_string()));
            }
        }
        let totals = players.iter().map(|p| (p.id, 0)).collect();
        Ok(Self {
            game_type,
            players,
            totals,
            threshold,
            rounds_played: 0,
        })
    }

    /// Rounds reported so far.
    #[must_use]
    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    /// Record the totals after another external round.
    ///
    /// Every roster player must have a total; on error nothing changes.
    pub fn push_round_totals(&mut self, totals: FxHashMap<PlayerId, i64>) -> Result<(), ValidationError> {
        if self.status().is_finished() {
            return Err(ValidationError::GameFinished);
        }
        if let Some(missing) = self.players.iter().find(|p| !totals.contains_key(&p.id)) {
            return Err(ValidationError::MissingScore(missing.id));
        }
        if let Some(unknown) = totals.keys().find(|id| !self.players.iter().any(|p| p.id == **id)) {
            return Err(ValidationError::UnknownPlayer(*unknown));
        }
        self.totals = totals;
        self.rounds_played += 1;
        Ok(())
    }

    /// Build the history record for this game (round count only).
    #[must_use]
    pub fn to_history_entry(&self, id: impl Into<String>, date: DateTime<Utc>) -> GameHistoryEntry {
        let mut entry = GameHistoryEntry::new(id, date, self.game_type)
            .with_rounds_played(self.rounds_played)
            .with_threshold(self.threshold);
        for player in &self.players {
            entry = entry.with_player(
                HistoryPlayer::new(player.name.clone(), self.totals.get(&player.id).copied().unwrap_or(0))
                    .with_id(player.id)
                    .with_emoji(player.emoji.clone()),
            );
        }
        entry
    }
}

impl ActiveGameSession for ExternalSession {
    fn game_type(&self) -> GameType {
        self.game_type
    }

    fn players(&self) -> &[Player] {
        &self.players
    }

    fn totals(&self) -> FxHashMap<PlayerId, i64> {
        self.totals.clone()
    }

    fn status(&self) -> SessionStatus {
        let max_total = self.totals.values().copied().max();
        SessionStatus::derive(true, self.rounds_played as usize, max_total, self.threshold)
    }

    fn threshold(&self) -> Option<u32> {
        Some(self.threshold)
    }
}
