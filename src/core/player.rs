//! Player identification and roster entries.
//!
//! ## PlayerId
//!
//! Stable player identifier, unique within one session. Ids are allocated by
//! the session (or supplied by the caller with a validated roster) and are
//! never reused while the session lives.
//!
//! ## Player
//!
//! Name and emoji shown next to a score. Names are the aggregation key for
//! historical statistics, ids are not (ids are per-session).

use serde::{Deserialize, Serialize};

/// Player identifier, stable for the lifetime of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player({})", self.0)
    }
}

/// Emoji used when a player does not pick one.
pub const DEFAULT_EMOJI: &str = "🙂";

/// A player on the roster.
///
/// ```
/// use skyjo_ledger::core::{Player, PlayerId};
///
/// let alice = Player::new(PlayerId::new(1), "Alice").with_emoji("🦊");
/// assert_eq!(alice.name, "Alice");
/// assert_eq!(alice.emoji, "🦊");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    /// Stable id within the session.
    pub id: PlayerId,

    /// Display name, also the key for historical stats.
    pub name: String,

    /// Avatar emoji.
    pub emoji: String,
}

impl Player {
    /// Create a player with the default emoji.
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            emoji: DEFAULT_EMOJI.to_string(),
        }
    }

    /// Set the emoji (builder pattern).
    #[must_use]
    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = emoji.into();
        self
    }
}
