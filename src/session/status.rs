//! Session status.

use serde::{Deserialize, Serialize};

/// Where a session is in its lifecycle.
///
/// Status is always derived from the session contents, never stored:
/// - `Setup`: not started, roster editable
/// - `Playing`: started, no total at or above the threshold
/// - `Finished`: at least one round and some total at or above the threshold
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SessionStatus {
    #[default]
    Setup,
    Playing,
    Finished,
}

impl SessionStatus {
    /// Derive status from the session contents.
    #[must_use]
    pub fn derive(started: bool, round_count: usize, max_total: Option<i64>, threshold: u32) -> Self {
        if !started {
            return Self::Setup;
        }
        match max_total {
            Some(max) if round_count > 0 && max >= i64::from(threshold) => Self::Finished,
            _ => Self::Playing,
        }
    }

    /// Check if rounds can be added.
    #[must_use]
    pub fn accepts_rounds(self) -> bool {
        self == Self::Playing
    }

    /// Check if the game is over.
    #[must_use]
    pub fn is_finished(self) -> bool {
        self == Self::Finished
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Setup => "SETUP",
            Self::Playing => "PLAYING",
            Self::Finished => "FINISHED",
        };
        f.write_str(name)
    }
}
