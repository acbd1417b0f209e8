//! Error types.
//!
//! No error here is fatal: every failure means "the operation did not apply,
//! prior state is preserved".

use thiserror::Error;

use crate::core::PlayerId;

/// Rejected command input. The session is left unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("the roster is empty")]
    EmptyRoster,
    #[error("no score entered for {0}")]
    MissingScore(PlayerId),
    #[error("score entered for {0}, who is not on the roster")]
    UnknownPlayer(PlayerId),
    #[error("finisher {0} is not on the roster")]
    UnknownFinisher(PlayerId),
    #[error("player name must not be empty")]
    EmptyName,
    #[error("{0} is already on the roster")]
    DuplicatePlayer(PlayerId),
    #[error("a player named {0:?} is already on the roster")]
    DuplicateName(String),
    #[error("score for {0} is outside the accepted range")]
    ScoreOutOfRange(PlayerId),
    #[error("threshold must be a positive integer")]
    InvalidThreshold,
    #[error("the roster can only change before the game starts")]
    RosterLocked,
    #[error("the game has not started")]
    NotStarted,
    #[error("the game is already finished")]
    GameFinished,
}

/// Engine error.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Undo with no committed rounds.
    #[error("no rounds to undo")]
    EmptyLedger,

    /// Malformed import payload. History is untouched.
    #[error("invalid history format: {0}")]
    InvalidFormat(String),

    /// Binary snapshot could not be encoded or decoded.
    #[error("snapshot encoding failed: {0}")]
    Snapshot(#[from] bincode::Error),
}

impl EngineError {
    /// Check if this is a validation failure.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        let err = ValidationError::MissingScore(PlayerId::new(2));
        assert_eq!(err.to_string(), "no score entered for Player(2)");

        let err = ValidationError::DuplicateName("Sam".to_string());
        assert_eq!(err.to_string(), "a player named \"Sam\" is already on the roster");
    }

    #[test]
    fn test_validation_converts() {
        let err: EngineError = ValidationError::EmptyRoster.into();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "the roster is empty");
        assert!(!EngineError::EmptyLedger.is_validation());
    }
}
