//! Game sessions.
//!
//! - `GameSession`: the local state machine (SETUP → PLAYING → FINISHED)
//! - `ExternalSession`: mirror of a game scored elsewhere (AI, online)
//! - `ActiveGameSession`: the capability both share
//! - `SessionSnapshot`: immutable view for presentation

pub mod status;
pub mod snapshot;
pub mod game;
pub mod active;

pub use status::SessionStatus;
pub use snapshot::{SessionSnapshot, Standing};
pub use game::{GameSession, RoundCommit};
pub use active::{ActiveGameSession, ExternalSession};
