//! The controller: single owner of session, history and progression.
//!
//! Presentation code issues commands to `SessionController` and reads back
//! snapshots and events. It never touches the underlying state directly.

pub mod event;
pub mod snapshot;
pub mod session_controller;

pub use event::EngineEvent;
pub use snapshot::{EngineSnapshot, SNAPSHOT_VERSION};
pub use session_controller::SessionController;
