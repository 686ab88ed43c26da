//! Chess game logic module - canonical state and turn coordination
//!
//! Keeps one live match consistent across three views: the canonical
//! present position, the move list, and a replay cursor over past
//! positions, while a computer opponent answers asynchronously.
//!
//! # Module Organization
//!
//! - `components` - plain data (pieces, move records, snapshots, status)
//! - `rules` - square codec and the shakmaty-backed rules adapter
//! - `resources` - store, position history, review cursor, selection, turn phase
//! - `systems` - move coordinator (commit / undo)
//! - `ai` - computer opponent and the search engine seam
//! - `events` - notifications queued for the front end
//! - `session` - `GameSession`, the facade the front end talks to
//!
//! # Flow
//!
//! UI intent -> move coordinator (human) or computer player (engine) ->
//! rules validation -> store mutation -> history append -> review back to
//! live -> events for the front end.

pub mod ai;
pub mod components;
pub mod error;
pub mod events;
pub mod resources;
pub mod rules;
pub mod session;
pub mod systems;

// Re-export the main entry points
pub use error::{GameError, GameResult};
pub use events::GameEvent;
pub use session::{ExportFormat, GameSession};
