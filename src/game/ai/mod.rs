//! Computer opponent
//!
//! The computer's moves come from an external search engine reached through
//! the [`SearchEngine`] trait. Queries run asynchronously so the board stays
//! responsive while the engine thinks.
//!
//! # Architecture
//!
//! - `ComputerConfig`: enabled flag, difficulty and think delay
//! - `SearchEngine`: async seam to the engine (UCI subprocess in production)
//! - `ComputerPlayer`: phase machine, query launch/cancel, reply screening
//!
//! # Integration Strategy
//!
//! The game state store is the source of truth. For each computer turn:
//! 1. Capture the canonical FEN and generation as an `EngineTicket`
//! 2. Spawn a tokio task that waits the think delay, sets the skill level and searches
//! 3. Receive the `EngineReply` on the session's event loop
//! 4. Commit the move through the same coordinator as human moves
//!
//! This ensures computer moves follow the same validation rules as human moves.

pub mod engine;
pub mod resource;
pub mod systems;

// Re-export for convenience
pub use engine::{EngineError, EngineReply, EngineTicket, SearchEngine};
pub use resource::{ComputerConfig, Difficulty, DEFAULT_THINK_DELAY, MAX_DIFFICULTY, MIN_DIFFICULTY};
pub use systems::ComputerPlayer;
