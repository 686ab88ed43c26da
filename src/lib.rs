//! chess_sync - game-state synchronization for an interactive chess board
//!
//! One canonical position, a replayable history, a read-only review cursor
//! and a computer opponent whose asynchronous answers are only applied to
//! the position they were computed for.
//!
//! - **core**: settings, logging and their errors
//! - **game**: rules, canonical store, move coordination, review, computer player
//! - **ui**: terminal command parsing and board rendering

pub mod core;
pub mod game;
pub mod ui;

pub use game::{ExportFormat, GameError, GameEvent, GameResult, GameSession};
