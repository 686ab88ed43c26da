//! Error types for game module
//!
//! Provides custom error types for game logic including move validation,
//! engine replies, and turn-state management. None of these escape the
//! move coordinator as faults: the public intents turn them into `None`
//! or a reported event.

use crate::game::components::PieceColor;

/// Errors that can occur in game logic
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// The rules engine rejected the move
    #[error("Illegal move: {message}")]
    IllegalMove { message: String },

    /// Square text or grid coordinates outside the board
    #[error("Malformed square: {input:?}")]
    MalformedSquare { input: String },

    /// A starting position could not be parsed or is not playable
    #[error("Invalid position: {message}")]
    InvalidPosition { message: String },

    /// Input arrived for a side that is not allowed to move now
    #[error("It is not {color:?}'s turn to move")]
    NotYourTurn { color: PieceColor },

    /// The search engine returned nothing usable
    #[error("Engine reply could not be decoded: {reply:?}")]
    EngineDecodeFailure { reply: Option<String> },

    /// An engine reply computed for a position that is no longer current
    #[error("Stale engine reply for generation {generation}")]
    StaleEngineResponse { generation: u64 },

    /// Review index past the last reviewable position
    #[error("No position after move {index} (game has {moves} moves)")]
    ReviewOutOfRange { index: usize, moves: usize },

    /// Invalid turn-phase transition
    #[error("Invalid game state transition: {message}")]
    InvalidStateTransition { message: String },
}

impl GameError {
    /// Malformed input is reported to the user exactly like an illegal move
    pub fn is_illegal_move(&self) -> bool {
        matches!(
            self,
            GameError::IllegalMove { .. } | GameError::MalformedSquare { .. }
        )
    }
}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;
