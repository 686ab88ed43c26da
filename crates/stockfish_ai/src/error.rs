//! Error types for the engine wrapper

use thiserror::Error;

/// Errors raised while driving an engine process
#[derive(Error, Debug)]
pub enum UciError {
    /// The engine binary could not be started
    #[error("failed to spawn engine: {0}")]
    Spawn(#[source] std::io::Error),

    /// Talking to a running engine failed
    #[error("engine I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The blocking task running the request panicked or was cancelled
    #[error("engine task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Result type alias for engine operations
pub type UciResult<T> = Result<T, UciError>;
