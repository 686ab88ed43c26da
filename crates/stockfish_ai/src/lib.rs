//! Async front for a Stockfish engine process
//!
//! The `stockfish` crate owns the child process and the UCI exchange. Its
//! calls block, so every request runs on tokio's blocking pool and the
//! handle stays usable from async code.
//!
//! # Example
//!
//! ```rust,ignore
//! let engine = UciEngine::spawn("stockfish", UciOptions::default()).await?;
//! engine.set_skill_level(10).await?;
//! let reply = engine.best_move("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1").await?;
//! ```

mod engine;
mod error;

pub use engine::{clamp_skill_level, UciEngine, UciOptions, MAX_SKILL_LEVEL};
pub use error::{UciError, UciResult};
