//! Chess game resources - match state shared by the game systems
//!
//! Each resource has a single owner, the [`crate::game::session::GameSession`],
//! which hands out `&`/`&mut` access to the systems that need it.
//!
//! # Resource Categories
//!
//! ## Canonical State
//! - [`GameStateStore`] - Live rules instance, move records, position history
//! - [`PositionHistory`] - Append-only board snapshots for replay
//!
//! ## Player Interaction
//! - [`Selection`] - Selected square and its legal targets
//! - [`ReviewController`] - Cursor over past positions
//!
//! ## Turn Management
//! - [`TurnStateContext`] - Human / computer turn phase machine
//!
//! ## Feedback
//! - [`MoveSound`] - Sound cue classified from a committed move
//!
//! # Integration
//!
//! ```rust,ignore
//! let mut store = GameStateStore::initialize(None)?;
//! let record = store.apply_move(MoveRequest::new(e2, e4))?;
//! let sound = MoveSound::classify(&record.flags);
//! ```

pub mod history;
pub mod review;
pub mod selection;
pub mod sounds;
pub mod store;
pub mod turn;

// Re-export all resources for convenience
pub use history::*;
pub use review::*;
pub use selection::*;
pub use sounds::*;
pub use store::*;
pub use turn::*;
