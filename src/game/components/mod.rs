//! Chess game components module
//!
//! Components are plain data: pieces, move records, snapshots and the
//! derived status projection. Behaviour lives in `resources` and `systems`.

pub mod game_state;
pub mod piece;


// Re-export all components for convenience
pub use game_state::*;
pub use piece::*;
