//! Game history resources
//!
//! Position snapshots for replay. Move records live on the game state store.

pub mod history;

// Re-export all public items
pub use history::*;
