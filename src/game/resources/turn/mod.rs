//! Turn management resources
//!
//! Phase machine that coordinates the human and the computer opponent.

pub mod state;

// Re-export all public items
pub use state::*;
