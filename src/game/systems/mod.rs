//! Chess game systems - behaviour that spans several resources
//!
//! # System Organization
//!
//! - [`movement`] - Move coordinator: commit and undo through the game state store
//!
//! # Execution Order
//!
//! Every intent that changes the canonical position runs the same chain:
//!
//! ```text
//! ┌─────────────────┐
//! │ Coordinator     │  rules engine validates and applies
//! │                 │  → store + history updated together
//! └────────┬────────┘
//!          ↓
//! ┌─────────────────┐
//! │ Feedback        │  last-move marker, selection cleared
//! │                 │  → sound cue queued
//! └────────┬────────┘
//!          ↓
//! ┌─────────────────┐
//! │ Computer player │  re-evaluates the turn phase
//! │                 │  → may launch an engine query
//! └─────────────────┘
//! ```

pub mod movement;

pub use movement::{execute_move, undo_moves, MoveContext};
