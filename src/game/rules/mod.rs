//! Chess rules module - position codec and the rules engine adapter
//!
//! Legality, SAN, FEN and draw detection come from `shakmaty`; this module
//! only adapts it to the game layer's own square and piece types so nothing
//! above it ever touches a shakmaty type.
//!
//! # Module Structure
//!
//! - `coordinates` - algebraic squares <-> board grid `(row, col)`, engine move text
//! - `chess_rules` - `ChessRules`, the live match object
//! - `pgn` - PGN document writer

pub mod chess_rules;
pub mod coordinates;
pub mod pgn;

#[cfg(test)]
mod tests;

// Re-export commonly used items
pub use chess_rules::ChessRules;
pub use coordinates::{decode_coordinate_move, to_grid, to_square, CoordinateMove, Square};
pub use pgn::PgnTags;
