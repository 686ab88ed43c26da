//! Game state data: move records, snapshots and the status projection

use super::piece::{Piece, PieceColor, PieceType};
use crate::game::rules::coordinates::{to_grid, Square, BOARD_SIZE};
use serde::{Deserialize, Serialize};

/// Special-move flags reported by the rules engine for a committed move
///
/// An en passant capture sets both `capture` and `en_passant`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveFlags {
    pub capture: bool,
    pub en_passant: bool,
    pub kingside_castle: bool,
    pub queenside_castle: bool,
    pub promotion: bool,
    /// Pawn advanced two squares
    pub big_pawn: bool,
}

impl MoveFlags {
    pub fn is_castle(&self) -> bool {
        self.kingside_castle || self.queenside_castle
    }
}

/// One committed ply
///
/// Created only by a successful commit; never edited afterwards. `from`/`to`
/// are the squares as the user sees them, so castling reads `e1 -> g1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    /// Standard algebraic notation including `+`/`#` suffix
    pub san: String,
    pub flags: MoveFlags,
    pub color: PieceColor,
    pub piece: PieceType,
    pub captured: Option<PieceType>,
    pub promotion: Option<PieceType>,
}

impl MoveRecord {
    /// Coordinate notation (`e2e4`, `e7e8q`)
    pub fn coordinate_text(&self) -> String {
        match self.promotion {
            Some(piece) => format!("{}{}{}", self.from, self.to, piece.symbol()),
            None => format!("{}{}", self.from, self.to),
        }
    }
}

/// A move as requested by a human or decoded from the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    pub from: Square,
    pub to: Square,
    /// Piece chosen if the move turns out to be a promotion
    pub promotion: PieceType,
}

impl MoveRequest {
    /// Request with the default queen promotion
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: PieceType::Queen,
        }
    }

    pub fn with_promotion(mut self, promotion: PieceType) -> Self {
        self.promotion = promotion;
        self
    }
}

/// Squares of the most recent move, for highlighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastMove {
    pub from: Square,
    pub to: Square,
}

impl From<&MoveRecord> for LastMove {
    fn from(record: &MoveRecord) -> Self {
        Self {
            from: record.from,
            to: record.to,
        }
    }
}

/// Read-only status projection of a position
///
/// Always derived from a rules instance on demand; never stored alongside
/// the canonical state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatus {
    pub is_check: bool,
    pub is_checkmate: bool,
    pub is_stalemate: bool,
    pub is_draw: bool,
    pub is_game_over: bool,
    pub side_to_move: PieceColor,
}

impl GameStatus {
    /// Winner by checkmate, if any
    pub fn winner(&self) -> Option<PieceColor> {
        self.is_checkmate.then(|| self.side_to_move.opposite())
    }

    /// PGN result token
    pub fn result_token(&self) -> &'static str {
        match self.winner() {
            Some(PieceColor::White) => "1-0",
            Some(PieceColor::Black) => "0-1",
            None if self.is_draw => "1/2-1/2",
            None => "*",
        }
    }
}

/// 8x8 grid of pieces in display orientation (row 0 = rank 8, col 0 = file a)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoardMatrix(pub [[Option<Piece>; BOARD_SIZE as usize]; BOARD_SIZE as usize]);

impl BoardMatrix {
    pub fn get(&self, row: u8, col: u8) -> Option<Piece> {
        self.0
            .get(row as usize)
            .and_then(|cells| cells.get(col as usize))
            .copied()
            .flatten()
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        let (row, col) = to_grid(square);
        self.get(row, col)
    }

    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        let (row, col) = to_grid(square);
        self.0[row as usize][col as usize] = piece;
    }

    /// Number of occupied squares
    pub fn piece_count(&self) -> usize {
        self.0.iter().flatten().filter(|cell| cell.is_some()).count()
    }
}

/// Immutable snapshot of one position in the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionSnapshot {
    pub fen: String,
    pub board: BoardMatrix,
}
