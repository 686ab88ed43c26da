//! Piece kinds and colors

use serde::{Deserialize, Serialize};

/// Side of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceColor {
    White,
    Black,
}

impl PieceColor {
    /// The other side
    pub fn opposite(self) -> Self {
        match self {
            PieceColor::White => PieceColor::Black,
            PieceColor::Black => PieceColor::White,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PieceColor::White => "White",
            PieceColor::Black => "Black",
        }
    }
}

/// Kind of chess piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    /// Lower-case letter used in FEN and UCI (`p`, `n`, `b`, `r`, `q`, `k`)
    pub fn symbol(self) -> char {
        match self {
            PieceType::Pawn => 'p',
            PieceType::Knight => 'n',
            PieceType::Bishop => 'b',
            PieceType::Rook => 'r',
            PieceType::Queen => 'q',
            PieceType::King => 'k',
        }
    }

    /// Parse a promotion suffix; only knight, bishop, rook and queen qualify
    pub fn from_promotion_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'n' => Some(PieceType::Knight),
            'b' => Some(PieceType::Bishop),
            'r' => Some(PieceType::Rook),
            'q' => Some(PieceType::Queen),
            _ => None,
        }
    }

    /// Whether a pawn may promote to this piece
    pub fn is_promotion_choice(self) -> bool {
        matches!(
            self,
            PieceType::Knight | PieceType::Bishop | PieceType::Rook | PieceType::Queen
        )
    }
}

/// A colored piece on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: PieceColor,
}

impl Piece {
    pub fn new(piece_type: PieceType, color: PieceColor) -> Self {
        Self { piece_type, color }
    }

    /// FEN letter: upper-case for white, lower-case for black
    pub fn fen_char(self) -> char {
        let symbol = self.piece_type.symbol();
        match self.color {
            PieceColor::White => symbol.to_ascii_uppercase(),
            PieceColor::Black => symbol,
        }
    }
}
