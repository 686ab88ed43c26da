//! Position codec - algebraic squares and board grid coordinates
//!
//! Converts between algebraic squares (`"e4"`) and zero-based `(row, col)`
//! grid coordinates as a human-oriented board is drawn:
//!
//! ```text
//!        col 0 ... col 7
//! row 0   a8  ...   h8
//!  ...
//! row 7   a1  ...   h1
//! ```
//!
//! `file = col`, `rank = 8 - row`, and the inverse `row = 8 - rank`,
//! `col = file`. Anything outside the 8x8 grid is rejected rather than
//! clamped or wrapped.

use crate::game::components::PieceType;
use crate::game::error::{GameError, GameResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Board side length
pub const BOARD_SIZE: u8 = 8;

/// Algebraic square, file `a..h` and rank `1..8`
///
/// Stored as zero-based file/rank indices; the only way to build one is
/// through the checked constructors, so every `Square` is on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Build from zero-based file (a = 0) and rank (1 = 0) indices
    pub fn from_indices(file: u8, rank: u8) -> GameResult<Self> {
        if file >= BOARD_SIZE || rank >= BOARD_SIZE {
            return Err(GameError::MalformedSquare {
                input: format!("file {file}, rank {rank}"),
            });
        }
        Ok(Self { file, rank })
    }

    /// Build from indices the caller already knows are on the board
    pub(crate) fn on_board(file: u8, rank: u8) -> Self {
        debug_assert!(file < BOARD_SIZE && rank < BOARD_SIZE);
        Self { file, rank }
    }

    /// Zero-based file index (a = 0)
    pub fn file_index(self) -> u8 {
        self.file
    }

    /// Zero-based rank index (rank 1 = 0)
    pub fn rank_index(self) -> u8 {
        self.rank
    }

    /// File letter `a..h`
    pub fn file_char(self) -> char {
        (b'a' + self.file) as char
    }

    /// Rank number `1..8`
    pub fn rank_number(self) -> u8 {
        self.rank + 1
    }

    /// All 64 squares in grid order (a8, b8, ..., h1)
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE).flat_map(|row| {
            (0..BOARD_SIZE).map(move |col| Square {
                file: col,
                rank: BOARD_SIZE - 1 - row,
            })
        })
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_number())
    }
}

/// Parses lowercase algebraic text such as `e4`
impl FromStr for Square {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || GameError::MalformedSquare {
            input: s.to_string(),
        };
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(malformed());
        }
        let file = bytes[0];
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(malformed());
        }
        Ok(Square {
            file: file - b'a',
            rank: rank - b'1',
        })
    }
}

impl TryFrom<String> for Square {
    type Error = GameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Square> for String {
    fn from(square: Square) -> Self {
        square.to_string()
    }
}

/// Convert grid coordinates to a square (row 0 = rank 8, col 0 = file a)
pub fn to_square(row: u8, col: u8) -> GameResult<Square> {
    if row >= BOARD_SIZE || col >= BOARD_SIZE {
        return Err(GameError::MalformedSquare {
            input: format!("row {row}, col {col}"),
        });
    }
    Square::from_indices(col, BOARD_SIZE - 1 - row)
}

/// Convert a square to grid coordinates, the inverse of [`to_square`]
pub fn to_grid(square: Square) -> (u8, u8) {
    let row = BOARD_SIZE - square.rank_number();
    let col = square.file_index();
    (row, col)
}

/// Parse algebraic text straight to grid coordinates
pub fn text_to_grid(text: &str) -> GameResult<(u8, u8)> {
    text.parse::<Square>().map(to_grid)
}

/// Decoded coordinate move as produced by a UCI engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinateMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceType>,
}

/// Decode `e7e5` / `a2a1q` style move text
///
/// Requires at least two two-character squares. A fifth character, when
/// present, must name a promotion piece (`q`, `r`, `b`, `n`).
pub fn decode_coordinate_move(text: &str) -> GameResult<CoordinateMove> {
    let text = text.trim();
    let decode_failure = || GameError::EngineDecodeFailure {
        reply: Some(text.to_string()),
    };

    if text.len() < 4 || !text.is_ascii() {
        return Err(decode_failure());
    }
    let from = text[0..2].parse::<Square>().map_err(|_| decode_failure())?;
    let to = text[2..4].parse::<Square>().map_err(|_| decode_failure())?;
    let promotion = match text[4..].chars().next() {
        None => None,
        Some(c) => Some(PieceType::from_promotion_char(c).ok_or_else(decode_failure)?),
    };

    Ok(CoordinateMove {
        from,
        to,
        promotion,
    })
}
