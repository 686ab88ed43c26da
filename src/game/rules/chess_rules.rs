//! Rules engine adapter over `shakmaty`
//!
//! `ChessRules` is the live match object: it validates and applies one ply
//! at a time, undoes the most recent ply, and answers every query the rest
//! of the game layer needs (pieces, legal targets, status flags, FEN, SAN,
//! board matrix). It never decides *when* a move may be played; turn
//! coordination lives in the resources and systems layers.
//!
//! # Square conventions
//!
//! Castling is addressed by the king's destination square (`e1g1`,
//! `e8c8`), the way a human drags the king. Internally shakmaty encodes
//! castling as king-takes-rook; the translation happens here only.
//!
//! # Draw detection
//!
//! `status().is_draw` covers the fifty-move rule, stalemate, insufficient
//! material and threefold repetition. Repetition is counted over position
//! keys (placement, side to move, castling rights, legal en passant square).

use crate::game::components::{
    BoardMatrix, GameStatus, MoveFlags, MoveRecord, MoveRequest, Piece, PieceColor, PieceType,
    PositionSnapshot,
};
use crate::game::error::{GameError, GameResult};
use crate::game::rules::coordinates::Square;
use crate::game::rules::pgn::{write_pgn, PgnTags};
use shakmaty::fen::Fen;
use shakmaty::san::San;
use shakmaty::{
    CastlingMode, Chess, Color, EnPassantMode, File, Move, Position, Rank, Role,
};

/// Halfmove clock value at which the fifty-move rule applies
const FIFTY_MOVE_HALFMOVES: u32 = 100;

/// A legal move together with the squares a user would name for it
#[derive(Debug, Clone)]
struct AddressedMove {
    from: Square,
    to: Square,
    inner: Move,
}

/// Live match object backed by a shakmaty position
#[derive(Debug, Clone)]
pub struct ChessRules {
    position: Chess,
    /// FEN of a custom starting position, `None` for the standard start
    start_fen: Option<String>,
    /// Positions before each committed ply, for undo
    previous: Vec<Chess>,
    sans: Vec<String>,
    /// Repetition key of every position reached, starting position included
    repetition_keys: Vec<String>,
}

impl Default for ChessRules {
    fn default() -> Self {
        Self::from_position(Chess::default(), None)
    }
}

impl ChessRules {
    /// Standard starting position
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a FEN string
    pub fn from_fen(fen: &str) -> GameResult<Self> {
        let position = parse_fen(fen)?;
        Ok(Self::from_position(position, Some(fen.trim().to_string())))
    }

    /// Standard start when `start` is `None`, otherwise the given FEN
    pub fn with_start(start: Option<&str>) -> GameResult<Self> {
        match start {
            Some(fen) => Self::from_fen(fen),
            None => Ok(Self::new()),
        }
    }

    fn from_position(position: Chess, start_fen: Option<String>) -> Self {
        let key = repetition_key(&position);
        Self {
            position,
            start_fen,
            previous: Vec::new(),
            sans: Vec::new(),
            repetition_keys: vec![key],
        }
    }

    /// Validate and apply one move, returning its record
    ///
    /// On rejection nothing changes.
    pub fn play(&mut self, request: MoveRequest) -> GameResult<MoveRecord> {
        let chosen = self
            .addressed_moves()
            .into_iter()
            .find(|candidate| {
                candidate.from == request.from
                    && candidate.to == request.to
                    && matches_promotion(&candidate.inner, request.promotion)
            })
            .ok_or_else(|| GameError::IllegalMove {
                message: format!(
                    "{}{} is not legal for {} in {}",
                    request.from,
                    request.to,
                    self.turn().name(),
                    self.fen()
                ),
            })?;

        let color = self.turn();
        let mut san = San::from_move(&self.position, chosen.inner.clone()).to_string();
        let next = self
            .position
            .clone()
            .play(chosen.inner.clone())
            .map_err(|_| GameError::IllegalMove {
                message: format!("rules engine refused {}{}", request.from, request.to),
            })?;

        if next.is_checkmate() {
            san.push('#');
        } else if next.is_check() {
            san.push('+');
        }

        let record = MoveRecord {
            from: chosen.from,
            to: chosen.to,
            san: san.clone(),
            flags: flags_for(&chosen.inner),
            color,
            piece: piece_type(chosen.inner.role()),
            captured: chosen.inner.capture().map(piece_type),
            promotion: chosen.inner.promotion().map(piece_type),
        };

        let previous = std::mem::replace(&mut self.position, next);
        self.previous.push(previous);
        self.sans.push(san);
        self.repetition_keys.push(repetition_key(&self.position));
        Ok(record)
    }

    /// Take back the most recent ply; `false` if there is none
    pub fn undo(&mut self) -> bool {
        match self.previous.pop() {
            Some(position) => {
                self.position = position;
                self.sans.pop();
                self.repetition_keys.pop();
                true
            }
            None => false,
        }
    }

    /// Number of plies played from the starting position
    pub fn ply_count(&self) -> usize {
        self.sans.len()
    }

    pub fn turn(&self) -> PieceColor {
        piece_color(self.position.turn())
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.position
            .board()
            .piece_at(to_shakmaty(square))
            .map(|piece| Piece::new(piece_type(piece.role), piece_color(piece.color)))
    }

    /// Destination squares of every legal move starting on `square`
    ///
    /// Promotions collapse into one target per square.
    pub fn legal_targets(&self, square: Square) -> Vec<Square> {
        let mut targets: Vec<Square> = self
            .addressed_moves()
            .into_iter()
            .filter(|candidate| candidate.from == square)
            .map(|candidate| candidate.to)
            .collect();
        targets.sort();
        targets.dedup();
        targets
    }

    /// Status flags of the current position
    pub fn status(&self) -> GameStatus {
        let is_checkmate = self.position.is_checkmate();
        let is_stalemate = self.position.is_stalemate();
        let is_draw = is_stalemate
            || self.position.is_insufficient_material()
            || self.position.halfmoves() >= FIFTY_MOVE_HALFMOVES
            || self.is_threefold_repetition();

        GameStatus {
            is_check: self.position.is_check(),
            is_checkmate,
            is_stalemate,
            is_draw,
            is_game_over: is_checkmate || is_draw,
            side_to_move: self.turn(),
        }
    }

    /// Current position occurred at least three times
    pub fn is_threefold_repetition(&self) -> bool {
        let Some(current) = self.repetition_keys.last() else {
            return false;
        };
        self.repetition_keys.iter().filter(|key| *key == current).count() >= 3
    }

    pub fn fen(&self) -> String {
        position_fen(&self.position)
    }

    /// 8x8 matrix in display orientation
    pub fn board(&self) -> BoardMatrix {
        let mut matrix = BoardMatrix::default();
        for square in Square::all() {
            matrix.set(square, self.piece_at(square));
        }
        matrix
    }

    pub fn snapshot(&self) -> PositionSnapshot {
        PositionSnapshot {
            fen: self.fen(),
            board: self.board(),
        }
    }

    /// SAN of every ply played so far
    pub fn san_history(&self) -> &[String] {
        &self.sans
    }

    /// FEN of a custom starting position
    pub fn start_fen(&self) -> Option<&str> {
        self.start_fen.as_deref()
    }

    /// Full PGN text of the game so far
    pub fn pgn(&self, tags: &PgnTags) -> String {
        let first_mover = self
            .previous
            .first()
            .unwrap_or(&self.position)
            .turn();
        let first_move_number = self
            .previous
            .first()
            .unwrap_or(&self.position)
            .fullmoves()
            .get();
        write_pgn(
            tags,
            self.start_fen.as_deref(),
            first_move_number,
            piece_color(first_mover),
            &self.sans,
            self.status().result_token(),
        )
    }

    /// Legal moves addressed by user-facing squares
    fn addressed_moves(&self) -> Vec<AddressedMove> {
        let mut out = Vec::new();
        for m in &self.position.legal_moves() {
            let (from, to) = match m {
                Move::Normal { from, to, .. } | Move::EnPassant { from, to } => (*from, *to),
                Move::Castle { king, rook } => {
                    let file = if rook.file() > king.file() {
                        File::G
                    } else {
                        File::C
                    };
                    (*king, shakmaty::Square::from_coords(file, king.rank()))
                }
                Move::Put { .. } => continue,
            };
            out.push(AddressedMove {
                from: from_shakmaty(from),
                to: from_shakmaty(to),
                inner: m.clone(),
            });
        }
        out
    }
}

/// Parse and validate a FEN into a playable position
pub fn parse_fen(fen: &str) -> GameResult<Chess> {
    let parsed: Fen = fen.trim().parse().map_err(|err| GameError::InvalidPosition {
        message: format!("{fen:?}: {err}"),
    })?;
    parsed
        .into_position::<Chess>(CastlingMode::Standard)
        .map_err(|err| GameError::InvalidPosition {
            message: format!("{fen:?}: {err}"),
        })
}

fn position_fen(position: &Chess) -> String {
    Fen::from_position(position, EnPassantMode::Legal).to_string()
}

/// First four FEN fields; move counters do not affect repetition
fn repetition_key(position: &Chess) -> String {
    position_fen(position)
        .split_whitespace()
        .take(4)
        .collect::<Vec<_>>()
        .join(" ")
}

fn matches_promotion(m: &Move, requested: PieceType) -> bool {
    match m.promotion() {
        Some(role) => piece_type(role) == requested,
        None => true,
    }
}

fn flags_for(m: &Move) -> MoveFlags {
    let mut flags = MoveFlags {
        capture: m.is_capture(),
        en_passant: m.is_en_passant(),
        promotion: m.is_promotion(),
        ..MoveFlags::default()
    };
    match m {
        Move::Castle { king, rook } => {
            if rook.file() > king.file() {
                flags.kingside_castle = true;
            } else {
                flags.queenside_castle = true;
            }
        }
        Move::Normal {
            role: Role::Pawn,
            from,
            to,
            ..
        } => {
            flags.big_pawn = (from.rank() as u8).abs_diff(to.rank() as u8) == 2;
        }
        _ => {}
    }
    flags
}

fn to_shakmaty(square: Square) -> shakmaty::Square {
    shakmaty::Square::from_coords(
        File::new(u32::from(square.file_index())),
        Rank::new(u32::from(square.rank_index())),
    )
}

fn from_shakmaty(square: shakmaty::Square) -> Square {
    Square::on_board(square.file() as u8, square.rank() as u8)
}

fn piece_type(role: Role) -> PieceType {
    match role {
        Role::Pawn => PieceType::Pawn,
        Role::Knight => PieceType::Knight,
        Role::Bishop => PieceType::Bishop,
        Role::Rook => PieceType::Rook,
        Role::Queen => PieceType::Queen,
        Role::King => PieceType::King,
    }
}

fn piece_color(color: Color) -> PieceColor {
    match color {
        Color::White => PieceColor::White,
        Color::Black => PieceColor::Black,
    }
}
