//! Rules adapter test suite
//!
//! Exercises `ChessRules` against positions with known outcomes.
//!
//! # Test Organization
//!
//! - `test_start_*` - standard starting position queries
//! - `test_play_*` - move application, records and rejection
//! - `test_special_*` - castling, en passant, promotion
//! - `test_status_*` - check, mate, stalemate and draw detection
//! - `test_export_*` - FEN and PGN output

use super::*;
use crate::game::components::{MoveRequest, PieceColor, PieceType};
use crate::game::error::GameError;

const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

fn sq(text: &str) -> Square {
    text.parse().expect("valid square")
}

fn request(from: &str, to: &str) -> MoveRequest {
    MoveRequest::new(sq(from), sq(to))
}

fn play_all(rules: &mut ChessRules, moves: &[(&str, &str)]) {
    for (from, to) in moves {
        rules
            .play(request(from, to))
            .unwrap_or_else(|err| panic!("{from}{to} should be legal: {err}"));
    }
}

// ============================================================================
// Starting Position
// ============================================================================

#[test]
fn test_start_position_queries() {
    let rules = ChessRules::new();

    assert_eq!(rules.fen(), START_FEN);
    assert_eq!(rules.turn(), PieceColor::White);
    assert_eq!(rules.ply_count(), 0);
    assert_eq!(rules.start_fen(), None);
    assert_eq!(rules.legal_targets(sq("e2")), vec![sq("e3"), sq("e4")]);
    assert_eq!(rules.legal_targets(sq("g1")), vec![sq("f3"), sq("h3")]);
    assert!(rules.legal_targets(sq("e7")).is_empty(), "not black's turn");
    assert!(rules.legal_targets(sq("e4")).is_empty(), "empty square");
}

#[test]
fn test_start_board_matrix() {
    //! Display orientation: row 0 holds black's back rank

    let board = ChessRules::new().board();
    let corner = board.get(0, 0).expect("a8 rook");
    assert_eq!(corner.piece_type, PieceType::Rook);
    assert_eq!(corner.color, PieceColor::Black);
    let king = board.get(7, 4).expect("e1 king");
    assert_eq!(king.piece_type, PieceType::King);
    assert_eq!(king.color, PieceColor::White);
    assert_eq!(board.piece_count(), 32);
}

// ============================================================================
// Playing Moves
// ============================================================================

#[test]
fn test_play_records_the_move() {
    let mut rules = ChessRules::new();
    let record = rules.play(request("e2", "e4")).expect("legal");

    assert_eq!(record.san, "e4");
    assert_eq!(record.color, PieceColor::White);
    assert_eq!(record.piece, PieceType::Pawn);
    assert!(record.flags.big_pawn);
    assert!(!record.flags.capture);
    assert_eq!(rules.turn(), PieceColor::Black);
    assert_eq!(
        rules.fen(),
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1"
    );
}

#[test]
fn test_play_rejects_illegal_move_without_change() {
    //! A rejected move leaves position, SAN list and turn untouched

    let mut rules = ChessRules::new();
    let before = rules.fen();

    let err = rules.play(request("e2", "e5")).unwrap_err();
    assert!(matches!(err, GameError::IllegalMove { .. }));
    assert!(rules.play(request("e7", "e5")).is_err(), "black cannot move first");

    assert_eq!(rules.fen(), before);
    assert_eq!(rules.ply_count(), 0);
}

#[test]
fn test_play_capture_flags() {
    let mut rules = ChessRules::new();
    play_all(&mut rules, &[("e2", "e4"), ("d7", "d5")]);
    let record = rules.play(request("e4", "d5")).expect("capture");

    assert_eq!(record.san, "exd5");
    assert!(record.flags.capture);
    assert_eq!(record.captured, Some(PieceType::Pawn));
}

#[test]
fn test_undo_restores_previous_position() {
    let mut rules = ChessRules::new();
    play_all(&mut rules, &[("e2", "e4"), ("e7", "e5")]);

    assert!(rules.undo());
    assert_eq!(rules.ply_count(), 1);
    assert_eq!(rules.san_history(), ["e4".to_string()]);
    assert_eq!(rules.turn(), PieceColor::Black);

    assert!(rules.undo());
    assert_eq!(rules.fen(), START_FEN);
    assert!(!rules.undo(), "nothing left to undo");
}

// ============================================================================
// Special Moves
// ============================================================================

#[test]
fn test_special_castling_uses_king_destination() {
    let fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";

    let mut rules = ChessRules::from_fen(fen).expect("valid fen");
    let short = rules.play(request("e1", "g1")).expect("O-O");
    assert_eq!(short.san, "O-O");
    assert!(short.flags.kingside_castle);
    assert_eq!((short.from, short.to), (sq("e1"), sq("g1")));
    assert_eq!(
        rules.piece_at(sq("f1")).map(|p| p.piece_type),
        Some(PieceType::Rook)
    );

    let long = rules.play(request("e8", "c8")).expect("O-O-O");
    assert_eq!(long.san, "O-O-O");
    assert!(long.flags.queenside_castle);
    assert!(long.flags.is_castle());
    assert_eq!(
        rules.piece_at(sq("d8")).map(|p| p.piece_type),
        Some(PieceType::Rook)
    );
}

#[test]
fn test_special_en_passant_sets_capture() {
    let mut rules = ChessRules::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").expect("valid fen");
    let record = rules.play(request("e5", "d6")).expect("en passant");

    assert!(record.flags.en_passant);
    assert!(record.flags.capture);
    assert_eq!(record.captured, Some(PieceType::Pawn));
    assert_eq!(rules.piece_at(sq("d5")), None);
}

#[test]
fn test_special_promotion_choice() {
    let fen = "8/P7/8/8/8/8/8/k6K w - - 0 1";

    let mut queen = ChessRules::from_fen(fen).expect("valid fen");
    let record = queen.play(request("a7", "a8")).expect("default promotion");
    assert_eq!(record.promotion, Some(PieceType::Queen));
    assert!(record.flags.promotion);
    assert_eq!(record.san, "a8=Q+");

    let mut knight = ChessRules::from_fen(fen).expect("valid fen");
    let record = knight
        .play(request("a7", "a8").with_promotion(PieceType::Knight))
        .expect("under-promotion");
    assert_eq!(record.san, "a8=N");
    assert_eq!(
        knight.piece_at(sq("a8")).map(|p| p.piece_type),
        Some(PieceType::Knight)
    );
}

// ============================================================================
// Status Detection
// ============================================================================

#[test]
fn test_status_checkmate() {
    let mut rules = ChessRules::new();
    play_all(
        &mut rules,
        &[("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")],
    );

    let status = rules.status();
    assert!(status.is_check);
    assert!(status.is_checkmate);
    assert!(status.is_game_over);
    assert!(!status.is_draw);
    assert_eq!(status.winner(), Some(PieceColor::Black));
    assert_eq!(rules.san_history().last().map(String::as_str), Some("Qh4#"));
}

#[test]
fn test_status_stalemate_is_draw() {
    let status = ChessRules::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1")
        .expect("valid fen")
        .status();
    assert!(status.is_stalemate);
    assert!(status.is_draw);
    assert!(status.is_game_over);
    assert!(!status.is_check);
}

#[test]
fn test_status_insufficient_material_and_fifty_moves() {
    let bare_kings = ChessRules::from_fen("8/8/8/4k3/8/8/8/4K3 w - - 0 1").expect("valid fen");
    assert!(bare_kings.status().is_draw);

    let fifty = ChessRules::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 100 80").expect("valid fen");
    assert!(fifty.status().is_draw);

    let forty_nine = ChessRules::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 99 80").expect("valid fen");
    assert!(!forty_nine.status().is_game_over);
}

#[test]
fn test_status_threefold_repetition() {
    //! Knights shuffle back home twice: start position reached a third time

    let shuffle = [("g1", "f3"), ("g8", "f6"), ("f3", "g1"), ("f6", "g8")];
    let mut rules = ChessRules::new();

    play_all(&mut rules, &shuffle);
    assert!(!rules.status().is_draw, "only twice so far");

    play_all(&mut rules, &shuffle);
    assert!(rules.is_threefold_repetition());
    assert!(rules.status().is_draw);

    rules.undo();
    assert!(!rules.is_threefold_repetition());
}

#[test]
fn test_invalid_fen_is_rejected() {
    for fen in ["not a fen", "8/8/8/8/8/8/8/8 w - - 0 1"] {
        assert!(
            matches!(
                ChessRules::from_fen(fen),
                Err(GameError::InvalidPosition { .. })
            ),
            "{fen:?} should be rejected"
        );
    }
}

// ============================================================================
// Export
// ============================================================================

#[test]
fn test_export_pgn_movetext() {
    let mut rules = ChessRules::new();
    play_all(&mut rules, &[("e2", "e4"), ("e7", "e5"), ("g1", "f3")]);

    let pgn = rules.pgn(&PgnTags::default());
    assert!(pgn.contains("[Result \"*\"]"));
    assert!(pgn.trim_end().ends_with("1. e4 e5 2. Nf3 *"));
}

#[test]
fn test_export_pgn_custom_start() {
    let fen = "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1";
    let mut rules = ChessRules::from_fen(fen).expect("valid fen");
    play_all(&mut rules, &[("e2", "e4")]);

    let pgn = rules.pgn(&PgnTags::default());
    assert!(pgn.contains(&format!("[FEN \"{fen}\"]")));
    assert!(pgn.trim_end().ends_with("1. e4 *"));
}

#[test]
fn test_export_snapshot_matches_live_state() {
    let mut rules = ChessRules::new();
    play_all(&mut rules, &[("d2", "d4")]);
    let snapshot = rules.snapshot();
    assert_eq!(snapshot.fen, rules.fen());
    assert_eq!(snapshot.board, rules.board());
}

#[test]
fn test_export_fen_lists_only_capturable_en_passant_square() {
    //! A double push records an en passant square only when a capture is possible
    let mut rules = ChessRules::new();
    play_all(&mut rules, &[("e2", "e4"), ("d7", "d5"), ("e4", "e5"), ("f7", "f5")]);
    assert_eq!(
        rules.fen(),
        "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3"
    );

    let custom = "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1";
    assert_eq!(ChessRules::from_fen(custom).expect("valid fen").fen(), custom);
}
