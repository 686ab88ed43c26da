//! Text rendering of the displayed board, status line and events

use crate::game::components::{BoardMatrix, GameStatus, LastMove};
use crate::game::resources::{ReviewCursor, Selection, TurnPhase};
use crate::game::rules::{to_square, Square};
use crate::game::{GameEvent, GameSession};
use std::fmt::Write;

/// Square decorations drawn on top of the pieces
#[derive(Debug, Clone, Default)]
pub struct Highlights {
    pub last_move: Option<LastMove>,
    pub selected: Option<Square>,
    pub targets: Vec<Square>,
}

impl Highlights {
    /// Decorations for a session; nothing is highlighted while reviewing
    pub fn for_session(session: &GameSession, show_last_move: bool) -> Self {
        if session.review_cursor().is_active() {
            return Self::default();
        }
        let selection: &Selection = session.selection();
        Self {
            last_move: session.last_move().filter(|_| show_last_move),
            selected: selection.selected_square,
            targets: selection.possible_moves.clone(),
        }
    }
}

/// Draw `board` with rank 8 at the top
///
/// Selected square `[P]`, legal target `.*`, last move `(P)`.
pub fn render_board(board: &BoardMatrix, highlights: &Highlights) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  +------------------------+");
    for row in 0..8u8 {
        let _ = write!(out, "{} |", 8 - row);
        for col in 0..8u8 {
            let symbol = board.get(row, col).map(|p| p.fen_char()).unwrap_or('.');
            let (left, right) = match to_square(row, col) {
                Ok(square) => decoration(square, highlights),
                Err(_) => (' ', ' '),
            };
            let _ = write!(out, "{left}{symbol}{right}");
        }
        let _ = writeln!(out, "|");
    }
    let _ = writeln!(out, "  +------------------------+");
    let _ = write!(out, "    a  b  c  d  e  f  g  h");
    out
}

fn decoration(square: Square, highlights: &Highlights) -> (char, char) {
    if highlights.selected == Some(square) {
        ('[', ']')
    } else if highlights.targets.contains(&square) {
        (' ', '*')
    } else if highlights
        .last_move
        .is_some_and(|last| last.from == square || last.to == square)
    {
        ('(', ')')
    } else {
        (' ', ' ')
    }
}

/// One-line summary of the displayed position
pub fn status_line(status: &GameStatus, cursor: ReviewCursor, phase: TurnPhase) -> String {
    let mut line = match cursor {
        ReviewCursor::Live => String::new(),
        ReviewCursor::Reviewing(0) => "[reviewing start] ".to_string(),
        ReviewCursor::Reviewing(index) => format!("[reviewing position {index}] "),
    };

    if let Some(winner) = status.winner() {
        let _ = write!(line, "Checkmate, {} wins", winner.name());
    } else if status.is_stalemate {
        line.push_str("Draw by stalemate");
    } else if status.is_draw {
        line.push_str("Draw");
    } else {
        let _ = write!(line, "{} to move", status.side_to_move.name());
        if status.is_check {
            line.push_str(", check");
        }
    }

    if !cursor.is_active() && phase.is_computer_thinking() {
        line.push_str(" (computer thinking...)");
    }
    line
}

/// Message for an event worth telling the user about
pub fn describe_event(event: &GameEvent) -> Option<String> {
    match event {
        GameEvent::MovePlayed { record, .. } => {
            Some(format!("{} played {}", record.color.name(), record.san))
        }
        GameEvent::MovesUndone { count } => Some(match count {
            1 => "Took back 1 move".to_string(),
            n => format!("Took back {n} moves"),
        }),
        GameEvent::ComputerCouldNotMove { reason } => Some(format!(
            "Computer could not move: {reason} (type 'retry' to ask again)"
        )),
        GameEvent::GameReset { .. } => Some("New game".to_string()),
        GameEvent::LastMoveChanged(_)
        | GameEvent::SelectionCleared
        | GameEvent::ReviewChanged(_)
        | GameEvent::ComputerThinking { .. } => None,
    }
}

/// Full screen for a session: board, status and move list tail
pub fn render_session(session: &GameSession, show_last_move: bool) -> String {
    let highlights = Highlights::for_session(session, show_last_move);
    let mut out = render_board(&session.displayed_board(), &highlights);
    let _ = write!(
        out,
        "\n{}",
        status_line(
            &session.displayed_status(),
            session.review_cursor(),
            session.phase()
        )
    );
    if let Some(level) = session
        .computer()
        .is_enabled()
        .then(|| session.computer().difficulty())
    {
        let _ = write!(out, " | computer: {level}");
    }
    out
}
