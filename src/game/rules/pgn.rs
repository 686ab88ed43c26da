//! PGN export
//!
//! Writes the Seven Tag Roster, `SetUp`/`FEN` for games that did not start
//! from the standard position, and numbered SAN movetext terminated by the
//! result token.

use crate::game::components::PieceColor;
use chrono::{Local, NaiveDate};
use std::fmt::Write;

/// Header tags of an exported game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PgnTags {
    pub event: String,
    pub site: String,
    pub date: NaiveDate,
    pub round: String,
    pub white: String,
    pub black: String,
}

impl Default for PgnTags {
    fn default() -> Self {
        Self {
            event: "Casual Game".to_string(),
            site: "chess_sync".to_string(),
            date: Local::now().date_naive(),
            round: "-".to_string(),
            white: "White".to_string(),
            black: "Black".to_string(),
        }
    }
}

impl PgnTags {
    pub fn with_players(mut self, white: impl Into<String>, black: impl Into<String>) -> Self {
        self.white = white.into();
        self.black = black.into();
        self
    }
}

/// Quote-escape a tag value
fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Render a complete PGN document
///
/// `first_move_number` and `first_mover` describe the starting position so
/// that a game set up with black to move opens with `N...`.
pub fn write_pgn(
    tags: &PgnTags,
    start_fen: Option<&str>,
    first_move_number: u32,
    first_mover: PieceColor,
    sans: &[String],
    result: &str,
) -> String {
    let mut out = String::new();
    let roster = [
        ("Event", tags.event.clone()),
        ("Site", tags.site.clone()),
        ("Date", tags.date.format("%Y.%m.%d").to_string()),
        ("Round", tags.round.clone()),
        ("White", tags.white.clone()),
        ("Black", tags.black.clone()),
        ("Result", result.to_string()),
    ];
    for (name, value) in roster {
        let _ = writeln!(out, "[{} \"{}\"]", name, escape(&value));
    }
    if let Some(fen) = start_fen {
        let _ = writeln!(out, "[SetUp \"1\"]");
        let _ = writeln!(out, "[FEN \"{}\"]", escape(fen));
    }
    out.push('\n');

    let mut tokens: Vec<String> = Vec::with_capacity(sans.len() + sans.len() / 2 + 1);
    let mut number = first_move_number;
    let mut mover = first_mover;
    for (ply, san) in sans.iter().enumerate() {
        match mover {
            PieceColor::White => tokens.push(format!("{number}.")),
            PieceColor::Black if ply == 0 => tokens.push(format!("{number}...")),
            PieceColor::Black => {}
        }
        tokens.push(san.clone());
        if mover == PieceColor::Black {
            number += 1;
        }
        mover = mover.opposite();
    }
    tokens.push(result.to_string());
    out.push_str(&tokens.join(" "));
    out.push('\n');
    out
}
