//! Command parsing for the terminal front end
//!
//! Each input line maps to one [`Command`], which the binary turns into a
//! single [`GameSession`](crate::game::GameSession) intent. Parsing is pure;
//! nothing here touches game state.

use crate::game::components::PieceType;
use crate::game::rules::Square;
use crate::game::ExportFormat;
use std::str::FromStr;
use thiserror::Error;

/// One user intent typed at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `e2e4`, `e7e8n`, `move e2 e4 [q]`
    Move {
        from: Square,
        to: Square,
        promotion: Option<PieceType>,
    },
    /// `select e2` - click a square
    Select(Square),
    Undo,
    Reset,
    /// `new [FEN]` - new game from a position, kept for later resets
    NewGame(Option<String>),
    ToggleComputer,
    Difficulty(i64),
    /// `view N` - history position N (0 = start)
    View(usize),
    Start,
    Live,
    Export(ExportFormat),
    Retry,
    Board,
    Help,
    Quit,
}

/// Why a line could not be understood
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command {0:?} (type 'help')")]
    Unknown(String),

    #[error("'{command}' needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("'{command}': {message}")]
    InvalidArgument {
        command: &'static str,
        message: String,
    },
}

/// Result type alias for command parsing
pub type CommandResult<T> = Result<T, CommandError>;

/// Help text listing every command
pub const HELP: &str = "\
Commands:
  e2e4 | e7e8n          move in coordinate notation (promotion letter optional)
  move e2 e4 [q|r|b|n]  move with an explicit promotion piece
  select e2             click a square (select a piece or complete a move)
  undo                  take back the last move (last pair against the computer)
  reset                 start over from the starting position
  new [FEN]             new game from FEN (standard start without one)
  computer              toggle the computer opponent (starts a new game)
  difficulty N          computer strength 1-20
  view N                show the position after N moves (0 = start)
  start | live          show the starting position | back to the live game
  export pgn|fen        print the game as PGN or the position as FEN
  retry                 ask the engine again after it failed
  board                 redraw the board
  help                  this text
  quit                  exit";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> CommandResult<Self> {
        let line = line.trim();
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(CommandError::Empty);
        };
        let keyword = head.to_ascii_lowercase();

        let command = match keyword.as_str() {
            "move" | "m" => {
                let from = square_arg("move", words.next(), "a from square")?;
                let to = square_arg("move", words.next(), "a to square")?;
                let promotion = words.next().map(|p| promotion_arg("move", p)).transpose()?;
                Command::Move {
                    from,
                    to,
                    promotion,
                }
            }
            "select" | "s" => Command::Select(square_arg("select", words.next(), "a square")?),
            "undo" | "u" => Command::Undo,
            "reset" => Command::Reset,
            "new" => {
                let fen = words.collect::<Vec<_>>().join(" ");
                Command::NewGame((!fen.is_empty()).then_some(fen))
            }
            "computer" | "ai" => Command::ToggleComputer,
            "difficulty" | "level" => {
                let raw = words.next().ok_or(CommandError::MissingArgument {
                    command: "difficulty",
                    argument: "a level",
                })?;
                let level = raw.parse::<i64>().map_err(|_| CommandError::InvalidArgument {
                    command: "difficulty",
                    message: format!("{raw:?} is not a number"),
                })?;
                Command::Difficulty(level)
            }
            "view" | "v" => {
                let raw = words.next().ok_or(CommandError::MissingArgument {
                    command: "view",
                    argument: "a move index",
                })?;
                let index = raw.parse::<usize>().map_err(|_| CommandError::InvalidArgument {
                    command: "view",
                    message: format!("{raw:?} is not a move index"),
                })?;
                Command::View(index)
            }
            "start" => Command::Start,
            "live" => Command::Live,
            "export" => {
                let raw = words.next().unwrap_or("pgn");
                let format = raw
                    .parse::<ExportFormat>()
                    .map_err(|message| CommandError::InvalidArgument {
                        command: "export",
                        message,
                    })?;
                Command::Export(format)
            }
            "retry" => Command::Retry,
            "board" | "b" => Command::Board,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => return coordinate_move(head).ok_or(CommandError::Unknown(head.to_string())),
        };
        Ok(command)
    }
}

fn square_arg(
    command: &'static str,
    word: Option<&str>,
    argument: &'static str,
) -> CommandResult<Square> {
    let word = word.ok_or(CommandError::MissingArgument { command, argument })?;
    word.parse::<Square>()
        .map_err(|err| CommandError::InvalidArgument {
            command,
            message: err.to_string(),
        })
}

fn promotion_arg(command: &'static str, word: &str) -> CommandResult<PieceType> {
    let mut chars = word.chars();
    match (chars.next().and_then(PieceType::from_promotion_char), chars.next()) {
        (Some(piece), None) => Ok(piece),
        _ => Err(CommandError::InvalidArgument {
            command,
            message: format!("{word:?} is not a promotion piece (q, r, b, n)"),
        }),
    }
}

/// `e2e4` or `e7e8q` typed on its own
fn coordinate_move(word: &str) -> Option<Command> {
    if !(4..=5).contains(&word.len()) || !word.is_ascii() {
        return None;
    }
    let from = word[0..2].parse::<Square>().ok()?;
    let to = word[2..4].parse::<Square>().ok()?;
    let promotion = match word[4..].chars().next() {
        None => None,
        Some(c) => Some(PieceType::from_promotion_char(c)?),
    };
    Some(Command::Move {
        from,
        to,
        promotion,
    })
}
