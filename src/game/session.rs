//! Game session - the UI-facing facade over one interactive board
//!
//! Owns the canonical store, the review cursor, the selection, the last-move
//! marker, the computer player and the outgoing event queue, and exposes the
//! intents a board front end sends: select a square, move, undo, reset,
//! toggle the computer, change difficulty, review history, export.
//!
//! # Turn coordination
//!
//! Every intent that changes the canonical position finishes by letting the
//! computer player re-evaluate the turn, which may launch an engine query.
//! Engine replies arrive on the receiver returned by [`GameSession::new`] and
//! must be fed back through [`GameSession::apply_engine_reply`]. Launching a
//! query spawns a tokio task, so sessions with the computer enabled must be
//! driven from inside a tokio runtime.
//!
//! # Review
//!
//! Reviewing never touches canonical state. A human move attempted while
//! reviewing first returns the board to the live position and is then judged
//! against it. A computer move arriving while reviewing is committed and the
//! cursor stays where the user left it.
//!
//! # Examples
//!
//! ```rust,ignore
//! let (mut session, mut replies) = GameSession::new(None, config, Some(engine))?;
//! session.attempt_move(e2, e4);
//! while let Some(reply) = replies.recv().await {
//!     session.apply_engine_reply(reply);
//! }
//! ```

use crate::game::ai::{
    ComputerConfig, ComputerPlayer, Difficulty, EngineReply, SearchEngine,
};
use crate::game::components::{
    BoardMatrix, GameStatus, LastMove, MoveRecord, MoveRequest, PieceType,
};
use crate::game::error::{GameError, GameResult};
use crate::game::events::{GameEvent, GameEvents};
use crate::game::resources::{
    GameStateStore, ReviewController, ReviewCursor, Selection, TurnPhase,
};
use crate::game::rules::{PgnTags, Square};
use crate::game::systems::{execute_move, undo_moves, MoveContext};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, info, warn};

/// Text formats for exporting the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Pgn,
    Fen,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pgn" => Ok(ExportFormat::Pgn),
            "fen" => Ok(ExportFormat::Fen),
            other => Err(format!("unknown export format {other:?} (expected pgn or fen)")),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExportFormat::Pgn => "pgn",
            ExportFormat::Fen => "fen",
        })
    }
}

/// One interactive board
#[derive(Debug)]
pub struct GameSession {
    store: GameStateStore,
    review: ReviewController,
    selection: Selection,
    last_move: Option<LastMove>,
    computer: ComputerPlayer,
    events: GameEvents,
    /// Position used by reset; `None` is the standard start
    start_fen: Option<String>,
}

impl GameSession {
    /// Start a session and return it with the engine-reply receiver
    ///
    /// # Errors
    /// `InvalidPosition` if `start_fen` is not a playable position.
    pub fn new(
        start_fen: Option<&str>,
        config: ComputerConfig,
        engine: Option<Arc<dyn SearchEngine>>,
    ) -> GameResult<(Self, UnboundedReceiver<EngineReply>)> {
        let store = GameStateStore::initialize(start_fen)?;
        let (replies_tx, replies_rx) = mpsc::unbounded_channel();
        let mut session = Self {
            store,
            review: ReviewController::default(),
            selection: Selection::default(),
            last_move: None,
            computer: ComputerPlayer::new(config, engine, replies_tx),
            events: GameEvents::default(),
            start_fen: start_fen.map(|fen| fen.trim().to_string()),
        };
        session.after_canonical_change();
        Ok((session, replies_rx))
    }

    // ========================================================================
    // Move intents
    // ========================================================================

    /// Click on a square
    ///
    /// Completes a move when the square is a target of the current selection,
    /// selects it when it holds a piece of the side to move, and otherwise
    /// clears the selection. Returns the committed move, if any.
    pub fn select_square(&mut self, square: Square) -> Option<MoveRecord> {
        if let Some(from) = self.selection.selected_square {
            if self.selection.is_target(square) {
                return self.attempt_move(from, square);
            }
        }

        let selectable = self.computer.accepts_human_move()
            && self
                .store
                .piece_at(square)
                .is_some_and(|piece| piece.color == self.store.turn());
        if selectable {
            if self.review.is_reviewing() {
                self.leave_review();
            }
            let targets = self.store.legal_targets(square);
            debug!("[SELECT] {} -> {} targets", square, targets.len());
            self.selection.select(square, targets);
        } else if self.selection.is_selected() {
            self.selection.clear();
            self.events.push(GameEvent::SelectionCleared);
        }
        None
    }

    /// Move with the default queen promotion; `None` if rejected
    pub fn attempt_move(&mut self, from: Square, to: Square) -> Option<MoveRecord> {
        self.attempt_move_with(MoveRequest::new(from, to))
    }

    /// Move with an explicit request; `None` if rejected
    pub fn attempt_move_with(&mut self, request: MoveRequest) -> Option<MoveRecord> {
        match self.try_move(request) {
            Ok(record) => Some(record),
            Err(err) => {
                info!("[MOVE] Rejected {}{}: {}", request.from, request.to, err);
                None
            }
        }
    }

    /// Like [`GameSession::attempt_move_with`] but keeps the rejection reason
    pub fn try_move(&mut self, request: MoveRequest) -> GameResult<MoveRecord> {
        if self.review.is_reviewing() {
            self.leave_review();
        }
        if !self.computer.accepts_human_move() {
            return Err(GameError::NotYourTurn {
                color: self.store.turn(),
            });
        }

        let record = execute_move("human", &mut self.move_context(), request)?;
        self.after_canonical_change();
        Ok(record)
    }

    /// Move promoting to `promotion` if the move turns out to be a promotion
    pub fn attempt_move_promoting(
        &mut self,
        from: Square,
        to: Square,
        promotion: PieceType,
    ) -> Option<MoveRecord> {
        self.attempt_move_with(MoveRequest::new(from, to).with_promotion(promotion))
    }

    /// Take back the last move, or the last pair when playing the computer
    ///
    /// Returns the number of plies removed.
    pub fn request_undo(&mut self) -> usize {
        let count = self.computer.undo_ply_count(&self.store);
        if count == 0 {
            debug!("[UNDO] No moves to undo");
            return 0;
        }
        self.computer.cancel("undo");

        let removed = undo_moves(&mut self.move_context(), count);
        if self.review.is_reviewing() {
            self.leave_review();
        }
        self.after_canonical_change();
        removed
    }

    /// Start over from the session's starting position
    pub fn request_reset(&mut self) -> GameResult<()> {
        let start = self.start_fen.clone();
        self.restart(start)
    }

    /// Start over from `fen` (standard start for `None`), keeping it for later resets
    ///
    /// # Errors
    /// `InvalidPosition` if `fen` is unplayable; the current game is kept.
    pub fn new_game_from_fen(&mut self, fen: Option<&str>) -> GameResult<()> {
        self.restart(fen.map(|fen| fen.trim().to_string()))
    }

    fn restart(&mut self, start_fen: Option<String>) -> GameResult<()> {
        self.store.reset(start_fen.as_deref())?;
        self.start_fen = start_fen;
        self.computer.on_reset();
        self.review.reset_to_live();
        self.selection.clear();
        self.last_move = None;

        self.events.push(GameEvent::GameReset {
            game_id: self.store.game_id(),
        });
        self.events.push(GameEvent::SelectionCleared);
        self.events.push(GameEvent::LastMoveChanged(None));
        self.events.push(GameEvent::ReviewChanged(ReviewCursor::Live));
        self.after_canonical_change();
        Ok(())
    }

    // ========================================================================
    // Computer intents
    // ========================================================================

    /// Turn the computer opponent on or off; always starts a new game
    pub fn toggle_computer(&mut self) -> GameResult<bool> {
        let enabled = !self.computer.is_enabled();
        self.computer.set_enabled(enabled);
        self.request_reset()?;
        Ok(enabled)
    }

    /// Change difficulty (clamped to 1..=20)
    ///
    /// Once the game has moves the change waits for the next reset.
    pub fn set_difficulty(&mut self, level: i64) -> Difficulty {
        let game_started = !self.store.moves().is_empty();
        self.computer.set_difficulty(level, game_started)
    }

    /// Ask the engine again after it failed to produce a move
    pub fn retry_computer(&mut self) -> bool {
        match self.computer.retry(&self.store) {
            Ok(Some(ticket)) => {
                self.events.push(GameEvent::ComputerThinking { ticket });
                true
            }
            Ok(None) => false,
            Err(err) => {
                self.report_computer_failure(err.to_string());
                false
            }
        }
    }

    /// Feed an engine reply back in; returns the committed computer move
    ///
    /// Replies for positions that are no longer current are dropped.
    pub fn apply_engine_reply(&mut self, reply: EngineReply) -> Option<MoveRecord> {
        let request = match self.computer.accept_reply(reply, &self.store) {
            Ok(request) => request,
            Err(GameError::StaleEngineResponse { .. }) => return None,
            Err(err) => {
                self.report_computer_failure(err.to_string());
                return None;
            }
        };

        match execute_move("computer", &mut self.move_context(), request) {
            Ok(record) => {
                self.after_canonical_change();
                Some(record)
            }
            Err(err) => {
                // legal-looking text that the position does not allow
                self.computer.mark_failed();
                self.report_computer_failure(
                    GameError::EngineDecodeFailure {
                        reply: Some(format!("{}{}", request.from, request.to)),
                    }
                    .to_string(),
                );
                debug!("[AI] Engine move rejected: {}", err);
                None
            }
        }
    }

    // ========================================================================
    // Review intents
    // ========================================================================

    /// Show the position after move `index` without changing the game
    pub fn view_history_index(&mut self, index: usize) -> GameResult<()> {
        self.review.view_position(index, self.store.history())?;
        self.selection.clear();
        self.events.push(GameEvent::SelectionCleared);
        self.events.push(GameEvent::ReviewChanged(self.review.cursor()));
        Ok(())
    }

    /// Show the starting position
    pub fn reset_to_start(&mut self) {
        self.review.reset_to_start();
        self.selection.clear();
        self.events.push(GameEvent::SelectionCleared);
        self.events.push(GameEvent::ReviewChanged(self.review.cursor()));
    }

    /// Return to the live position
    pub fn reset_to_live(&mut self) {
        if self.review.is_reviewing() {
            self.leave_review();
        }
    }

    fn leave_review(&mut self) {
        self.review.reset_to_live();
        self.events.push(GameEvent::ReviewChanged(ReviewCursor::Live));
    }

    // ========================================================================
    // Export
    // ========================================================================

    /// Current game as PGN or the live position as FEN
    pub fn export_as_text(&self, format: ExportFormat) -> String {
        match format {
            ExportFormat::Fen => self.store.fen(),
            ExportFormat::Pgn => self.store.pgn(&self.pgn_tags()),
        }
    }

    fn pgn_tags(&self) -> PgnTags {
        let black = if self.computer.is_enabled() {
            format!("Computer (level {})", self.computer.difficulty().level())
        } else {
            "Player".to_string()
        };
        PgnTags::default().with_players("Player", black)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Board to draw: reviewed snapshot or the live position
    pub fn displayed_board(&self) -> BoardMatrix {
        self.review.displayed_board(&self.store)
    }

    /// Status to draw for the displayed position
    pub fn displayed_status(&self) -> GameStatus {
        self.review.displayed_status(&self.store)
    }

    /// Status of the live position
    pub fn status(&self) -> GameStatus {
        self.store.status()
    }

    /// Events queued since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    pub fn store(&self) -> &GameStateStore {
        &self.store
    }

    pub fn moves(&self) -> &[MoveRecord] {
        self.store.moves()
    }

    pub fn review_cursor(&self) -> ReviewCursor {
        self.review.cursor()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn last_move(&self) -> Option<LastMove> {
        self.last_move
    }

    pub fn computer(&self) -> &ComputerPlayer {
        &self.computer
    }

    pub fn phase(&self) -> TurnPhase {
        self.computer.phase()
    }

    pub fn is_thinking(&self) -> bool {
        self.computer.is_thinking()
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn move_context(&mut self) -> MoveContext<'_> {
        MoveContext {
            store: &mut self.store,
            selection: &mut self.selection,
            last_move: &mut self.last_move,
            events: &mut self.events,
        }
    }

    fn after_canonical_change(&mut self) {
        match self.computer.on_canonical_changed(&self.store) {
            Ok(Some(ticket)) => self.events.push(GameEvent::ComputerThinking { ticket }),
            Ok(None) => {}
            Err(err) => self.report_computer_failure(err.to_string()),
        }
    }

    fn report_computer_failure(&mut self, reason: String) {
        warn!("[AI] Computer could not move: {}", reason);
        self.events.push(GameEvent::ComputerCouldNotMove { reason });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::components::PieceColor;

    fn session() -> GameSession {
        GameSession::new(None, ComputerConfig::default(), None)
            .expect("standard start")
            .0
    }

    fn sq(text: &str) -> Square {
        text.parse().unwrap()
    }

    #[test]
    fn test_click_to_select_then_move() {
        let mut session = session();

        assert!(session.select_square(sq("e2")).is_none());
        assert_eq!(session.selection().possible_moves, vec![sq("e3"), sq("e4")]);

        let record = session.select_square(sq("e4")).expect("move completed");
        assert_eq!(record.san, "e4");
        assert!(!session.selection().is_selected());
    }

    #[test]
    fn test_click_on_opponent_piece_clears_selection() {
        let mut session = session();
        session.select_square(sq("g1"));
        assert!(session.selection().is_selected());

        session.select_square(sq("e7"));
        assert!(!session.selection().is_selected());
    }

    #[test]
    fn test_hot_seat_without_computer() {
        let mut session = session();
        session.attempt_move(sq("e2"), sq("e4")).unwrap();
        session.attempt_move(sq("e7"), sq("e5")).unwrap();

        assert_eq!(session.moves().len(), 2);
        assert_eq!(session.status().side_to_move, PieceColor::White);
        assert_eq!(session.phase(), TurnPhase::HumanTurn);
        assert_eq!(session.request_undo(), 1);
    }

    #[test]
    fn test_export_formats() {
        let mut session = session();
        session.attempt_move(sq("e2"), sq("e4")).unwrap();

        assert_eq!(
            session.export_as_text(ExportFormat::Fen),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1"
        );
        let pgn = session.export_as_text(ExportFormat::Pgn);
        assert!(pgn.contains("[White \"Player\"]"));
        assert!(pgn.trim_end().ends_with("1. e4 *"));
        assert_eq!("PGN".parse::<ExportFormat>(), Ok(ExportFormat::Pgn));
        assert!("txt".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_new_game_from_bad_fen_keeps_game() {
        let mut session = session();
        session.attempt_move(sq("d2"), sq("d4")).unwrap();

        assert!(session.new_game_from_fen(Some("nonsense")).is_err());
        assert_eq!(session.moves().len(), 1);
    }
}
