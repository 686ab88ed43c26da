//! Game state store - single owner of the canonical match
//!
//! Holds the live rules instance, the chronological move records and the
//! position history, and keeps them in step: every mutator either updates
//! all three or none of them.
//!
//! # Architecture
//!
//! Only three operations mutate the store:
//! - [`GameStateStore::apply_move`] commits one ply
//! - [`GameStateStore::undo_last`] takes one ply back
//! - [`GameStateStore::reset`] replaces the whole match
//!
//! Each bumps the [`generation`](GameStateStore::generation) counter. An
//! asynchronous engine query remembers the generation it was launched at
//! and its reply is only accepted while that generation is still current.
//!
//! Status is never cached; [`GameStateStore::status`] asks the rules
//! instance every time.

use crate::game::components::{
    BoardMatrix, GameStatus, MoveRecord, MoveRequest, Piece, PieceColor, PositionSnapshot,
};
use crate::game::error::GameResult;
use crate::game::resources::history::PositionHistory;
use crate::game::rules::{ChessRules, PgnTags, Square};
use tracing::{debug, info};
use uuid::Uuid;

/// Canonical match state: rules instance, move records, position history
#[derive(Debug, Clone)]
pub struct GameStateStore {
    rules: ChessRules,
    moves: Vec<MoveRecord>,
    history: PositionHistory,
    generation: u64,
    game_id: Uuid,
}

impl GameStateStore {
    /// Start a match from the standard position or a supplied FEN
    ///
    /// # Errors
    /// `InvalidPosition` if `start_fen` cannot be parsed into a legal position.
    pub fn initialize(start_fen: Option<&str>) -> GameResult<Self> {
        let rules = ChessRules::with_start(start_fen)?;
        let history = PositionHistory::new(rules.snapshot());
        let game_id = Uuid::new_v4();
        info!("[GAME] New game {} from {}", game_id, rules.fen());
        Ok(Self {
            rules,
            moves: Vec::new(),
            history,
            generation: 0,
            game_id,
        })
    }

    /// Replace the match wholesale; on error the current match is kept
    pub fn reset(&mut self, start_fen: Option<&str>) -> GameResult<()> {
        let rules = ChessRules::with_start(start_fen)?;
        self.history.reset(rules.snapshot());
        self.rules = rules;
        self.moves.clear();
        self.generation += 1;
        self.game_id = Uuid::new_v4();
        info!("[GAME] Reset to game {} from {}", self.game_id, self.rules.fen());
        Ok(())
    }

    /// Commit one ply
    ///
    /// On rejection the rules instance, move list and history are untouched.
    pub fn apply_move(&mut self, request: MoveRequest) -> GameResult<MoveRecord> {
        let record = self.rules.play(request)?;
        self.moves.push(record.clone());
        self.history.append(self.rules.snapshot());
        self.generation += 1;
        debug!(
            "[GAME] {} ply {} committed: {} (generation {})",
            self.game_id,
            self.moves.len(),
            record.san,
            self.generation
        );
        Ok(record)
    }

    /// Take back the most recent ply, if any
    pub fn undo_last(&mut self) -> Option<MoveRecord> {
        if !self.rules.undo() {
            return None;
        }
        let record = self.moves.pop();
        self.history.truncate(self.moves.len() + 1);
        self.generation += 1;
        debug!(
            "[GAME] {} undo -> {} moves (generation {})",
            self.game_id,
            self.moves.len(),
            self.generation
        );
        record
    }

    /// Status of the live position, recomputed on every call
    pub fn status(&self) -> GameStatus {
        self.rules.status()
    }

    /// Counter bumped by every commit, undo and reset
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn game_id(&self) -> Uuid {
        self.game_id
    }

    pub fn moves(&self) -> &[MoveRecord] {
        &self.moves
    }

    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.moves.last()
    }

    pub fn history(&self) -> &PositionHistory {
        &self.history
    }

    /// Snapshot by history index (0 = start)
    pub fn snapshot(&self, index: usize) -> Option<&PositionSnapshot> {
        self.history.get(index)
    }

    pub fn turn(&self) -> PieceColor {
        self.rules.turn()
    }

    pub fn fen(&self) -> String {
        self.rules.fen()
    }

    pub fn pgn(&self, tags: &PgnTags) -> String {
        self.rules.pgn(tags)
    }

    /// Board of the live position, built fresh
    pub fn board(&self) -> BoardMatrix {
        self.rules.board()
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.rules.piece_at(square)
    }

    pub fn legal_targets(&self, square: Square) -> Vec<Square> {
        self.rules.legal_targets(square)
    }

    pub fn start_fen(&self) -> Option<&str> {
        self.rules.start_fen()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::error::GameError;

    fn request(from: &str, to: &str) -> MoveRequest {
        MoveRequest::new(from.parse().unwrap(), to.parse().unwrap())
    }

    fn assert_history_invariant(store: &GameStateStore) {
        assert_eq!(store.history().len(), store.moves().len() + 1);
        assert_eq!(store.history().latest().fen, store.fen());
    }

    #[test]
    fn test_initialize_standard() {
        let store = GameStateStore::initialize(None).unwrap();
        assert!(store.moves().is_empty());
        assert_eq!(store.generation(), 0);
        assert_eq!(store.turn(), PieceColor::White);
        assert_history_invariant(&store);
    }

    #[test]
    fn test_initialize_rejects_bad_fen() {
        let result = GameStateStore::initialize(Some("garbage"));
        assert!(matches!(result, Err(GameError::InvalidPosition { .. })));
    }

    #[test]
    fn test_commit_undo_reset_keep_invariant() {
        let mut store = GameStateStore::initialize(None).unwrap();

        store.apply_move(request("e2", "e4")).unwrap();
        store.apply_move(request("e7", "e5")).unwrap();
        assert_history_invariant(&store);
        assert_eq!(store.generation(), 2);

        let undone = store.undo_last().expect("a move to undo");
        assert_eq!(undone.san, "e5");
        assert_history_invariant(&store);
        assert_eq!(store.generation(), 3);

        let first_id = store.game_id();
        store.reset(None).unwrap();
        assert!(store.moves().is_empty());
        assert_history_invariant(&store);
        assert_ne!(store.game_id(), first_id);
        assert_eq!(store.generation(), 4);
    }

    #[test]
    fn test_rejected_move_changes_nothing() {
        let mut store = GameStateStore::initialize(None).unwrap();
        store.apply_move(request("e2", "e4")).unwrap();
        let generation = store.generation();

        assert!(store.apply_move(request("e4", "e6")).is_err());
        assert_eq!(store.moves().len(), 1);
        assert_eq!(store.generation(), generation);
        assert_history_invariant(&store);
    }

    #[test]
    fn test_undo_on_empty_game() {
        let mut store = GameStateStore::initialize(None).unwrap();
        assert!(store.undo_last().is_none());
        assert_eq!(store.generation(), 0);
    }

    #[test]
    fn test_failed_reset_keeps_match() {
        let mut store = GameStateStore::initialize(None).unwrap();
        store.apply_move(request("d2", "d4")).unwrap();

        assert!(store.reset(Some("8/8/8/8/8/8/8/8 w - - 0 1")).is_err());
        assert_eq!(store.moves().len(), 1);
        assert_history_invariant(&store);
    }
}
