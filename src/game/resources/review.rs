//! Review controller - replay past positions without touching the live game
//!
//! The cursor names a history snapshot to display instead of the live board.
//! Review is read-only: nothing here can reach the rules instance, the move
//! list or the history's mutators. Status shown while reviewing is computed
//! from a throwaway rules instance built from the snapshot's FEN.
//!
//! Reviewable indices are history indices `0..moves`: index 0 is the start,
//! index `i` the position after `i` moves. The position after the last move
//! is the live board and is shown with the cursor at [`ReviewCursor::Live`].

use crate::game::components::{BoardMatrix, GameStatus, PositionSnapshot};
use crate::game::error::{GameError, GameResult};
use crate::game::resources::history::PositionHistory;
use crate::game::resources::store::GameStateStore;
use crate::game::rules::ChessRules;
use tracing::{debug, warn};

/// Which position the board is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewCursor {
    /// The canonical present position
    #[default]
    Live,
    /// History snapshot `index`
    Reviewing(usize),
}

impl ReviewCursor {
    pub fn is_active(&self) -> bool {
        matches!(self, ReviewCursor::Reviewing(_))
    }

    /// History snapshot index being reviewed, `None` when live
    pub fn snapshot_index(&self) -> Option<usize> {
        match self {
            ReviewCursor::Live => None,
            ReviewCursor::Reviewing(index) => Some(*index),
        }
    }
}

/// Tracks the review cursor
#[derive(Debug, Clone, Default)]
pub struct ReviewController {
    cursor: ReviewCursor,
}

impl ReviewController {
    pub fn cursor(&self) -> ReviewCursor {
        self.cursor
    }

    pub fn is_reviewing(&self) -> bool {
        self.cursor.is_active()
    }

    /// Review history snapshot `index`
    ///
    /// # Errors
    /// `ReviewOutOfRange` unless `index < moves`; the cursor is unchanged.
    pub fn view_position(&mut self, index: usize, history: &PositionHistory) -> GameResult<()> {
        let moves = history.len().saturating_sub(1);
        if index >= moves {
            warn!(
                "[REVIEW] Ignoring review of move {} ({} moves played)",
                index, moves
            );
            return Err(GameError::ReviewOutOfRange { index, moves });
        }
        self.cursor = ReviewCursor::Reviewing(index);
        debug!("[REVIEW] Viewing position {} of {}", index, moves);
        Ok(())
    }

    /// Stop reviewing and show the live board
    pub fn reset_to_live(&mut self) {
        if self.cursor.is_active() {
            debug!("[REVIEW] Back to live position");
        }
        self.cursor = ReviewCursor::Live;
    }

    /// Review the starting position
    pub fn reset_to_start(&mut self) {
        debug!("[REVIEW] Viewing starting position");
        self.cursor = ReviewCursor::Reviewing(0);
    }

    /// Snapshot under the cursor, `None` when live
    pub fn reviewed_snapshot<'a>(&self, history: &'a PositionHistory) -> Option<&'a PositionSnapshot> {
        self.cursor
            .snapshot_index()
            .and_then(|index| history.get(index))
    }

    /// Board to display: the reviewed snapshot, or the live board built fresh
    pub fn displayed_board(&self, store: &GameStateStore) -> BoardMatrix {
        match self.reviewed_snapshot(store.history()) {
            Some(snapshot) => snapshot.board,
            None => store.board(),
        }
    }

    /// Status to display, never derived from the canonical rules instance
    /// while reviewing
    pub fn displayed_status(&self, store: &GameStateStore) -> GameStatus {
        match self.reviewed_snapshot(store.history()) {
            Some(snapshot) => match ChessRules::from_fen(&snapshot.fen) {
                Ok(rules) => rules.status(),
                Err(err) => {
                    warn!("[REVIEW] Snapshot FEN unreadable ({}), showing live status", err);
                    store.status()
                }
            },
            None => store.status(),
        }
    }
}
