//! Post-change notifications for the front end
//!
//! The game layer never plays sounds or repaints anything itself. It queues
//! [`GameEvent`]s and the front end drains them after each intent.

use crate::game::ai::EngineTicket;
use crate::game::components::{LastMove, MoveRecord};
use crate::game::resources::{MoveSound, ReviewCursor};
use std::collections::VecDeque;
use uuid::Uuid;

/// Something the front end may want to react to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A move was committed; `sound` is its classified cue
    MovePlayed { record: MoveRecord, sound: MoveSound },
    /// Highlight marker moved (or cleared after undoing every move)
    LastMoveChanged(Option<LastMove>),
    /// Selection and legal-target highlights were dropped
    SelectionCleared,
    /// The board now shows a different position
    ReviewChanged(ReviewCursor),
    /// Plies taken back by one undo request
    MovesUndone { count: usize },
    /// A computer query was launched
    ComputerThinking { ticket: EngineTicket },
    /// The computer was due to move but no move was applied
    ComputerCouldNotMove { reason: String },
    /// A new game started
    GameReset { game_id: Uuid },
}

/// FIFO of pending events
#[derive(Debug, Default)]
pub struct GameEvents {
    queue: VecDeque<GameEvent>,
}

impl GameEvents {
    pub fn push(&mut self, event: GameEvent) {
        self.queue.push_back(event);
    }

    /// Take every queued event, oldest first
    pub fn drain(&mut self) -> Vec<GameEvent> {
        self.queue.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_preserves_order_and_empties() {
        let mut events = GameEvents::default();
        events.push(GameEvent::SelectionCleared);
        events.push(GameEvent::MovesUndone { count: 2 });

        assert_eq!(
            events.drain(),
            vec![
                GameEvent::SelectionCleared,
                GameEvent::MovesUndone { count: 2 }
            ]
        );
        assert!(events.is_empty());
    }
}
