//! Turn state management for the computer opponent
//!
//! Tracks whether the human may act, whether the computer is due to move,
//! and whether a search is in flight. The phase is only ever changed by the
//! computer player controller in response to canonical-state changes, engine
//! replies and cancellations.

use crate::game::error::{GameError, GameResult};
use tracing::error;

/// Turn coordination phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TurnPhase {
    /// The human may move (also the only phase when the computer is off)
    ///
    /// Valid transitions: -> ComputerTurn
    #[default]
    HumanTurn,

    /// The computer is to move but no search is running
    ///
    /// Entered on the way to a query, and left standing after an engine
    /// failure until the position changes or a retry is requested.
    /// Valid transitions: -> ComputerThinking, -> HumanTurn
    ComputerTurn,

    /// A search for the current position is in flight
    ///
    /// Valid transitions: -> HumanTurn (reply committed or cancelled),
    /// -> ComputerTurn (engine failure)
    ComputerThinking,
}

impl TurnPhase {
    /// Check if this phase allows human moves
    pub fn accepts_input(&self) -> bool {
        matches!(self, TurnPhase::HumanTurn)
    }

    pub fn is_computer_thinking(&self) -> bool {
        matches!(self, TurnPhase::ComputerThinking)
    }
}

/// Validated holder of the current [`TurnPhase`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnStateContext {
    phase: TurnPhase,
}

impl TurnStateContext {
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Move to `next`, rejecting jumps the phase machine does not allow
    ///
    /// # Errors
    /// `InvalidStateTransition` when the transition is not allowed; the
    /// phase is left unchanged and the error is logged.
    pub fn transition_to(&mut self, next: TurnPhase) -> GameResult<()> {
        let valid = match (self.phase, next) {
            (current, next) if current == next => true,
            (TurnPhase::HumanTurn, TurnPhase::ComputerTurn) => true,
            (TurnPhase::ComputerTurn, TurnPhase::ComputerThinking) => true,
            (TurnPhase::ComputerTurn, TurnPhase::HumanTurn) => true,
            (TurnPhase::ComputerThinking, TurnPhase::HumanTurn) => true,
            (TurnPhase::ComputerThinking, TurnPhase::ComputerTurn) => true,
            // A search must be launched from ComputerTurn
            (TurnPhase::HumanTurn, TurnPhase::ComputerThinking) => false,
            _ => false,
        };

        if !valid {
            error!(
                "[TURN_STATE] Invalid turn state transition: {:?} -> {:?}",
                self.phase, next
            );
            return Err(GameError::InvalidStateTransition {
                message: format!("{:?} -> {:?}", self.phase, next),
            });
        }

        self.phase = next;
        Ok(())
    }

    /// Return to `HumanTurn` unconditionally (reset, toggle, undo)
    pub fn reset(&mut self) {
        self.phase = TurnPhase::HumanTurn;
    }
}
