//! Computer player controller
//!
//! Decides when the computer should move, launches one engine query at a
//! time as a tokio task, and screens the replies that come back.
//!
//! # Flow
//!
//! 1. After every canonical change the session calls
//!    [`ComputerPlayer::on_canonical_changed`]. Any query still in flight is
//!    cancelled because the position it was computed for is gone.
//! 2. If the computer is enabled, the game is not over and black is to move,
//!    the phase goes `HumanTurn -> ComputerTurn -> ComputerThinking` and a
//!    task is spawned: think delay, skill level, search.
//! 3. The task sends an [`EngineReply`] through the reply channel. The event
//!    loop hands it back to the session, which calls
//!    [`ComputerPlayer::accept_reply`] to validate the ticket and decode the
//!    move before committing it.
//!
//! Replies whose ticket does not match the in-flight query, or whose
//! generation is no longer current, are stale and never touch the game.

use super::engine::{run_query, EngineError, EngineReply, EngineTicket, SearchEngine};
use super::resource::{ComputerConfig, Difficulty};
use crate::game::components::MoveRequest;
use crate::game::error::{GameError, GameResult};
use crate::game::resources::{GameStateStore, TurnPhase, TurnStateContext};
use crate::game::rules::decode_coordinate_move;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Query currently in flight
#[derive(Debug)]
struct PendingQuery {
    ticket: EngineTicket,
    handle: JoinHandle<()>,
}

/// Computer opponent controller
pub struct ComputerPlayer {
    config: ComputerConfig,
    turn: TurnStateContext,
    engine: Option<Arc<dyn SearchEngine>>,
    replies: UnboundedSender<EngineReply>,
    pending: Option<PendingQuery>,
}

impl ComputerPlayer {
    /// Controller that sends engine replies to `replies`
    ///
    /// Without an engine every computer turn reports "could not move".
    pub fn new(
        config: ComputerConfig,
        engine: Option<Arc<dyn SearchEngine>>,
        replies: UnboundedSender<EngineReply>,
    ) -> Self {
        Self {
            config,
            turn: TurnStateContext::default(),
            engine,
            replies,
            pending: None,
        }
    }

    pub fn config(&self) -> &ComputerConfig {
        &self.config
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn difficulty(&self) -> Difficulty {
        self.config.difficulty()
    }

    pub fn phase(&self) -> TurnPhase {
        self.turn.phase()
    }

    pub fn is_thinking(&self) -> bool {
        self.turn.phase().is_computer_thinking()
    }

    /// Ticket of the query in flight
    pub fn pending_ticket(&self) -> Option<EngineTicket> {
        self.pending.as_ref().map(|pending| pending.ticket)
    }

    /// Whether the human may move right now
    pub fn accepts_human_move(&self) -> bool {
        self.turn.phase().accepts_input()
    }

    /// Flip `enabled`; the caller resets the game afterwards
    pub fn set_enabled(&mut self, enabled: bool) {
        self.cancel("computer toggled");
        self.turn.reset();
        self.config.enabled = enabled;
        info!(
            "[AI] Computer opponent {}",
            if enabled { "enabled" } else { "disabled" }
        );
    }

    /// Request a new difficulty; parked until reset once moves exist
    pub fn set_difficulty(&mut self, level: i64, game_started: bool) -> Difficulty {
        self.config.request_difficulty(level, game_started)
    }

    /// Prepare for a fresh game: drop any query and promote a parked difficulty
    pub fn on_reset(&mut self) {
        self.cancel("game reset");
        self.turn.reset();
        self.config.apply_pending();
    }

    /// Plies one undo request should take back
    ///
    /// With the computer playing: the pair (computer reply + the human move
    /// before it) when it is the human's turn and at least two moves exist,
    /// otherwise just the last ply, which covers taking back a human move the
    /// computer is still thinking about.
    pub fn undo_ply_count(&self, store: &GameStateStore) -> usize {
        let moves = store.moves().len();
        if moves == 0 {
            return 0;
        }
        if self.config.enabled
            && !self.is_thinking()
            && store.turn() != self.config.computer_color()
            && moves >= 2
        {
            2
        } else {
            1
        }
    }

    /// Abort the query in flight, if any
    pub fn cancel(&mut self, reason: &str) -> bool {
        match self.pending.take() {
            Some(pending) => {
                pending.handle.abort();
                info!(
                    "[AI] Cancelled query for generation {} ({})",
                    pending.ticket.generation, reason
                );
                true
            }
            None => false,
        }
    }

    /// Re-evaluate the turn after the canonical state changed
    ///
    /// Returns the ticket of a newly launched query, or an error when the
    /// computer is due to move but no query could be launched.
    pub fn on_canonical_changed(
        &mut self,
        store: &GameStateStore,
    ) -> Result<Option<EngineTicket>, EngineError> {
        self.cancel("position changed");

        let status = store.status();
        if !self.config.enabled
            || status.is_game_over
            || status.side_to_move != self.config.computer_color()
        {
            self.turn.reset();
            return Ok(None);
        }

        // also leaves ComputerThinking when the previous query was just cancelled
        let _ = self.turn.transition_to(TurnPhase::ComputerTurn);
        self.launch(store).map(Some)
    }

    /// Launch a new query after an engine failure
    ///
    /// Only valid while the computer is due to move and idle.
    pub fn retry(&mut self, store: &GameStateStore) -> Result<Option<EngineTicket>, EngineError> {
        if self.turn.phase() != TurnPhase::ComputerTurn {
            debug!("[AI] Retry ignored in phase {:?}", self.turn.phase());
            return Ok(None);
        }
        if store.status().is_game_over {
            return Ok(None);
        }
        info!("[AI] Retrying computer move");
        self.launch(store).map(Some)
    }

    fn launch(&mut self, store: &GameStateStore) -> Result<EngineTicket, EngineError> {
        let Some(engine) = self.engine.as_ref().map(Arc::clone) else {
            warn!("[AI] Computer to move but no search engine is configured");
            return Err(EngineError::Unavailable(
                "no search engine configured".to_string(),
            ));
        };

        let ticket = EngineTicket {
            generation: store.generation(),
            ply: store.moves().len(),
        };
        let fen = store.fen();
        let skill_level = self.config.difficulty().skill_level();
        let think_delay = self.config.think_delay;
        let replies = self.replies.clone();

        info!(
            "[AI] Thinking (difficulty {}, delay {}ms) on {}",
            self.config.difficulty(),
            think_delay.as_millis(),
            fen
        );

        let handle = tokio::spawn(async move {
            let best_move = run_query(engine.as_ref(), &fen, skill_level, think_delay).await;
            // a closed channel means the session is shutting down
            let _ = replies.send(EngineReply { ticket, best_move });
        });

        self.pending = Some(PendingQuery { ticket, handle });
        self.turn.transition_to(TurnPhase::ComputerThinking).map_err(|err| {
            EngineError::Failed(err.to_string())
        })?;
        Ok(ticket)
    }

    /// Screen an engine reply and decode it into a move request
    ///
    /// # Errors
    /// - `StaleEngineResponse` if the reply is not for the current query;
    ///   nothing changes.
    /// - `EngineDecodeFailure` if the engine failed, found no move or sent
    ///   unreadable text; the phase falls back to `ComputerTurn`.
    pub fn accept_reply(
        &mut self,
        reply: EngineReply,
        store: &GameStateStore,
    ) -> GameResult<MoveRequest> {
        let current = self
            .pending
            .as_ref()
            .is_some_and(|pending| pending.ticket == reply.ticket)
            && reply.ticket.generation == store.generation();
        if !current {
            debug!(
                "[AI] Discarding stale reply for generation {} (now {})",
                reply.ticket.generation,
                store.generation()
            );
            return Err(GameError::StaleEngineResponse {
                generation: reply.ticket.generation,
            });
        }
        self.pending = None;

        let text = match reply.best_move {
            Ok(Some(text)) => text,
            Ok(None) => {
                self.mark_failed();
                return Err(GameError::EngineDecodeFailure { reply: None });
            }
            Err(err) => {
                warn!("[AI] {}", err);
                self.mark_failed();
                return Err(GameError::EngineDecodeFailure { reply: None });
            }
        };

        match decode_coordinate_move(&text) {
            Ok(decoded) => {
                let request = MoveRequest::new(decoded.from, decoded.to);
                Ok(match decoded.promotion {
                    Some(piece) => request.with_promotion(piece),
                    None => request,
                })
            }
            Err(err) => {
                self.mark_failed();
                Err(err)
            }
        }
    }

    /// The computer could not move: stop thinking but stay on its turn
    pub fn mark_failed(&mut self) {
        self.pending = None;
        if self.turn.phase() == TurnPhase::ComputerThinking {
            let _ = self.turn.transition_to(TurnPhase::ComputerTurn);
        }
        warn!("[AI] Computer could not move");
    }
}

impl std::fmt::Debug for ComputerPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComputerPlayer")
            .field("config", &self.config)
            .field("phase", &self.turn.phase())
            .field("has_engine", &self.engine.is_some())
            .field("pending", &self.pending_ticket())
            .finish()
    }
}
