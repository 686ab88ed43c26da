//! Shared helpers for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use chess_sync::game::ai::{ComputerConfig, Difficulty, EngineError, EngineReply, SearchEngine};
use chess_sync::game::rules::Square;
use chess_sync::GameSession;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
pub const AFTER_E4_FEN: &str = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1";

/// Search engine answering from a script, recording what it was asked
#[derive(Default)]
pub struct ScriptedEngine {
    replies: Mutex<VecDeque<Result<Option<String>, EngineError>>>,
    queries: Mutex<Vec<String>>,
    skill_levels: Mutex<Vec<u8>>,
}

impl ScriptedEngine {
    /// Engine that plays `moves` in order, then reports no move
    pub fn playing(moves: &[&str]) -> Arc<Self> {
        Self::answering(moves.iter().map(|m| Ok(Some(m.to_string()))).collect())
    }

    pub fn answering(replies: Vec<Result<Option<String>, EngineError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            ..Self::default()
        })
    }

    pub fn push(&self, reply: Result<Option<String>, EngineError>) {
        self.replies.lock().push_back(reply);
    }

    /// FENs the engine was asked to search
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().clone()
    }

    pub fn skill_levels(&self) -> Vec<u8> {
        self.skill_levels.lock().clone()
    }
}

#[async_trait]
impl SearchEngine for ScriptedEngine {
    async fn set_skill_level(&self, level: u8) -> Result<(), EngineError> {
        self.skill_levels.lock().push(level);
        Ok(())
    }

    async fn find_best_move(&self, fen: &str) -> Result<Option<String>, EngineError> {
        self.queries.lock().push(fen.to_string());
        self.replies.lock().pop_front().unwrap_or(Ok(None))
    }
}

pub fn sq(text: &str) -> Square {
    text.parse().expect("valid square")
}

/// Two-human session from the standard start
pub fn human_session() -> GameSession {
    let (session, _replies) =
        GameSession::new(None, ComputerConfig::default(), None).expect("standard start");
    session
}

/// Session against `engine` at difficulty 10 with the given think delay
pub fn computer_session(
    engine: Arc<ScriptedEngine>,
    think_delay: Duration,
) -> (GameSession, UnboundedReceiver<EngineReply>) {
    let config = ComputerConfig::new(true, Difficulty::new(10), think_delay);
    let engine: Arc<dyn SearchEngine> = engine;
    GameSession::new(None, config, Some(engine)).expect("standard start")
}

/// Play a sequence of coordinate moves, panicking on the first rejection
pub fn play(session: &mut GameSession, moves: &[&str]) {
    for text in moves {
        let (from, to) = (sq(&text[0..2]), sq(&text[2..4]));
        session
            .attempt_move(from, to)
            .unwrap_or_else(|| panic!("move {text} rejected"));
    }
}
