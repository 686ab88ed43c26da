//! Search engine seam
//!
//! The computer player talks to any move-search backend through
//! [`SearchEngine`]. The production backend is a Stockfish process
//! ([`stockfish_ai::UciEngine`]); tests plug in scripted engines.
//!
//! A query is launched against one canonical state, identified by an
//! [`EngineTicket`], and answered with an [`EngineReply`] carrying the same
//! ticket so that replies for abandoned positions can be recognised.

use async_trait::async_trait;
use std::time::Duration;
use stockfish_ai::{UciEngine, UciError};
use tracing::debug;

/// Errors reported by a search engine
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// No engine is configured or it could not be started
    #[error("Search engine unavailable: {0}")]
    Unavailable(String),

    /// The engine failed while answering a query
    #[error("Search engine failed: {0}")]
    Failed(String),
}

impl From<UciError> for EngineError {
    fn from(err: UciError) -> Self {
        match err {
            UciError::Spawn(_) => EngineError::Unavailable(err.to_string()),
            other => EngineError::Failed(other.to_string()),
        }
    }
}

/// Move-search backend
///
/// Exactly one answer per `find_best_move` call. `Ok(None)` means the
/// engine found no move.
#[async_trait]
pub trait SearchEngine: Send + Sync {
    /// Set the playing strength (difficulty level)
    async fn set_skill_level(&self, level: u8) -> Result<(), EngineError>;

    /// Best move in coordinate notation (`e7e5`, `a2a1q`) for `fen`
    async fn find_best_move(&self, fen: &str) -> Result<Option<String>, EngineError>;
}

#[async_trait]
impl SearchEngine for UciEngine {
    async fn set_skill_level(&self, level: u8) -> Result<(), EngineError> {
        UciEngine::set_skill_level(self, level)
            .await
            .map_err(EngineError::from)
    }

    async fn find_best_move(&self, fen: &str) -> Result<Option<String>, EngineError> {
        self.best_move(fen).await.map_err(EngineError::from)
    }
}

/// Identity of the canonical state a query was launched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EngineTicket {
    /// Store generation at launch
    pub generation: u64,
    /// Number of committed moves at launch
    pub ply: usize,
}

/// Answer to one engine query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineReply {
    pub ticket: EngineTicket,
    pub best_move: Result<Option<String>, EngineError>,
}

/// Body of one computer query: wait out the think delay, set the skill
/// level, then search
pub async fn run_query(
    engine: &dyn SearchEngine,
    fen: &str,
    skill_level: u8,
    think_delay: Duration,
) -> Result<Option<String>, EngineError> {
    if !think_delay.is_zero() {
        tokio::time::sleep(think_delay).await;
    }
    engine.set_skill_level(skill_level).await?;
    debug!("[AI] Querying engine (skill {}) for {}", skill_level, fen);
    engine.find_best_move(fen).await
}
