//! Engine handle and blocking-pool dispatch

use crate::error::{UciError, UciResult};
use parking_lot::Mutex;
use std::sync::Arc;
use stockfish::Stockfish;
use tracing::{debug, info, warn};

/// Highest value Stockfish accepts for its `Skill Level` option
pub const MAX_SKILL_LEVEL: u8 = 20;

/// Search limits applied to every query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UciOptions {
    /// Search depth in plies
    pub depth: u32,
}

impl Default for UciOptions {
    fn default() -> Self {
        Self { depth: 12 }
    }
}

/// Clamp a requested level into the engine's accepted range
pub fn clamp_skill_level(level: u8) -> u8 {
    level.min(MAX_SKILL_LEVEL)
}

/// Engine answer text to a coordinate move, `None` when there is no move
fn best_move_text(raw: &str) -> Option<String> {
    match raw.trim() {
        "" | "(none)" | "0000" => None,
        text => Some(text.to_string()),
    }
}

/// Handle to a running Stockfish process
///
/// Requests are serialised through a mutex held on the blocking pool, so the
/// handle can be shared behind an `Arc`. A request whose caller was aborted
/// still runs to completion there; its answer is simply dropped.
pub struct UciEngine {
    name: String,
    options: UciOptions,
    inner: Arc<Mutex<Stockfish>>,
}

impl UciEngine {
    /// Start `program` and prepare it for a new game
    pub async fn spawn(program: &str, options: UciOptions) -> UciResult<Self> {
        let path = program.to_string();
        let stockfish = tokio::task::spawn_blocking(move || -> UciResult<Stockfish> {
            let mut stockfish = Stockfish::new(&path).map_err(UciError::Spawn)?;
            stockfish.set_depth(options.depth);
            stockfish.setup_for_new_game()?;
            Ok(stockfish)
        })
        .await??;

        info!("[UCI] Engine ready: {} (depth {})", program, options.depth);

        Ok(Self {
            name: program.to_string(),
            options,
            inner: Arc::new(Mutex::new(stockfish)),
        })
    }

    /// Program the engine was started from
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> UciOptions {
        self.options
    }

    /// Run `request` against the engine on the blocking pool
    async fn with_engine<T, F>(&self, request: F) -> UciResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Stockfish) -> std::io::Result<T> + Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        let value = tokio::task::spawn_blocking(move || {
            let mut stockfish = inner.lock();
            request(&mut stockfish)
        })
        .await??;
        Ok(value)
    }

    /// Set Stockfish's `Skill Level` option (clamped to 0..=20)
    pub async fn set_skill_level(&self, level: u8) -> UciResult<()> {
        let level = clamp_skill_level(level);
        self.with_engine(move |stockfish| stockfish.set_skill_level(u32::from(level)))
            .await?;
        debug!("[UCI] Skill Level set to {}", level);
        Ok(())
    }

    /// Ask for the best move in `fen`
    ///
    /// Returns `Ok(None)` when the engine has no move to offer.
    pub async fn best_move(&self, fen: &str) -> UciResult<Option<String>> {
        let position = fen.to_string();
        let raw = self
            .with_engine(move |stockfish| {
                stockfish.set_fen_position(&position)?;
                let output = stockfish.go()?;
                Ok(output.best_move().to_string())
            })
            .await?;

        let best = best_move_text(&raw);
        if best.is_none() {
            warn!("[UCI] Engine found no move for {}", fen);
        }
        Ok(best)
    }

    /// Ask the engine process to exit
    pub async fn shutdown(&self) -> UciResult<()> {
        self.with_engine(|stockfish| stockfish.quit()).await?;
        debug!("[UCI] Engine {} shut down", self.name);
        Ok(())
    }
}

impl std::fmt::Debug for UciEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UciEngine")
            .field("name", &self.name)
            .field("options", &self.options)
            .finish()
    }
}
