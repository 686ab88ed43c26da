//! Application settings
//!
//! Read from `settings.json` at startup and then overridden by command-line
//! flags. Every field has a default so a partial file is accepted.

use crate::game::ai::{ComputerConfig, Difficulty};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use stockfish_ai::UciOptions;

/// User preferences for a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Whether black is played by the computer
    pub computer_enabled: bool,

    /// Computer strength, 1 to 20 (out-of-range values are clamped)
    pub difficulty: u8,

    /// Pause before the computer starts searching
    pub think_delay_ms: u64,

    /// Whether to highlight last move
    pub highlight_last_move: bool,

    /// `tracing` filter used when `RUST_LOG` is not set
    pub log_filter: String,

    /// Search engine process
    pub engine: EngineSettings,

    /// Custom starting position; standard start when absent
    pub start_fen: Option<String>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            computer_enabled: false,
            difficulty: 10,
            think_delay_ms: 500,
            highlight_last_move: true,
            log_filter: "info".to_string(),
            engine: EngineSettings::default(),
            start_fen: None,
        }
    }
}

impl GameSettings {
    /// Computer opponent configuration for a new session
    pub fn computer_config(&self) -> ComputerConfig {
        ComputerConfig::new(
            self.computer_enabled,
            Difficulty::new(i64::from(self.difficulty)),
            Duration::from_millis(self.think_delay_ms),
        )
    }
}

/// UCI engine process settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Program to run (looked up on `PATH` when not absolute)
    pub path: String,

    /// Search depth per move, in plies
    pub depth: u32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            path: "stockfish".to_string(),
            depth: UciOptions::default().depth,
        }
    }
}

impl EngineSettings {
    pub fn uci_options(&self) -> UciOptions {
        UciOptions { depth: self.depth }
    }
}
