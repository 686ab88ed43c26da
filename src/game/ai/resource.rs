//! Computer opponent configuration
//!
//! Holds whether the computer plays, how strong it plays and how long it
//! pauses before asking the engine. The computer always plays the second
//! side (black).
//!
//! # Difficulty Levels
//!
//! Difficulty is an integer from 1 to 20 handed to the engine as its skill
//! level before every search:
//!
//! Five levels carry a name; every other level is shown as a plain number:
//!
//! | Difficulty | Label    |
//! |------------|----------|
//! | 1          | Beginner |
//! | 5          | Easy     |
//! | 10         | Medium   |
//! | 15         | Hard     |
//! | 20         | Expert   |
//!
//! A change requested in the middle of a game is held back until the next
//! reset so that a single game is played at a single strength.

use crate::game::components::PieceColor;
use std::fmt;
use std::time::Duration;
use tracing::info;

/// Weakest difficulty
pub const MIN_DIFFICULTY: u8 = 1;
/// Strongest difficulty
pub const MAX_DIFFICULTY: u8 = 20;
/// Difficulty used when nothing else is configured
pub const DEFAULT_DIFFICULTY: u8 = 10;
/// Pause before each engine query
pub const DEFAULT_THINK_DELAY: Duration = Duration::from_millis(500);

/// Engine strength, always within `MIN_DIFFICULTY..=MAX_DIFFICULTY`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Difficulty(u8);

impl Default for Difficulty {
    fn default() -> Self {
        Self(DEFAULT_DIFFICULTY)
    }
}

impl Difficulty {
    /// Clamp any requested level into range
    pub fn new(level: i64) -> Self {
        Self(level.clamp(i64::from(MIN_DIFFICULTY), i64::from(MAX_DIFFICULTY)) as u8)
    }

    pub fn level(self) -> u8 {
        self.0
    }

    /// Skill level sent to the engine
    pub fn skill_level(self) -> u8 {
        self.0
    }

    pub fn label(self) -> Option<&'static str> {
        match self.0 {
            1 => Some("Beginner"),
            5 => Some("Easy"),
            10 => Some("Medium"),
            15 => Some("Hard"),
            20 => Some("Expert"),
            _ => None,
        }
    }
}

/// `10 (Medium)` for named levels, `7` otherwise
impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label() {
            Some(label) => write!(f, "{} ({})", self.0, label),
            None => write!(f, "{}", self.0),
        }
    }
}

/// Computer opponent settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputerConfig {
    pub enabled: bool,
    difficulty: Difficulty,
    /// Requested mid-game, applied on the next reset
    pending_difficulty: Option<Difficulty>,
    pub think_delay: Duration,
}

impl Default for ComputerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            difficulty: Difficulty::default(),
            pending_difficulty: None,
            think_delay: DEFAULT_THINK_DELAY,
        }
    }
}

impl ComputerConfig {
    pub fn new(enabled: bool, difficulty: Difficulty, think_delay: Duration) -> Self {
        Self {
            enabled,
            difficulty,
            pending_difficulty: None,
            think_delay,
        }
    }

    /// The side the computer plays
    pub fn computer_color(&self) -> PieceColor {
        PieceColor::Black
    }

    /// Difficulty in effect for the current game
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Difficulty that will apply from the next reset, if different
    pub fn pending_difficulty(&self) -> Option<Difficulty> {
        self.pending_difficulty
    }

    /// Request a new difficulty
    ///
    /// Applies at once when `game_started` is false, otherwise it is parked
    /// until [`ComputerConfig::apply_pending`].
    pub fn request_difficulty(&mut self, level: i64, game_started: bool) -> Difficulty {
        let requested = Difficulty::new(level);
        if !game_started {
            self.difficulty = requested;
            self.pending_difficulty = None;
            info!("[AI] Difficulty set to {}", requested);
        } else if requested == self.difficulty {
            self.pending_difficulty = None;
        } else {
            self.pending_difficulty = Some(requested);
            info!("[AI] Difficulty {} will apply from the next game", requested);
        }
        requested
    }

    /// Promote a parked difficulty; called when a new game starts
    pub fn apply_pending(&mut self) {
        if let Some(pending) = self.pending_difficulty.take() {
            self.difficulty = pending;
            info!("[AI] Difficulty now {}", pending);
        }
    }
}
