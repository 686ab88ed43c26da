//! Move sound classification
//!
//! Every committed move produces exactly one sound cue. The cue is a pure
//! function of the move's flags, checked in priority order: capture, then
//! castle, then promotion, otherwise a regular move. Playback is left to the
//! front end; this module only names the cue and its asset.

use crate::game::components::MoveFlags;
use serde::{Deserialize, Serialize};

/// Sound cue emitted after a committed move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveSound {
    Capture,
    Castle,
    Promote,
    Move,
}

impl MoveSound {
    /// Classify a move; a promotion that also captures is a capture
    ///
    /// En passant sets `capture`, so it plays the capture sound rather than the plain move sound.
    pub fn classify(flags: &MoveFlags) -> Self {
        if flags.capture {
            MoveSound::Capture
        } else if flags.is_castle() {
            MoveSound::Castle
        } else if flags.promotion {
            MoveSound::Promote
        } else {
            MoveSound::Move
        }
    }

    /// Asset path relative to the sound directory root
    pub fn asset_path(self) -> &'static str {
        match self {
            MoveSound::Capture => "sounds/capture.mp3",
            MoveSound::Castle => "sounds/castle.mp3",
            MoveSound::Promote => "sounds/promote.mp3",
            MoveSound::Move => "sounds/move.mp3",
        }
    }
}
