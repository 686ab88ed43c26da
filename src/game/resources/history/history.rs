//! Position history resource
//!
//! Append-only log of board snapshots: one for the starting position and
//! one after every committed ply. Snapshot `i` is the position after move
//! `i - 1`; snapshot 0 is where the game began.
//!
//! # Architecture
//!
//! The history is written by exactly two callers:
//! - the game state store, which appends after each commit and rebuilds on reset
//! - the undo path, which trims the tail through the crate-private [`PositionHistory::truncate`]
//!
//! Review code only ever reads it. Outside of a commit, undo or reset in
//! progress, `history.len() == moves.len() + 1`.
//!
//! # Examples
//!
//! ```rust,ignore
//! let mut history = PositionHistory::new(rules.snapshot());
//! rules.play(request)?;
//! history.append(rules.snapshot());
//! assert_eq!(history.len(), 2);
//! ```

use crate::game::components::PositionSnapshot;

/// Snapshots of every position reached in the current game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionHistory {
    /// Never empty: index 0 is the starting position
    snapshots: Vec<PositionSnapshot>,
}

impl PositionHistory {
    /// Start a history at `initial`
    pub fn new(initial: PositionSnapshot) -> Self {
        Self {
            snapshots: vec![initial],
        }
    }

    /// Record the position after a committed ply
    pub fn append(&mut self, snapshot: PositionSnapshot) {
        self.snapshots.push(snapshot);
    }

    /// Snapshot by index; 0 is the starting position
    pub fn get(&self, index: usize) -> Option<&PositionSnapshot> {
        self.snapshots.get(index)
    }

    /// Number of snapshots, starting position included
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always `false`; the starting snapshot is never removed
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Most recent snapshot, matching the live position
    pub fn latest(&self) -> &PositionSnapshot {
        // new() seeds one snapshot and truncate() keeps at least one
        &self.snapshots[self.snapshots.len() - 1]
    }

    pub fn initial(&self) -> &PositionSnapshot {
        &self.snapshots[0]
    }

    /// Throw everything away and start again at `initial`
    pub fn reset(&mut self, initial: PositionSnapshot) {
        self.snapshots.clear();
        self.snapshots.push(initial);
    }

    /// Drop snapshots past `len`, keeping at least the starting one
    ///
    /// Only the undo path may shrink the history.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.snapshots.truncate(len.max(1));
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PositionSnapshot> {
        self.snapshots.iter()
    }
}
