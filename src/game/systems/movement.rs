//! Move coordinator
//!
//! Single path through which both human and computer moves are committed,
//! and through which undo takes them back. Both operations keep the store's
//! move list and position history in step, refresh the last-move marker,
//! drop the selection and queue the matching events.
//!
//! The coordinator does not decide whose turn it is; callers check the turn
//! phase before getting here.

use crate::game::components::{LastMove, MoveRecord, MoveRequest};
use crate::game::error::GameResult;
use crate::game::events::{GameEvent, GameEvents};
use crate::game::resources::{GameStateStore, MoveSound, Selection};
use tracing::{debug, info};

/// Mutable state a commit or undo touches
pub struct MoveContext<'a> {
    pub store: &'a mut GameStateStore,
    pub selection: &'a mut Selection,
    pub last_move: &'a mut Option<LastMove>,
    pub events: &'a mut GameEvents,
}

/// Commit `request` on the live position
///
/// `origin` only labels the log line (`"human"`, `"computer"`).
///
/// # Errors
/// Whatever the rules engine rejected; nothing is changed in that case.
pub fn execute_move(
    origin: &str,
    ctx: &mut MoveContext<'_>,
    request: MoveRequest,
) -> GameResult<MoveRecord> {
    let record = ctx.store.apply_move(request)?;
    let sound = MoveSound::classify(&record.flags);

    info!(
        "[MOVE] {} {} {} ({}) sound={:?}",
        origin,
        record.color.name(),
        record.san,
        record.coordinate_text(),
        sound
    );

    let marker = LastMove::from(&record);
    *ctx.last_move = Some(marker);
    clear_selection(ctx);
    ctx.events.push(GameEvent::LastMoveChanged(Some(marker)));
    ctx.events.push(GameEvent::MovePlayed {
        record: record.clone(),
        sound,
    });
    Ok(record)
}

/// Take back up to `count` plies, returning how many were removed
pub fn undo_moves(ctx: &mut MoveContext<'_>, count: usize) -> usize {
    let mut removed = 0;
    while removed < count && ctx.store.undo_last().is_some() {
        removed += 1;
    }
    if removed == 0 {
        debug!("[UNDO] Nothing to undo");
        return 0;
    }

    info!(
        "[UNDO] Took back {} ply, {} moves remain",
        removed,
        ctx.store.moves().len()
    );
    *ctx.last_move = ctx.store.last_move().map(LastMove::from);
    clear_selection(ctx);
    ctx.events.push(GameEvent::MovesUndone { count: removed });
    ctx.events.push(GameEvent::LastMoveChanged(*ctx.last_move));
    removed
}

fn clear_selection(ctx: &mut MoveContext<'_>) {
    ctx.selection.clear();
    ctx.events.push(GameEvent::SelectionCleared);
}
