//! Computer Opponent Integration Tests
//!
//! Tests for the turn coordination between the human, the canonical store
//! and an asynchronous search engine:
//! - Query launch and reply application
//! - Stale replies after reset and undo
//! - Undo pairs
//! - Engine failures and retry
//! - Difficulty changes

mod common;

use chess_sync::game::ai::{EngineError, EngineReply};
use chess_sync::game::components::PieceColor;
use chess_sync::game::resources::{ReviewCursor, TurnPhase};
use chess_sync::{ExportFormat, GameError, GameEvent};
use common::{computer_session, play, sq, ScriptedEngine, AFTER_E4_FEN, START_FEN};
use std::time::Duration;

// ============================================================================
// Query and Reply Tests
// ============================================================================

#[tokio::test]
async fn test_computer_answers_human_move() {
    let engine = ScriptedEngine::playing(&["e7e5"]);
    let (mut session, mut replies) = computer_session(engine.clone(), Duration::ZERO);
    assert_eq!(session.phase(), TurnPhase::HumanTurn);

    play(&mut session, &["e2e4"]);
    assert_eq!(session.phase(), TurnPhase::ComputerThinking);
    assert!(session
        .drain_events()
        .iter()
        .any(|event| matches!(event, GameEvent::ComputerThinking { .. })));
    assert!(
        session.attempt_move(sq("d2"), sq("d4")).is_none(),
        "human input blocked while thinking"
    );

    let reply = replies.recv().await.expect("engine answers");
    let record = session.apply_engine_reply(reply).expect("reply commits");

    assert_eq!(record.color, PieceColor::Black);
    assert_eq!((record.from, record.to), (sq("e7"), sq("e5")));
    assert_eq!(session.moves().len(), 2);
    assert_eq!(session.store().history().len(), 3);
    assert_eq!(session.phase(), TurnPhase::HumanTurn);
    assert_eq!(engine.queries(), vec![AFTER_E4_FEN.to_string()]);
    assert_eq!(engine.skill_levels(), vec![10]);
}

#[tokio::test]
async fn test_computer_reply_while_reviewing_keeps_cursor() {
    let engine = ScriptedEngine::playing(&["e7e5", "b8c6"]);
    let (mut session, mut replies) = computer_session(engine, Duration::ZERO);

    play(&mut session, &["e2e4"]);
    let reply = replies.recv().await.unwrap();
    session.apply_engine_reply(reply).unwrap();
    play(&mut session, &["g1f3"]);

    session.view_history_index(1).unwrap();
    let reply = replies.recv().await.unwrap();
    session.apply_engine_reply(reply).expect("committed while reviewing");

    assert_eq!(session.review_cursor(), ReviewCursor::Reviewing(1));
    assert_eq!(session.moves().len(), 4);
    assert_eq!(session.displayed_status().side_to_move, PieceColor::Black);
}

#[tokio::test]
async fn test_no_query_when_game_is_over() {
    let engine = ScriptedEngine::playing(&[]);
    let (mut session, _replies) = computer_session(engine.clone(), Duration::ZERO);

    session
        .new_game_from_fen(Some("7k/5Q2/6K1/8/8/8/8/8 w - - 0 1"))
        .unwrap();
    play(&mut session, &["f7g7"]);

    assert!(session.status().is_checkmate);
    assert_eq!(session.phase(), TurnPhase::HumanTurn);
    assert!(!session.is_thinking());
    tokio::task::yield_now().await;
    assert!(engine.queries().is_empty());
}

// ============================================================================
// Stale Reply Tests
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_reset_while_thinking_discards_reply() {
    let engine = ScriptedEngine::playing(&["e7e5"]);
    let (mut session, mut replies) = computer_session(engine.clone(), Duration::from_millis(500));

    play(&mut session, &["e2e4"]);
    assert!(session.is_thinking());
    let ticket = session.computer().pending_ticket().expect("query pending");

    session.request_reset().unwrap();
    assert!(!session.is_thinking());
    assert_eq!(session.phase(), TurnPhase::HumanTurn);

    let stale = EngineReply {
        ticket,
        best_move: Ok(Some("e7e5".to_string())),
    };
    assert!(session.apply_engine_reply(stale).is_none());
    assert!(session.moves().is_empty());
    assert_eq!(session.store().fen(), START_FEN);

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(replies.try_recv().is_err(), "aborted query never answers");
    assert!(engine.queries().is_empty());
}

#[tokio::test]
async fn test_undo_while_thinking_takes_back_one_and_discards_reply() {
    let engine = ScriptedEngine::playing(&["e7e5"]);
    let (mut session, mut replies) = computer_session(engine, Duration::ZERO);

    play(&mut session, &["e2e4"]);
    let ticket = session.computer().pending_ticket().expect("query pending");

    assert_eq!(session.request_undo(), 1);
    assert!(session.moves().is_empty());
    assert_eq!(session.phase(), TurnPhase::HumanTurn);

    let late = match replies.try_recv() {
        Ok(reply) => reply,
        Err(_) => EngineReply {
            ticket,
            best_move: Ok(Some("e7e5".to_string())),
        },
    };
    assert!(session.apply_engine_reply(late).is_none());
    assert!(session.moves().is_empty());
}

// ============================================================================
// Undo Pair Tests
// ============================================================================

#[tokio::test]
async fn test_undo_with_computer_takes_back_pair() {
    let engine = ScriptedEngine::playing(&["e7e5"]);
    let (mut session, mut replies) = computer_session(engine, Duration::ZERO);

    play(&mut session, &["e2e4"]);
    let reply = replies.recv().await.unwrap();
    session.apply_engine_reply(reply).unwrap();

    assert_eq!(session.request_undo(), 2);
    assert!(session.moves().is_empty());
    assert_eq!(session.store().history().len(), 1);
    assert_eq!(session.store().turn(), PieceColor::White);
    assert_eq!(session.phase(), TurnPhase::HumanTurn);
    assert!(session.last_move().is_none());
}

// ============================================================================
// Engine Failure Tests
// ============================================================================

#[tokio::test]
async fn test_undecodable_reply_reports_and_retry_recovers() {
    let engine = ScriptedEngine::playing(&["zz99"]);
    let (mut session, mut replies) = computer_session(engine.clone(), Duration::ZERO);

    play(&mut session, &["e2e4"]);
    session.drain_events();
    let reply = replies.recv().await.unwrap();
    assert!(session.apply_engine_reply(reply).is_none());

    assert_eq!(session.moves().len(), 1);
    assert!(!session.is_thinking());
    assert_eq!(session.phase(), TurnPhase::ComputerTurn);
    assert!(session
        .drain_events()
        .iter()
        .any(|event| matches!(event, GameEvent::ComputerCouldNotMove { .. })));

    engine.push(Ok(Some("c7c5".to_string())));
    assert!(session.retry_computer());
    let reply = replies.recv().await.unwrap();
    let record = session.apply_engine_reply(reply).expect("retry answers");
    assert_eq!(record.san, "c5");
    assert_eq!(session.phase(), TurnPhase::HumanTurn);
    assert!(!session.retry_computer(), "nothing to retry");
}

#[tokio::test]
async fn test_engine_without_move_or_with_error() {
    let engine = ScriptedEngine::answering(vec![
        Ok(None),
        Err(EngineError::Failed("engine exited".to_string())),
    ]);
    let (mut session, mut replies) = computer_session(engine, Duration::ZERO);

    play(&mut session, &["e2e4"]);
    let reply = replies.recv().await.unwrap();
    assert!(session.apply_engine_reply(reply).is_none());
    assert_eq!(session.phase(), TurnPhase::ComputerTurn);

    assert!(session.retry_computer());
    let reply = replies.recv().await.unwrap();
    assert!(session.apply_engine_reply(reply).is_none());
    assert_eq!(session.moves().len(), 1);
    assert!(!session.is_thinking());
}

#[tokio::test]
async fn test_illegal_engine_move_is_not_committed() {
    let engine = ScriptedEngine::playing(&["e7e4"]);
    let (mut session, mut replies) = computer_session(engine, Duration::ZERO);

    play(&mut session, &["e2e4"]);
    session.drain_events();
    let reply = replies.recv().await.unwrap();
    assert!(session.apply_engine_reply(reply).is_none());

    assert_eq!(session.moves().len(), 1);
    assert_eq!(session.phase(), TurnPhase::ComputerTurn);
    assert!(session
        .drain_events()
        .iter()
        .any(|event| matches!(event, GameEvent::ComputerCouldNotMove { .. })));
}

#[tokio::test]
async fn test_human_cannot_move_for_computer_after_failure() {
    let engine = ScriptedEngine::playing(&["zz99"]);
    let (mut session, mut replies) = computer_session(engine, Duration::ZERO);

    play(&mut session, &["e2e4"]);
    let reply = replies.recv().await.unwrap();
    session.apply_engine_reply(reply);

    let err = session
        .try_move(chess_sync::game::components::MoveRequest::new(sq("e7"), sq("e5")))
        .unwrap_err();
    assert_eq!(
        err,
        GameError::NotYourTurn {
            color: PieceColor::Black
        }
    );
}

// ============================================================================
// Settings Tests
// ============================================================================

#[tokio::test]
async fn test_difficulty_change_waits_for_next_game() {
    let engine = ScriptedEngine::playing(&["e7e5", "e7e5"]);
    let (mut session, mut replies) = computer_session(engine.clone(), Duration::ZERO);

    play(&mut session, &["e2e4"]);
    let reply = replies.recv().await.unwrap();
    session.apply_engine_reply(reply).unwrap();

    let requested = session.set_difficulty(99);
    assert_eq!(requested.level(), 20, "clamped");
    assert_eq!(session.computer().difficulty().level(), 10);
    assert_eq!(
        session.computer().config().pending_difficulty().map(|d| d.level()),
        Some(20)
    );

    session.request_reset().unwrap();
    assert_eq!(session.computer().difficulty().level(), 20);

    play(&mut session, &["e2e4"]);
    let reply = replies.recv().await.unwrap();
    session.apply_engine_reply(reply).unwrap();
    assert_eq!(engine.skill_levels(), vec![10, 20]);
}

#[tokio::test]
async fn test_difficulty_before_first_move_applies_at_once() {
    let engine = ScriptedEngine::playing(&[]);
    let (mut session, _replies) = computer_session(engine, Duration::ZERO);

    assert_eq!(session.set_difficulty(0).level(), 1);
    assert_eq!(session.computer().difficulty().level(), 1);
    assert!(session.computer().config().pending_difficulty().is_none());
}

#[tokio::test]
async fn test_toggle_computer_starts_new_game() {
    let engine = ScriptedEngine::playing(&[]);
    let (mut session, _replies) = computer_session(engine, Duration::ZERO);
    play(&mut session, &["e2e4"]);

    assert!(!session.toggle_computer().unwrap());
    assert!(session.moves().is_empty());
    assert!(!session.is_thinking());

    play(&mut session, &["e2e4", "e7e5"]);
    let pgn = session.export_as_text(ExportFormat::Pgn);
    assert!(pgn.contains("[Black \"Player\"]"));

    assert!(session.toggle_computer().unwrap());
    let pgn = session.export_as_text(ExportFormat::Pgn);
    assert!(pgn.contains("[Black \"Computer (level 10)\"]"));
}
