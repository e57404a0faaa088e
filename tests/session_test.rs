//! Tests for the game session state machine.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use strictly_tictactoe::{
    GameMode, GameSession, GameStatus, InvalidMove, MemoryStore, MoveSelector, Player, Position,
    ScoreTally, SessionView,
};

type Session = GameSession<MemoryStore, ChaCha8Rng>;

fn session_with(store: MemoryStore, mode: GameMode) -> Session {
    GameSession::new(store, MoveSelector::new(ChaCha8Rng::seed_from_u64(11))).with_mode(mode)
}

fn session(mode: GameMode) -> Session {
    session_with(MemoryStore::new(), mode)
}

#[test]
fn test_pvp_turns_alternate() {
    let mut s = session(GameMode::PlayerVsPlayer);
    let mut expected = Player::X;
    for index in [4, 0, 8, 2] {
        let outcome = s.request_move(index).unwrap();
        assert_eq!(*outcome.player(), expected);
        assert!(!*outcome.ai_scheduled());
        expected = expected.opponent();
        assert_eq!(s.current_player(), expected);
    }
}

#[test]
fn test_win_ends_game_and_records_score() {
    let mut s = session(GameMode::PlayerVsPlayer);
    for index in [0, 3, 1, 4] {
        s.request_move(index).unwrap();
    }
    let outcome = s.request_move(2).unwrap();
    assert_eq!(*outcome.status(), GameStatus::Won(Player::X));
    assert!(!s.is_active());
    assert_eq!(*s.scores(), ScoreTally::new(1, 0, 0));
    assert_eq!(s.analytics().history().len(), 1);
    assert_eq!(s.analytics().history()[0].moves(), &vec![0, 3, 1, 4, 2]);

    // Terminal: further moves bounce off.
    assert_eq!(s.request_move(8), Err(InvalidMove::GameOver));
    assert_eq!(s.history().len(), 5);
}

#[test]
fn test_draw_recorded() {
    let mut s = session(GameMode::PlayerVsPlayer);
    for index in [0, 1, 2, 4, 3, 5, 7, 6, 8] {
        s.request_move(index).unwrap();
    }
    assert_eq!(s.status(), GameStatus::Draw);
    assert_eq!(*s.scores(), ScoreTally::new(0, 0, 1));
}

#[test]
fn test_reset_from_terminal_is_idempotent() {
    let mut s = session(GameMode::PlayerVsPlayer);
    for index in [0, 3, 1, 4, 2] {
        s.request_move(index).unwrap();
    }
    s.reset();
    let after_once = (s.board().clone(), s.current_player(), s.status());
    s.reset();
    assert_eq!((s.board().clone(), s.current_player(), s.status()), after_once);
    assert_eq!(after_once.1, Player::X);
    assert_eq!(after_once.2, GameStatus::InProgress);
    assert!(s.board().empty_positions().len() == 9);
    // Scores survive a reset.
    assert_eq!(*s.scores(), ScoreTally::new(1, 0, 0));
}

#[test]
fn test_set_mode_resets_board() {
    let mut s = session(GameMode::PlayerVsPlayer);
    s.request_move(4).unwrap();
    s.set_mode(GameMode::PlayerVsAi);
    assert_eq!(s.mode(), GameMode::PlayerVsAi);
    assert!(s.history().is_empty());
    assert_eq!(s.current_player(), Player::X);
}

#[test]
fn test_ai_turn_locks_human_input() {
    let mut s = session(GameMode::PlayerVsAi);
    let outcome = s.request_move(0).unwrap();
    assert!(*outcome.ai_scheduled());
    assert!(s.is_awaiting_ai());

    let before = s.board().clone();
    assert_eq!(s.request_move(5), Err(InvalidMove::AwaitingAi));
    assert_eq!(s.board(), &before);

    let reply = s.resolve_ai_turn().unwrap();
    assert_eq!(*reply.player(), Player::O);
    assert_eq!(*reply.position(), Position::Center);
    assert!(!s.is_awaiting_ai());
    assert_eq!(s.current_player(), Player::X);

    // Exactly one AI move per scheduling.
    assert_eq!(s.resolve_ai_turn(), Err(InvalidMove::NoAiTurnPending));
}

#[test]
fn test_ai_blocks_human_threat() {
    let mut s = session(GameMode::PlayerVsAi);
    s.request_move(0).unwrap();
    s.resolve_ai_turn().unwrap(); // center
    s.request_move(1).unwrap(); // X threatens 2
    let reply = s.resolve_ai_turn().unwrap();
    assert_eq!(*reply.position(), Position::TopRight);
}

#[test]
fn test_ai_win_updates_o_score() {
    let mut s = session(GameMode::PlayerVsAi);
    // X wanders; O takes center, blocks, then completes a line.
    s.request_move(0).unwrap();
    s.resolve_ai_turn().unwrap(); // O: 4
    s.request_move(8).unwrap();
    s.resolve_ai_turn().unwrap(); // O: corner 2 or 6
    let o_corner = *s.history().last().unwrap();
    // X must now block the anti-diagonal, but plays elsewhere instead.
    let elsewhere = if o_corner == Position::TopRight { 1 } else { 3 };
    s.request_move(elsewhere).unwrap();
    let reply = s.resolve_ai_turn().unwrap();
    assert_eq!(*reply.status(), GameStatus::Won(Player::O));
    assert_eq!(*s.scores(), ScoreTally::new(0, 1, 0));
}

#[test]
fn test_reset_cancels_pending_ai_turn() {
    let mut s = session(GameMode::PlayerVsAi);
    s.request_move(0).unwrap();
    s.reset();
    assert!(!s.is_awaiting_ai());
    assert_eq!(s.resolve_ai_turn(), Err(InvalidMove::NoAiTurnPending));
    assert!(s.history().is_empty());
}

#[test]
fn test_view_highlights_winning_line() {
    let mut s = session(GameMode::PlayerVsPlayer);
    for index in [0, 3, 4, 5, 8] {
        s.request_move(index).unwrap();
    }
    let view = SessionView::of(&s);
    for pos in Position::ALL {
        let expected = matches!(pos, Position::TopLeft | Position::Center | Position::BottomRight);
        assert_eq!(view.cell(pos).winning, expected, "{pos}");
    }
    assert_eq!(
        view.notification().as_ref().map(|n| n.message().as_str()),
        Some("Player X Wins!")
    );
}

#[test]
fn test_view_labels_follow_mode() {
    let s = session(GameMode::PlayerVsAi);
    let view = SessionView::of(&s);
    assert_eq!(view.turn_label(), "Your Turn");
    assert_eq!(view.o_label(), "AI");
    assert!(view.notification().is_none());
}

#[test]
fn test_reset_scores_and_clear_history() {
    let store = MemoryStore::new();
    let mut s = session_with(store.clone(), GameMode::PlayerVsPlayer);
    for index in [0, 3, 1, 4, 2] {
        s.request_move(index).unwrap();
    }
    s.reset_scores();
    s.clear_history();
    assert_eq!(*s.scores(), ScoreTally::default());
    assert!(s.analytics().history().is_empty());

    let reloaded = session_with(store, GameMode::PlayerVsPlayer);
    assert_eq!(*reloaded.scores(), ScoreTally::default());
    assert!(reloaded.analytics().history().is_empty());
}
