//! Tests for score and history persistence across store backends.

use strictly_tictactoe::{
    AnalyticsRecorder, GameMode, GameResult, HISTORY_KEY, KeyValueStore, MemoryStore, SCORES_KEY,
    ScoreTally, ScoreTracker, SqliteStore, GameStatus, Player, StoreOp,
};
use tempfile::TempDir;

fn sqlite_store(dir: &TempDir) -> SqliteStore {
    let path = dir.path().join("tictactoe.db");
    SqliteStore::open(path.to_str().unwrap()).unwrap()
}

fn exercise_round_trip<S: KeyValueStore>(store: S) {
    let mut scores = ScoreTracker::load(store.clone());
    scores.record_outcome(GameStatus::Won(Player::X));
    scores.record_outcome(GameStatus::Won(Player::X));
    scores.record_outcome(GameStatus::Draw);
    scores.record_outcome(GameStatus::InProgress);

    let mut analytics = AnalyticsRecorder::load(store.clone());
    analytics.record(GameResult::XWins, vec![0, 3, 1, 4, 2], GameMode::PlayerVsPlayer, 4_000);
    analytics.record(GameResult::Draw, vec![0, 1, 2, 4, 3, 5, 7, 6, 8], GameMode::PlayerVsAi, 8_000);

    let scores = ScoreTracker::load(store.clone());
    assert_eq!(*scores.tally(), ScoreTally::new(2, 0, 1));

    let analytics = AnalyticsRecorder::load(store);
    assert_eq!(analytics.history().len(), 2);
    assert_eq!(analytics.history()[1].game_mode(), &GameMode::PlayerVsAi);
    assert_eq!(*analytics.history()[1].total_moves(), 9);

    let stats = analytics.stats();
    assert_eq!(*stats.total_games(), 2);
    assert_eq!(*stats.x_wins(), 1);
    assert_eq!(*stats.draws(), 1);
    assert!((stats.average_duration_ms() - 6_000.0).abs() < f64::EPSILON);
    assert!((stats.average_moves() - 7.0).abs() < f64::EPSILON);
}

#[test]
fn test_memory_store_round_trip() {
    exercise_round_trip(MemoryStore::new());
}

#[test]
fn test_sqlite_store_round_trip() {
    let dir = TempDir::new().unwrap();
    exercise_round_trip(sqlite_store(&dir));
}

#[test]
fn test_sqlite_store_survives_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let mut scores = ScoreTracker::load(sqlite_store(&dir));
        scores.record_outcome(GameStatus::Won(Player::O));
    }
    let reopened = ScoreTracker::load(sqlite_store(&dir));
    assert_eq!(*reopened.tally(), ScoreTally::new(0, 1, 0));
}

#[test]
fn test_scores_stored_with_short_keys() {
    let store = MemoryStore::new();
    ScoreTracker::load(store.clone()).record_outcome(GameStatus::Draw);
    let raw = store.get(SCORES_KEY).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json, serde_json::json!({ "X": 0, "O": 0, "draw": 1 }));
}

#[test]
fn test_history_stored_in_camel_case() {
    let store = MemoryStore::new();
    AnalyticsRecorder::load(store.clone()).record(
        GameResult::OWins,
        vec![0, 4, 1, 2, 8, 6],
        GameMode::PlayerVsAi,
        1_500,
    );
    let raw = store.get(HISTORY_KEY).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let game = &json[0];
    assert_eq!(game["winner"], "O");
    assert_eq!(game["totalMoves"], 6);
    assert_eq!(game["duration"], 1_500);
    assert!(game.get("gameMode").is_some());
    assert!(game.get("timestamp").is_some());
}

#[test]
fn test_corrupt_data_falls_back_to_defaults() {
    let store = MemoryStore::new();
    store.set(SCORES_KEY, "{not json").unwrap();
    store.set(HISTORY_KEY, "42").unwrap();

    assert_eq!(*ScoreTracker::load(store.clone()).tally(), ScoreTally::default());
    assert!(AnalyticsRecorder::load(store).history().is_empty());
}

#[test]
fn test_partial_scores_fill_missing_counts() {
    let store = MemoryStore::new();
    store.set(SCORES_KEY, r#"{"X": 3}"#).unwrap();
    assert_eq!(*ScoreTracker::load(store).tally(), ScoreTally::new(3, 0, 0));
}

#[test]
fn test_clear_history_removes_key() {
    let dir = TempDir::new().unwrap();
    let store = sqlite_store(&dir);
    let mut analytics = AnalyticsRecorder::load(store.clone());
    analytics.record(GameResult::Draw, vec![4], GameMode::PlayerVsPlayer, 10);
    assert!(store.get(HISTORY_KEY).unwrap().is_some());

    analytics.clear();
    assert!(analytics.history().is_empty());
    assert_eq!(store.get(HISTORY_KEY).unwrap(), None);
    assert_eq!(*analytics.stats().total_games(), 0);
}

#[test]
fn test_remove_missing_key_is_ok() {
    let dir = TempDir::new().unwrap();
    assert!(sqlite_store(&dir).remove("never-set").is_ok());
    assert!(MemoryStore::new().remove("never-set").is_ok());
}

#[test]
fn test_maximal_stored_tally_keeps_counting() {
    let store = MemoryStore::new();
    store.set(SCORES_KEY, r#"{"X": 4294967295, "O": 0, "draw": 0}"#).unwrap();

    let mut scores = ScoreTracker::load(store.clone());
    scores.record_outcome(GameStatus::Won(Player::X));
    scores.record_outcome(GameStatus::Draw);
    assert_eq!(*scores.tally(), ScoreTally::new(u32::MAX, 0, 1));
    assert_eq!(scores.tally().total(), u32::MAX);

    let reloaded = ScoreTracker::load(store);
    assert_eq!(*reloaded.tally().x_wins(), u32::MAX);
}

#[test]
fn test_huge_stored_durations_average_without_overflow() {
    let store = MemoryStore::new();
    let game = r#"{"timestamp":"2026-01-01T00:00:00.000Z","winner":"X","moves":[0,3,1,4,2],"gameMode":"pvp","duration":18446744073709551615,"totalMoves":5}"#;
    store.set(HISTORY_KEY, &format!("[{game},{game}]")).unwrap();

    let analytics = AnalyticsRecorder::load(store);
    assert_eq!(analytics.history().len(), 2);
    let stats = analytics.stats();
    assert_eq!(*stats.total_games(), 2);
    assert_eq!(*stats.average_duration_ms(), u64::MAX as f64);
    assert!((stats.average_moves() - 5.0).abs() < f64::EPSILON);
}

#[test]
fn test_open_failure_names_backend_and_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("tictactoe.db");
    let path = path.to_str().unwrap();

    let err = SqliteStore::open(path).unwrap_err();
    assert_eq!(err.backend(), "sqlite");
    assert_eq!(*err.op(), StoreOp::Open);
    assert_eq!(err.target(), path);
    assert!(err.to_string().starts_with("sqlite store could not open"));
}
