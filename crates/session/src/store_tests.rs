use super::*;
use std::sync::atomic::{AtomicU32, Ordering};

static DIR_SEQ: AtomicU32 = AtomicU32::new(0);

fn temp_store() -> Store {
    let dir = std::env::temp_dir().join(format!(
        "draughts_store_test_{}_{}",
        std::process::id(),
        DIR_SEQ.fetch_add(1, Ordering::Relaxed)
    ));
    Store::new(dir)
}

#[test]
fn missing_files_load_as_none() {
    let store = temp_store();
    assert!(store.load_stats().is_none());
    assert!(store.load_learning().is_none());
}

#[test]
fn stats_survive_a_save_and_load() {
    let store = temp_store();
    let mut stats = Stats::default();
    stats.human_wins = 3;
    stats.best_streak = 2;

    store.save_stats(&stats).unwrap();
    assert_eq!(store.load_stats(), Some(stats));
}

#[test]
fn learning_state_survives_a_save_and_load() {
    let store = temp_store();
    let mut learning = LearningState::default();
    learning.set_q("s", "50-41", 1.5);
    learning.games = 9;

    store.save_learning(&learning).unwrap();

    let back = store.load_learning().unwrap();
    assert_eq!(back.q_value("s", "50-41"), 1.5);
    assert_eq!(back.games, 9);
}

#[test]
fn damaged_learning_file_still_loads_with_defaults() {
    let store = temp_store();
    std::fs::create_dir_all(store.learning_path().parent().unwrap()).unwrap();
    std::fs::write(store.learning_path(), "{ not json").unwrap();

    let back = store.load_learning().unwrap();
    assert_eq!(back.games, 0);
    assert!(back.q.is_empty());
}

#[test]
fn unwritable_directory_reports_an_error() {
    let store = Store::new("/proc/no_such_place/draughts");
    assert!(store.save_stats(&Stats::default()).is_err());
}
