//! JSON persistence for statistics and the learned value table.
//!
//! Loads tolerate a missing or damaged file (the caller gets `None` and
//! starts fresh); saves report errors but callers are expected to treat
//! them as fire-and-forget so the game keeps running from memory.

use std::fs;
use std::path::{Path, PathBuf};

use qlearn_engine::LearningState;

use crate::stats::Stats;

const STATS_FILE: &str = "draughts_stats.json";
const LEARNING_FILE: &str = "draughts_rl.json";

#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn stats_path(&self) -> PathBuf {
        self.dir.join(STATS_FILE)
    }

    pub fn learning_path(&self) -> PathBuf {
        self.dir.join(LEARNING_FILE)
    }

    pub fn load_stats(&self) -> Option<Stats> {
        let raw = fs::read_to_string(self.stats_path()).ok()?;
        Some(Stats::from_json(&raw))
    }

    pub fn save_stats(&self, stats: &Stats) -> Result<(), String> {
        write_file(&self.dir, &self.stats_path(), &stats.to_json()?)
    }

    pub fn load_learning(&self) -> Option<LearningState> {
        let raw = fs::read_to_string(self.learning_path()).ok()?;
        Some(LearningState::from_json(&raw))
    }

    pub fn save_learning(&self, learning: &LearningState) -> Result<(), String> {
        write_file(&self.dir, &self.learning_path(), &learning.to_json()?)
    }
}

fn write_file(dir: &Path, path: &Path, contents: &str) -> Result<(), String> {
    fs::create_dir_all(dir).map_err(|e| format!("Failed to create {}: {}", dir.display(), e))?;
    fs::write(path, contents).map_err(|e| format!("Failed to write {}: {}", path.display(), e))
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod store_tests;
