//! Win/loss/draw statistics with the human's win streak.

use draughts_core::Outcome;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub human_wins: u64,
    pub agent_wins: u64,
    pub draws: u64,
    pub games: u64,
    pub current_streak: u64,
    pub best_streak: u64,
}

impl Stats {
    /// Tolerant parse: missing or malformed fields fall back to zero so a
    /// damaged stats file never blocks play.
    pub fn from_json(raw: &str) -> Self {
        let value: serde_json::Value = match serde_json::from_str(raw) {
            Ok(v) => v,
            Err(_) => return Self::default(),
        };
        let obj = match value.as_object() {
            Some(o) => o,
            None => return Self::default(),
        };
        let num = |key: &str| obj.get(key).and_then(|v| v.as_u64()).unwrap_or(0);

        Self {
            human_wins: num("humanWins"),
            agent_wins: num("agentWins"),
            draws: num("draws"),
            games: num("games"),
            current_streak: num("currentStreak"),
            best_streak: num("bestStreak"),
        }
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| format!("Failed to serialize: {}", e))
    }

    /// Fold one finished game into the totals. Only human wins extend the
    /// streak; an agent win or a draw breaks it.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::HumanWins => {
                self.human_wins += 1;
                self.current_streak += 1;
                self.best_streak = self.best_streak.max(self.current_streak);
            }
            Outcome::AgentWins => {
                self.agent_wins += 1;
                self.current_streak = 0;
            }
            Outcome::Draw => {
                self.draws += 1;
                self.current_streak = 0;
            }
        }
        self.games += 1;
    }
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod stats_tests;
