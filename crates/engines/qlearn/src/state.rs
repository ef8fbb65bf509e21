//! Persisted learning state: hyperparameters and the state-action value
//! table. Loading is tolerant field by field so a damaged file never takes
//! the agent down; out-of-range numbers are clamped instead of rejected.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub const DEFAULT_ALPHA: f64 = 0.22;
pub const DEFAULT_GAMMA: f64 = 0.92;
pub const DEFAULT_EPSILON: f64 = 0.20;
pub const DEFAULT_MIN_EPSILON: f64 = 0.03;
pub const DEFAULT_EPSILON_DECAY: f64 = 0.985;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningState {
    /// Learning rate for the value update.
    pub alpha: f64,
    /// Discount factor for the backward return.
    pub gamma: f64,
    /// Exploration rate, decayed after every trained game.
    pub epsilon: f64,
    pub min_epsilon: f64,
    pub epsilon_decay: f64,
    /// Games trained so far.
    pub games: u64,
    /// state key -> action key -> value estimate.
    pub q: HashMap<String, HashMap<String, f64>>,
}

impl Default for LearningState {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            gamma: DEFAULT_GAMMA,
            epsilon: DEFAULT_EPSILON,
            min_epsilon: DEFAULT_MIN_EPSILON,
            epsilon_decay: DEFAULT_EPSILON_DECAY,
            games: 0,
            q: HashMap::new(),
        }
    }
}

impl LearningState {
    /// Parse a persisted state, substituting defaults for anything missing
    /// or malformed and clamping every parameter into its legal range.
    /// Never fails: unreadable input just yields the defaults.
    pub fn from_json(raw: &str) -> Self {
        let defaults = Self::default();
        let value: serde_json::Value = match serde_json::from_str(raw) {
            Ok(v) => v,
            Err(_) => return defaults,
        };
        let obj = match value.as_object() {
            Some(o) => o,
            None => return defaults,
        };

        let num = |key: &str, fallback: f64| -> f64 {
            obj.get(key)
                .and_then(|v| v.as_f64())
                .filter(|v| v.is_finite())
                .unwrap_or(fallback)
        };

        let mut q = HashMap::new();
        if let Some(states) = obj.get("q").and_then(|v| v.as_object()) {
            for (state, actions) in states {
                if let Some(actions) = actions.as_object() {
                    let row: HashMap<String, f64> = actions
                        .iter()
                        .filter_map(|(k, v)| v.as_f64().map(|v| (k.clone(), v)))
                        .collect();
                    q.insert(state.clone(), row);
                }
            }
        }

        Self {
            alpha: num("alpha", defaults.alpha).clamp(0.01, 1.0),
            gamma: num("gamma", defaults.gamma).clamp(0.1, 0.999),
            epsilon: num("epsilon", defaults.epsilon).clamp(0.0, 1.0),
            min_epsilon: num("minEpsilon", defaults.min_epsilon).clamp(0.0, 0.5),
            epsilon_decay: num("epsilonDecay", defaults.epsilon_decay).clamp(0.8, 0.9999),
            games: obj.get("games").and_then(|v| v.as_u64()).unwrap_or(0),
            q,
        }
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| format!("Failed to serialize: {}", e))
    }

    /// Value estimate for a state-action pair; unseen pairs read as 0.
    pub fn q_value(&self, state: &str, action: &str) -> f64 {
        self.q
            .get(state)
            .and_then(|row| row.get(action))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn set_q(&mut self, state: &str, action: &str, value: f64) {
        self.q
            .entry(state.to_string())
            .or_default()
            .insert(action.to_string(), value);
    }

    /// Number of distinct states with at least one learned action.
    pub fn states_learned(&self) -> usize {
        self.q.len()
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod state_tests;
