//! Tabular Q-learning opponent for Filipino draughts.
//!
//! The agent keeps a state-action value table keyed by canonical string
//! serializations of the position, picks moves epsilon-greedily, records
//! one (state, action, reward) step per ply of its turn, and at game end
//! replays the episode backward with a discounted Monte-Carlo return.

pub mod keys;
pub mod state;

pub use keys::{action_key, state_key};
pub use state::LearningState;

use draughts_core::{Move, Outcome};
use rand::seq::SliceRandom;
use rand::{thread_rng, Rng};

/// Terminal reward magnitude for a decided game.
pub const WIN_REWARD: f64 = 8.0;

/// Two value estimates within this distance count as tied.
const TIE_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone)]
pub struct EpisodeStep {
    pub state: String,
    pub action: String,
    pub reward: f64,
}

#[derive(Debug, Clone, Default)]
pub struct QLearnAgent {
    pub learning: LearningState,
    episode: Vec<EpisodeStep>,
}

impl QLearnAgent {
    pub fn new(learning: LearningState) -> Self {
        Self {
            learning,
            episode: Vec::new(),
        }
    }

    /// Epsilon-greedy selection among the legal moves: explore uniformly
    /// with probability epsilon, otherwise take the best-valued action,
    /// breaking ties uniformly. `None` only when `moves` is empty.
    pub fn select_move(&self, state_key: &str, moves: &[Move]) -> Option<Move> {
        let mut rng = thread_rng();

        if moves.is_empty() {
            return None;
        }
        if rng.gen::<f64>() < self.learning.epsilon {
            return moves.choose(&mut rng).copied();
        }

        let mut best_value = f64::NEG_INFINITY;
        let mut best: Vec<Move> = Vec::new();
        for &mv in moves {
            let value = self.learning.q_value(state_key, &action_key(mv));
            if value > best_value + TIE_TOLERANCE {
                best_value = value;
                best.clear();
                best.push(mv);
            } else if (value - best_value).abs() < TIE_TOLERANCE {
                best.push(mv);
            }
        }

        match best.choose(&mut rng).copied() {
            Some(mv) => Some(mv),
            None => moves.choose(&mut rng).copied(),
        }
    }

    /// Append one ply of the agent's turn to the in-progress episode.
    /// `reward` is the material delta across that single step.
    pub fn record_step(&mut self, state: String, action: String, reward: f64) {
        self.episode.push(EpisodeStep {
            state,
            action,
            reward,
        });
    }

    pub fn episode_len(&self) -> usize {
        self.episode.len()
    }

    /// Consume the episode at game end: walk it backward accumulating the
    /// discounted return from the terminal reward and nudge each visited
    /// state-action value toward it. A strict no-op when no steps were
    /// recorded (table, games counter, and epsilon all untouched).
    pub fn train_episode(&mut self, outcome: Outcome) {
        if self.episode.is_empty() {
            return;
        }

        let terminal = match outcome {
            Outcome::AgentWins => WIN_REWARD,
            Outcome::HumanWins => -WIN_REWARD,
            Outcome::Draw => 0.0,
        };

        let mut discounted_return = terminal;
        for step in self.episode.iter().rev() {
            discounted_return = step.reward + self.learning.gamma * discounted_return;
            let current = self.learning.q_value(&step.state, &step.action);
            let updated = current + self.learning.alpha * (discounted_return - current);
            self.learning
                .set_q(&step.state, &step.action, round5(updated));
        }

        self.learning.games += 1;
        self.learning.epsilon = self
            .learning
            .min_epsilon
            .max(self.learning.epsilon * self.learning.epsilon_decay);
        self.episode.clear();
    }

    /// Forget any steps from an abandoned game.
    pub fn clear_episode(&mut self) {
        self.episode.clear();
    }

    /// Drop everything learned and return to the default hyperparameters.
    pub fn reset(&mut self) {
        self.learning = LearningState::default();
        self.episode.clear();
    }
}

/// Stored values are rounded to 5 decimal digits, matching the table's
/// persisted precision.
fn round5(v: f64) -> f64 {
    (v * 100_000.0).round() / 100_000.0
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod lib_tests;
