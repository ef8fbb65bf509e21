//! Turn state machine driving one human-versus-agent game.
//!
//! The session owns the board, the legal-move cache, and the learning
//! agent. It contains no rule logic of its own: moves come from the
//! generator, transitions go through the board, termination through the
//! outcome detector. Persistence is fire-and-forget; a failed save never
//! interrupts play.

use draughts_core::{
    detect_outcome, legal_moves, legal_moves_from, Board, Move, Outcome, Owner, PendingSet, Pos,
};
use qlearn_engine::{action_key, state_key, QLearnAgent};

use crate::snapshot::Snapshot;
use crate::stats::Stats;
use crate::store::Store;

/// Cap on the agent's internal capture loop. Exceeding it means the
/// generator misbehaved; the game is forced to a draw instead of hanging.
pub const AGENT_LOOP_GUARD: u32 = 32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Turn {
    /// Human to pick a piece and a landing square.
    Human,
    /// Human must continue the open capture chain.
    HumanChain,
    /// Agent's turn; the presentation layer triggers `run_agent_turn`
    /// after its thinking pause.
    Agent,
    /// Game over; move input is ignored until a new game starts.
    Done,
}

pub struct GameSession {
    store: Store,
    agent: QLearnAgent,
    stats: Stats,
    board: Board,
    turn: Turn,
    selected: Option<Pos>,
    forced: Option<Pos>,
    pending: PendingSet,
    legal: Vec<Move>,
    status: String,
}

impl GameSession {
    /// Load persisted stats and learning state (falling back to defaults)
    /// and start the first game.
    pub fn new(store: Store) -> Self {
        let stats = store.load_stats().unwrap_or_default();
        let agent = QLearnAgent::new(store.load_learning().unwrap_or_default());
        let mut session = Self {
            store,
            agent,
            stats,
            board: Board::startpos(),
            turn: Turn::Human,
            selected: None,
            forced: None,
            pending: PendingSet::new(),
            legal: Vec::new(),
            status: String::new(),
        };
        session.new_game("Your turn. Select a piece.");
        session
    }

    pub fn new_game(&mut self, message: &str) {
        self.board = Board::startpos();
        self.turn = Turn::Human;
        self.selected = None;
        self.forced = None;
        self.pending.clear();
        self.legal = legal_moves(&self.board, Owner::Human);
        self.agent.clear_episode();
        self.status = message.to_string();
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    pub fn game_over(&self) -> bool {
        self.turn == Turn::Done
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn agent(&self) -> &QLearnAgent {
        &self.agent
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Handle a square chosen by the human: play the move if it completes
    /// a selection, select the square if it has legal moves, otherwise
    /// clear the selection with a hint. Illegal input never changes the
    /// game state.
    pub fn select_square(&mut self, p: Pos) {
        if !matches!(self.turn, Turn::Human | Turn::HumanChain) {
            return;
        }

        if let Some(mv) = self.move_from_selected(p) {
            self.play_human_move(mv);
            return;
        }

        if self.legal.iter().any(|m| m.from == p) {
            self.selected = Some(p);
            self.status = if self.forced.is_some() {
                "Capture chain: continue with this piece.".to_string()
            } else {
                "Select a highlighted landing square.".to_string()
            };
            return;
        }

        self.selected = None;
        self.status = if self.legal.iter().any(|m| m.is_capture()) {
            "Capture is mandatory. Pick a piece on a longest capture line.".to_string()
        } else {
            "Select a piece.".to_string()
        };
    }

    fn move_from_selected(&self, target: Pos) -> Option<Move> {
        let from = self.selected?;
        self.legal
            .iter()
            .copied()
            .find(|m| m.from == from && m.to == target)
    }

    /// Play one human move step. If it opens a mandatory continuation the
    /// turn stays with the human, anchored to the landing square;
    /// otherwise the turn is finalized and passes to the agent.
    pub fn play_human_move(&mut self, mv: Move) {
        if !matches!(self.turn, Turn::Human | Turn::HumanChain) || !self.legal.contains(&mv) {
            return;
        }

        self.board.apply_move(mv);

        if let Some(cap) = mv.capture {
            self.pending.insert(cap);
            let follow_ups =
                legal_moves_from(&self.board, Owner::Human, Some(mv.to), &self.pending);
            if !follow_ups.is_empty() {
                self.turn = Turn::HumanChain;
                self.forced = Some(mv.to);
                self.selected = Some(mv.to);
                self.legal = follow_ups;
                self.status =
                    "Capture chain: continue jumping with the highlighted piece.".to_string();
                return;
            }
        }

        self.board.finalize_turn(mv.to, &self.pending);
        self.pending.clear();

        if let Some(outcome) = detect_outcome(&self.board) {
            self.finish_game(outcome, None);
            return;
        }

        self.turn = Turn::Agent;
        self.forced = None;
        self.selected = None;
        self.legal.clear();
        self.status = "Agent is thinking...".to_string();
    }

    /// Run the agent's whole turn, including any capture chain, as one
    /// uninterruptible loop. One episode step is recorded per internal
    /// action with the material swing as its reward.
    pub fn run_agent_turn(&mut self) {
        if self.turn != Turn::Agent {
            return;
        }

        let mut chain_from: Option<Pos> = None;
        let mut pending = PendingSet::new();
        let mut guard = 0u32;

        let final_sq = loop {
            guard += 1;
            if guard > AGENT_LOOP_GUARD {
                self.finish_game(Outcome::Draw, Some("Move loop safety stop."));
                return;
            }

            let moves = legal_moves_from(&self.board, Owner::Agent, chain_from, &pending);
            let state = state_key(&self.board, chain_from, &pending);
            let mv = match self.agent.select_move(&state, &moves) {
                Some(mv) => mv,
                None => {
                    self.finish_game(Outcome::HumanWins, Some("Agent has no legal moves."));
                    return;
                }
            };

            let before = self.board.material(Owner::Agent, &pending);
            self.board.apply_move(mv);
            if let Some(cap) = mv.capture {
                pending.insert(cap);
            }
            let after = self.board.material(Owner::Agent, &pending);
            self.agent.record_step(state, action_key(mv), after - before);

            if mv.is_capture()
                && !legal_moves_from(&self.board, Owner::Agent, Some(mv.to), &pending).is_empty()
            {
                chain_from = Some(mv.to);
                continue;
            }
            break mv.to;
        };

        self.board.finalize_turn(final_sq, &pending);

        if let Some(outcome) = detect_outcome(&self.board) {
            self.finish_game(outcome, None);
            return;
        }

        self.turn = Turn::Human;
        self.forced = None;
        self.selected = None;
        self.pending.clear();
        self.legal = legal_moves(&self.board, Owner::Human);
        self.status = if self.legal.iter().any(|m| m.is_capture()) {
            "Your turn. Capture is mandatory (longest line).".to_string()
        } else {
            "Your turn. Select a piece.".to_string()
        };
    }

    /// Close the game exactly once: record stats, train the agent on the
    /// finished episode, and persist both. Save failures are swallowed so
    /// the session stays usable.
    fn finish_game(&mut self, outcome: Outcome, reason: Option<&str>) {
        if self.turn == Turn::Done {
            return;
        }
        self.turn = Turn::Done;
        self.selected = None;
        self.forced = None;
        self.pending.clear();
        self.legal.clear();

        self.stats.record(outcome);
        self.store.save_stats(&self.stats).ok();
        self.agent.train_episode(outcome);
        self.store.save_learning(&self.agent.learning).ok();

        self.status = match outcome {
            Outcome::HumanWins => format!(
                "You win! {}",
                reason.unwrap_or("Point for your pride score.")
            ),
            Outcome::AgentWins => format!(
                "Agent wins. {}",
                reason.unwrap_or("Try to outplay it next game.")
            ),
            Outcome::Draw => format!("Draw game. {}", reason.unwrap_or("Start another round.")),
        };
    }

    /// Wipe the agent's memory back to defaults. Confirmation is the
    /// caller's job.
    pub fn reset_agent(&mut self) {
        self.agent.reset();
        self.store.save_learning(&self.agent.learning).ok();
        self.status = "Agent memory reset. It will relearn from your games.".to_string();
    }

    pub fn reset_stats(&mut self) {
        self.stats = Stats::default();
        self.store.save_stats(&self.stats).ok();
        self.status = "Win stats reset.".to_string();
    }

    pub fn snapshot(&self) -> Snapshot {
        let targets = match self.selected {
            Some(from) => self
                .legal
                .iter()
                .filter(|m| m.from == from)
                .map(|m| m.to)
                .collect(),
            None => Vec::new(),
        };

        Snapshot {
            board: self.board.clone(),
            turn: self.turn,
            selected: self.selected,
            targets,
            pending: self.pending.iter().copied().collect(),
            status: self.status.clone(),
            game_over: self.game_over(),
            stats: self.stats.clone(),
            epsilon: self.agent.learning.epsilon,
            states_learned: self.agent.learning.states_learned(),
        }
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
