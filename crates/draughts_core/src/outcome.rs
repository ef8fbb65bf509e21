use crate::board::{Board, DRAW_PLY_THRESHOLD};
use crate::movegen::legal_moves;
use crate::types::Owner;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    HumanWins,
    AgentWins,
    Draw,
}

/// Terminal state of a position, `None` while the game continues.
/// Checked in order: piece counts, then mobility, then the no-capture
/// draw clock. Call after every completed move or chain, before switching
/// the turn.
pub fn detect_outcome(board: &Board) -> Option<Outcome> {
    if board.count(Owner::Human) == 0 {
        return Some(Outcome::AgentWins);
    }
    if board.count(Owner::Agent) == 0 {
        return Some(Outcome::HumanWins);
    }
    if legal_moves(board, Owner::Human).is_empty() {
        return Some(Outcome::AgentWins);
    }
    if legal_moves(board, Owner::Agent).is_empty() {
        return Some(Outcome::HumanWins);
    }
    if board.half_move_clock >= DRAW_PLY_THRESHOLD {
        return Some(Outcome::Draw);
    }
    None
}

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod outcome_tests;
