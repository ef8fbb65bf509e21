//! Read-only view handed to the presentation layer after every change.

use draughts_core::{Board, Pos};

use crate::game::Turn;
use crate::stats::Stats;

#[derive(Debug, Clone)]
pub struct Snapshot {
    pub board: Board,
    pub turn: Turn,
    /// Origin the human currently has selected, if any.
    pub selected: Option<Pos>,
    /// Legal landing squares from the selected origin.
    pub targets: Vec<Pos>,
    /// Squares captured this chain but not yet removed.
    pub pending: Vec<Pos>,
    pub status: String,
    pub game_over: bool,
    pub stats: Stats,
    pub epsilon: f64,
    pub states_learned: usize,
}
