use std::collections::BTreeSet;

use crate::types::*;

/// Squares jumped within the current capture chain but not yet removed.
/// Kept as an ordered set so serializations of it are canonical.
pub type PendingSet = BTreeSet<Pos>;

/// Consecutive plies without a capture before the game is declared drawn
/// (60 full moves).
pub const DRAW_PLY_THRESHOLD: u32 = 120;

#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    squares: [[Option<Piece>; BOARD_SIZE as usize]; BOARD_SIZE as usize],
    /// Plies since the last capture, for the forced-draw rule.
    pub half_move_clock: u32,
}

impl Board {
    /// Empty board, used by tests to construct positions square by square.
    pub fn empty() -> Self {
        Board {
            squares: [[None; BOARD_SIZE as usize]; BOARD_SIZE as usize],
            half_move_clock: 0,
        }
    }

    /// Standard setup: agent men on the dark squares of rows 0-2, human men
    /// on rows 5-7, rows 3-4 open.
    pub fn startpos() -> Self {
        let mut b = Board::empty();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let p = Pos::new(row, col);
                if !p.is_dark() {
                    continue;
                }
                if row < 3 {
                    b.set_piece(p, Some(Piece::man(Owner::Agent)));
                } else if row > 4 {
                    b.set_piece(p, Some(Piece::man(Owner::Human)));
                }
            }
        }
        b
    }

    pub fn piece_at(&self, p: Pos) -> Option<Piece> {
        self.squares[p.row as usize][p.col as usize]
    }

    pub fn set_piece(&mut self, p: Pos, pc: Option<Piece>) {
        debug_assert!(pc.is_none() || p.is_dark(), "piece on a light square");
        self.squares[p.row as usize][p.col as usize] = pc;
    }

    pub fn count(&self, owner: Owner) -> u32 {
        let mut n = 0;
        for row in &self.squares {
            for sq in row {
                if let Some(pc) = sq {
                    if pc.owner == owner {
                        n += 1;
                    }
                }
            }
        }
        n
    }

    /// Relocate the piece of one move step. The captured piece, if any, is
    /// left in place; removal is deferred to `finalize_turn` so the capture
    /// search still sees it mid-chain.
    pub fn apply_move(&mut self, mv: Move) {
        let moving = self.piece_at(mv.from);
        debug_assert!(moving.is_some(), "apply_move from an empty square");
        self.set_piece(mv.from, None);
        self.set_piece(mv.to, moving);
    }

    /// Close out a completed move or capture chain: remove every
    /// pending-captured piece, update the half-move clock, and crown the
    /// moved piece if it ended on its back rank. Crowning is evaluated only
    /// here, never on intermediate landing squares.
    pub fn finalize_turn(&mut self, final_sq: Pos, pending: &PendingSet) {
        if pending.is_empty() {
            self.half_move_clock += 1;
        } else {
            for &p in pending {
                self.set_piece(p, None);
            }
            self.half_move_clock = 0;
        }

        if let Some(pc) = self.piece_at(final_sq) {
            if pc.rank == Rank::Man && final_sq.row == pc.owner.crowning_row() {
                self.set_piece(final_sq, Some(Piece::king(pc.owner)));
            }
        }
    }

    /// Material balance from `pov`'s perspective: man = 1, king = 1.5, own
    /// pieces positive. Pieces on pending-captured squares are already dead
    /// and do not count.
    pub fn material(&self, pov: Owner, pending: &PendingSet) -> f64 {
        let mut score = 0.0;
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let p = Pos::new(row, col);
                if pending.contains(&p) {
                    continue;
                }
                if let Some(pc) = self.piece_at(p) {
                    let v = match pc.rank {
                        Rank::Man => 1.0,
                        Rank::King => 1.5,
                    };
                    score += if pc.owner == pov { v } else { -v };
                }
            }
        }
        score
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
