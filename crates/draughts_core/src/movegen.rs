use crate::board::{Board, PendingSet};
use crate::types::*;

/// Guard on the capture-chain search depth. A side can never capture more
/// than the 12 pieces the opponent starts with; anything deeper means the
/// position is corrupt and the search stops rather than recursing forever.
const CHAIN_DEPTH_LIMIT: u32 = 16;

/// All legal moves for `player` at the start of a turn.
pub fn legal_moves(board: &Board, player: Owner) -> Vec<Move> {
    legal_moves_from(board, player, None, &PendingSet::new())
}

/// All legal moves for `player`, optionally restricted to the single piece
/// at `forced_origin` (an open capture chain). `pending` carries the
/// squares already jumped this turn; their pieces block rays and cannot be
/// jumped a second time.
///
/// Captures are mandatory for the whole side: if any piece can capture,
/// simple moves are not returned at all. Among captures, only first steps
/// of a maximum-length chain are legal.
pub fn legal_moves_from(
    board: &Board,
    player: Owner,
    forced_origin: Option<Pos>,
    pending: &PendingSet,
) -> Vec<Move> {
    if let Some(origin) = forced_origin {
        match board.piece_at(origin) {
            Some(pc) if pc.owner == player => {}
            _ => return Vec::new(),
        }
        let captures = capture_moves_for(board, origin, pending);
        return filter_longest_chains(board, captures, pending);
    }

    let mut captures = Vec::new();
    let mut slides = Vec::new();

    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            let p = Pos::new(row, col);
            let pc = match board.piece_at(p) {
                Some(pc) if pc.owner == player => pc,
                _ => continue,
            };

            let piece_captures = capture_moves_for(board, p, pending);
            if piece_captures.is_empty() {
                simple_moves_for(board, p, pc, &mut slides);
            } else {
                captures.extend(piece_captures);
            }
        }
    }

    if captures.is_empty() {
        return slides;
    }
    filter_longest_chains(board, captures, pending)
}

fn simple_moves_for(board: &Board, from: Pos, pc: Piece, out: &mut Vec<Move>) {
    if pc.is_king() {
        // Flying king: any distance along an empty diagonal run.
        for (dr, dc) in DIAGONALS {
            let mut cursor = from.step(dr, dc);
            while let Some(to) = cursor {
                if board.piece_at(to).is_some() {
                    break;
                }
                out.push(Move::slide(from, to));
                cursor = to.step(dr, dc);
            }
        }
        return;
    }

    // A man slides forward only; its captures go in all four diagonals.
    let dr = pc.owner.forward();
    for dc in [-1, 1] {
        if let Some(to) = from.step(dr, dc) {
            if board.piece_at(to).is_none() {
                out.push(Move::slide(from, to));
            }
        }
    }
}

/// Capture moves available to the single piece at `from`.
pub fn capture_moves_for(board: &Board, from: Pos, pending: &PendingSet) -> Vec<Move> {
    let pc = match board.piece_at(from) {
        Some(pc) => pc,
        None => return Vec::new(),
    };

    if pc.is_king() {
        return king_capture_moves(board, from, pc.owner, pending);
    }

    let mut out = Vec::new();
    for (dr, dc) in DIAGONALS {
        let middle = match from.step(dr, dc) {
            Some(p) => p,
            None => continue,
        };
        let landing = match from.step(2 * dr, 2 * dc) {
            Some(p) => p,
            None => continue,
        };

        let jumped = match board.piece_at(middle) {
            Some(j) => j,
            None => continue,
        };
        if jumped.owner == pc.owner || pending.contains(&middle) {
            continue;
        }
        if board.piece_at(landing).is_some() {
            continue;
        }

        out.push(Move::jump(from, landing, middle));
    }
    out
}

/// Flying-king capture: scan outward, skip leading empties, and after
/// exactly one enemy piece the king may land on any empty square beyond it.
/// A second piece, an own piece, or an already-pending square ends the ray.
fn king_capture_moves(board: &Board, from: Pos, owner: Owner, pending: &PendingSet) -> Vec<Move> {
    let mut out = Vec::new();

    for (dr, dc) in DIAGONALS {
        let mut enemy: Option<Pos> = None;
        let mut cursor = from.step(dr, dc);

        while let Some(sq) = cursor {
            match board.piece_at(sq) {
                None => {
                    if let Some(captured) = enemy {
                        out.push(Move::jump(from, sq, captured));
                    }
                }
                Some(pc) => {
                    if pending.contains(&sq) || pc.owner == owner || enemy.is_some() {
                        break;
                    }
                    enemy = Some(sq);
                }
            }
            cursor = sq.step(dr, dc);
        }
    }
    out
}

/// Keep only the capture moves that start a maximum-length chain.
/// Ties all stay legal; the chooser picks among them.
fn filter_longest_chains(board: &Board, captures: Vec<Move>, pending: &PendingSet) -> Vec<Move> {
    if captures.len() <= 1 {
        return captures;
    }

    let scored: Vec<(Move, u32)> = captures
        .into_iter()
        .map(|mv| {
            let len = chain_length(board, mv, pending);
            (mv, len)
        })
        .collect();

    let best = scored.iter().map(|&(_, len)| len).max().unwrap_or(0);
    scored
        .into_iter()
        .filter(|&(_, len)| len == best)
        .map(|(mv, _)| mv)
        .collect()
}

/// Total captures reachable by taking `mv` and then chaining greedily:
/// simulate the step and search continuations depth-first.
pub fn chain_length(board: &Board, mv: Move, pending: &PendingSet) -> u32 {
    let mut next = board.clone();
    next.apply_move(mv);
    let mut next_pending = pending.clone();
    if let Some(cap) = mv.capture {
        next_pending.insert(cap);
    }
    1 + max_continuation(&next, mv.to, &next_pending, CHAIN_DEPTH_LIMIT)
}

fn max_continuation(board: &Board, from: Pos, pending: &PendingSet, depth: u32) -> u32 {
    if depth == 0 {
        return 0;
    }

    let mut best = 0;
    for mv in capture_moves_for(board, from, pending) {
        let mut next = board.clone();
        next.apply_move(mv);
        let mut next_pending = pending.clone();
        if let Some(cap) = mv.capture {
            next_pending.insert(cap);
        }
        let total = 1 + max_continuation(&next, mv.to, &next_pending, depth - 1);
        best = best.max(total);
    }
    best
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
