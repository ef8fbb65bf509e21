//! Canonical state and action keys for the value table.
//!
//! The formats are frozen: persisted tables are indexed by these exact
//! strings, so any change here orphans everything the agent has learned.
//!
//! State key: `ai|<chain>|<pending>|<flat>` where `<chain>` is the chain
//! anchor as `{row}{col}` or `na`, `<pending>` is the pending-captured
//! squares as sorted `row,col` entries joined by `.` (or `none`), and
//! `<flat>` is the 64 squares row-major, one digit each.
//!
//! Action key: `{from}-{to}` as `{row}{col}` pairs, with `x{row}{col}` of
//! the captured square appended for captures.

use draughts_core::{Board, Move, Owner, PendingSet, Piece, Pos, Rank, BOARD_SIZE};

fn piece_digit(pc: Option<Piece>) -> char {
    match pc {
        None => '0',
        Some(Piece {
            owner: Owner::Human,
            rank: Rank::Man,
        }) => '1',
        Some(Piece {
            owner: Owner::Agent,
            rank: Rank::Man,
        }) => '2',
        Some(Piece {
            owner: Owner::Human,
            rank: Rank::King,
        }) => '3',
        Some(Piece {
            owner: Owner::Agent,
            rank: Rank::King,
        }) => '4',
    }
}

pub fn state_key(board: &Board, chain: Option<Pos>, pending: &PendingSet) -> String {
    let chain_part = match chain {
        Some(p) => format!("{}{}", p.row, p.col),
        None => "na".to_string(),
    };

    let pending_part = if pending.is_empty() {
        "none".to_string()
    } else {
        // BTreeSet iterates row-major, which matches sorting the
        // `row,col` strings for single-digit coordinates.
        pending
            .iter()
            .map(|p| format!("{},{}", p.row, p.col))
            .collect::<Vec<_>>()
            .join(".")
    };

    let mut flat = String::with_capacity(64);
    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            flat.push(piece_digit(board.piece_at(Pos::new(row, col))));
        }
    }

    format!("ai|{}|{}|{}", chain_part, pending_part, flat)
}

pub fn action_key(mv: Move) -> String {
    let capture_part = match mv.capture {
        Some(c) => format!("x{}{}", c.row, c.col),
        None => String::new(),
    };
    format!(
        "{}{}-{}{}{}",
        mv.from.row, mv.from.col, mv.to.row, mv.to.col, capture_part
    )
}

#[cfg(test)]
#[path = "keys_tests.rs"]
mod keys_tests;
