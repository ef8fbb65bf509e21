pub const BOARD_SIZE: u8 = 8;

/// The four diagonal step directions as (row delta, col delta).
pub const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Owner {
    Human,
    Agent,
}

impl Owner {
    pub fn other(self) -> Owner {
        match self {
            Owner::Human => Owner::Agent,
            Owner::Agent => Owner::Human,
        }
    }

    /// Row direction a man of this side advances in (human toward row 0).
    pub fn forward(self) -> i8 {
        match self {
            Owner::Human => -1,
            Owner::Agent => 1,
        }
    }

    /// Back rank where a man of this side is crowned.
    pub fn crowning_row(self) -> u8 {
        match self {
            Owner::Human => 0,
            Owner::Agent => BOARD_SIZE - 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rank {
    Man,
    King,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    pub owner: Owner,
    pub rank: Rank,
}

impl Piece {
    pub fn man(owner: Owner) -> Self {
        Piece {
            owner,
            rank: Rank::Man,
        }
    }

    pub fn king(owner: Owner) -> Self {
        Piece {
            owner,
            rank: Rank::King,
        }
    }

    pub fn is_king(self) -> bool {
        self.rank == Rank::King
    }
}

/// A square on the board. Ordered row-major so ordered sets of positions
/// iterate in a canonical order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < BOARD_SIZE && col < BOARD_SIZE);
        Pos { row, col }
    }

    /// Step from this square by a signed delta, `None` if off-board.
    pub fn step(self, dr: i8, dc: i8) -> Option<Pos> {
        pos(self.row as i8 + dr, self.col as i8 + dc)
    }

    /// Only dark squares are playable.
    pub fn is_dark(self) -> bool {
        (self.row + self.col) % 2 == 1
    }
}

/// Bounds-checked constructor from signed coordinates.
pub fn pos(row: i8, col: i8) -> Option<Pos> {
    if (0..BOARD_SIZE as i8).contains(&row) && (0..BOARD_SIZE as i8).contains(&col) {
        Some(Pos {
            row: row as u8,
            col: col as u8,
        })
    } else {
        None
    }
}

/// A single step of a turn: one relocation, capturing at most one piece.
/// The captured piece stays on the board until the whole chain is
/// finalized; see `Board::finalize_turn`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    pub from: Pos,
    pub to: Pos,
    pub capture: Option<Pos>,
}

impl Move {
    pub fn slide(from: Pos, to: Pos) -> Self {
        Move {
            from,
            to,
            capture: None,
        }
    }

    pub fn jump(from: Pos, to: Pos, capture: Pos) -> Self {
        Move {
            from,
            to,
            capture: Some(capture),
        }
    }

    pub fn is_capture(self) -> bool {
        self.capture.is_some()
    }
}
