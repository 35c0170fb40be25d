// Core value types shared by the board, the evaluators and the search engines

use serde::{Deserialize, Serialize};
use std::fmt;

/// A destination cell on the board, addressed as (row, column)
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Move {
    pub row: i32,
    pub col: i32,
}

impl Move {
    /// Returned by agents when the active player has no legal move.
    /// Never a real destination; callers must check before applying it.
    pub const NONE: Move = Move { row: -1, col: -1 };

    pub const fn new(row: i32, col: i32) -> Self {
        Move { row, col }
    }

    /// True for the "no legal move" sentinel
    pub fn is_none(&self) -> bool {
        *self == Move::NONE
    }

    /// Calculates the cell reached by applying a (row, col) offset
    pub fn offset(&self, d_row: i32, d_col: i32) -> Move {
        Move {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Identifies one of the two occupants of the board.
/// Carries no behaviour; decision logic lives in the agents.
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Returns both players in turn order
    pub fn all() -> [Player; 2] {
        [Player::One, Player::Two]
    }

    pub fn opponent(&self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Slot of this player in per-player arrays
    pub fn index(&self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Player::One => "one",
            Player::Two => "two",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
