// Immutable Isolation board snapshot
//
// Every move produces a brand-new Board through `forecast`; a Board is never
// mutated once built, so search branches can own their states outright.

use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::error::Error;
use std::fmt;

use crate::eval::{Score, LOSS, WIN};
use crate::types::{Move, Player};

/// Knight-step offsets in generation order. Search relies on this order for
/// its first-legal-move fallback and its ties-keep-first tie-break.
pub const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Contract violations raised by board construction and forecasting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// The move is not in `legal_moves` of the active player
    IllegalMove { player: Player, attempted: Move },
    /// A cell handed to a constructor lies outside the grid
    OutOfBounds { cell: Move },
    /// Width or height is not strictly positive, or the grid is too large
    InvalidDimensions { width: i32, height: i32 },
    /// Both players were placed on the same cell
    SharedCell { cell: Move },
    /// The blocked-cell grid does not have width * height entries
    GridSizeMismatch { expected: usize, actual: usize },
    /// A player stands on a cell that is not marked blocked
    UnblockedOccupant { cell: Move },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::IllegalMove { player, attempted } => {
                write!(f, "illegal move {} for player {}", attempted, player)
            }
            BoardError::OutOfBounds { cell } => write!(f, "cell {} is outside the board", cell),
            BoardError::InvalidDimensions { width, height } => {
                write!(f, "invalid board dimensions {}x{}", width, height)
            }
            BoardError::SharedCell { cell } => {
                write!(f, "both players cannot occupy cell {}", cell)
            }
            BoardError::GridSizeMismatch { expected, actual } => {
                write!(f, "expected {} grid cells, found {}", expected, actual)
            }
            BoardError::UnblockedOccupant { cell } => {
                write!(f, "occupied cell {} is not blocked", cell)
            }
        }
    }
}

impl Error for BoardError {}

/// Snapshot of an Isolation game: grid size, blocked cells, both player
/// locations and whose turn it is. Occupied and visited cells stay blocked.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    width: i32,
    height: i32,
    /// Row-major: index = row * width + col
    blocked: Vec<bool>,
    /// `None` until the player has been placed
    locations: [Option<Move>; 2],
    active: Player,
    move_count: u32,
}

/// Wire shape of a `Board`, checked before it becomes one
#[derive(Deserialize)]
struct RawBoard {
    width: i32,
    height: i32,
    blocked: Vec<bool>,
    locations: [Option<Move>; 2],
    active: Player,
    move_count: u32,
}

impl TryFrom<RawBoard> for Board {
    type Error = BoardError;

    fn try_from(raw: RawBoard) -> Result<Self, Self::Error> {
        let board = Board {
            width: raw.width,
            height: raw.height,
            blocked: raw.blocked,
            locations: raw.locations,
            active: raw.active,
            move_count: raw.move_count,
        };
        board.validate()?;
        Ok(board)
    }
}

/// Number of cells in a `width` x `height` grid, if it is non-empty and fits
fn grid_cells(width: i32, height: i32) -> Result<usize, BoardError> {
    if width <= 0 || height <= 0 {
        return Err(BoardError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .map(|cells| cells as usize)
        .ok_or(BoardError::InvalidDimensions { width, height })
}

impl Board {
    /// Creates an empty board with player One to move first
    pub fn new(width: i32, height: i32) -> Result<Self, BoardError> {
        let cells = grid_cells(width, height)?;

        Ok(Board {
            width,
            height,
            blocked: vec![false; cells],
            locations: [None, None],
            active: Player::One,
            move_count: 0,
        })
    }

    /// Builds a mid-game snapshot with both players already placed.
    /// Player cells are blocked in addition to `blocked`.
    pub fn with_positions(
        width: i32,
        height: i32,
        blocked: &[Move],
        one: Move,
        two: Move,
        active: Player,
    ) -> Result<Self, BoardError> {
        let mut board = Board::new(width, height)?;

        if one == two {
            return Err(BoardError::SharedCell { cell: one });
        }

        for &cell in blocked.iter().chain([one, two].iter()) {
            let idx = board
                .cell_index(cell)
                .ok_or(BoardError::OutOfBounds { cell })?;
            board.blocked[idx] = true;
        }

        board.locations = [Some(one), Some(two)];
        board.active = active;
        board.move_count = (blocked.len() + 2) as u32;
        board.validate()?;
        Ok(board)
    }

    /// Checks the invariants every constructor must leave behind: the grid
    /// matches the dimensions, and placed players stand on distinct, in-bounds,
    /// blocked cells.
    fn validate(&self) -> Result<(), BoardError> {
        let expected = grid_cells(self.width, self.height)?;
        if self.blocked.len() != expected {
            return Err(BoardError::GridSizeMismatch {
                expected,
                actual: self.blocked.len(),
            });
        }

        if let [Some(one), Some(two)] = self.locations {
            if one == two {
                return Err(BoardError::SharedCell { cell: one });
            }
        }

        for &cell in self.locations.iter().flatten() {
            let idx = self
                .cell_index(cell)
                .ok_or(BoardError::OutOfBounds { cell })?;
            if !self.blocked[idx] {
                return Err(BoardError::UnblockedOccupant { cell });
            }
        }
        Ok(())
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn active_player(&self) -> Player {
        self.active
    }

    pub fn inactive_player(&self) -> Player {
        self.active.opponent()
    }

    pub fn opponent_of(&self, player: Player) -> Player {
        player.opponent()
    }

    /// Current cell of `player`, or `None` before it has been placed
    pub fn location_of(&self, player: Player) -> Option<Move> {
        self.locations[player.index()]
    }

    /// Number of plies applied since the empty board
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    fn cell_index(&self, cell: Move) -> Option<usize> {
        if cell.row < 0 || cell.row >= self.height || cell.col < 0 || cell.col >= self.width {
            return None;
        }
        Some((cell.row * self.width + cell.col) as usize)
    }

    /// Out-of-bounds cells count as blocked
    pub fn is_blocked(&self, cell: Move) -> bool {
        match self.cell_index(cell) {
            Some(idx) => self.blocked.get(idx).copied().unwrap_or(true),
            None => true,
        }
    }

    /// Every unblocked cell, columns outer and rows inner
    pub fn blank_spaces(&self) -> Vec<Move> {
        let mut spaces = Vec::new();
        for col in 0..self.width {
            for row in 0..self.height {
                let cell = Move::new(row, col);
                if !self.is_blocked(cell) {
                    spaces.push(cell);
                }
            }
        }
        spaces
    }

    /// Legal destinations for `player` in fixed generation order.
    /// An unplaced player may move to any blank cell.
    pub fn legal_moves(&self, player: Player) -> Vec<Move> {
        match self.location_of(player) {
            None => self.blank_spaces(),
            Some(origin) => KNIGHT_OFFSETS
                .iter()
                .map(|&(d_row, d_col)| origin.offset(d_row, d_col))
                .filter(|&dest| !self.is_blocked(dest))
                .collect(),
        }
    }

    /// Legal moves of the player whose turn it is
    pub fn active_moves(&self) -> Vec<Move> {
        self.legal_moves(self.active)
    }

    /// Returns the successor state after the active player moves to `mv`.
    /// The receiver is left untouched.
    pub fn forecast(&self, mv: Move) -> Result<Board, BoardError> {
        if !self.active_moves().contains(&mv) {
            return Err(BoardError::IllegalMove {
                player: self.active,
                attempted: mv,
            });
        }

        let mut next = self.clone();
        let slot = self.active.index();

        // Origin is already blocked from when it was entered
        if let Some(origin) = next.locations[slot] {
            if let Some(idx) = next.cell_index(origin) {
                next.blocked[idx] = true;
            }
        }
        if let Some(idx) = next.cell_index(mv) {
            next.blocked[idx] = true;
        }

        next.locations[slot] = Some(mv);
        next.active = self.active.opponent();
        next.move_count += 1;
        Ok(next)
    }

    /// The active player has no legal move
    pub fn is_terminal(&self) -> bool {
        self.active_moves().is_empty()
    }

    /// `player` is to move and cannot
    pub fn is_loser(&self, player: Player) -> bool {
        player == self.active && self.is_terminal()
    }

    /// `player`'s opponent is to move and cannot
    pub fn is_winner(&self, player: Player) -> bool {
        player == self.inactive_player() && self.is_terminal()
    }

    /// Game-theoretic value of a finished game for `player`; 0.0 while in progress
    pub fn utility(&self, player: Player) -> Score {
        if self.is_loser(player) {
            LOSS
        } else if self.is_winner(player) {
            WIN
        } else {
            0.0
        }
    }
}
