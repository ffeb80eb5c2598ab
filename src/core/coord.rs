//! Coordinate types for the two levels of the board.
//!
//! ## Layout
//!
//! - `Cell`: a (row, col) pair in `0..3`. Addresses a cell inside one
//!   sub-board, and also a sub-board's position on the meta-board.
//! - `GlobalCoord`: a (row, col) pair in `0..9` over the whole 9×9 surface.
//!
//! The two are related by `global = 3 * board + cell` on each axis:
//!
//! ```
//! use ultimate_ttt::core::{Cell, GlobalCoord};
//!
//! let g = GlobalCoord::new(4, 7).unwrap();
//! assert_eq!(g.board(), Cell::new(1, 2).unwrap());
//! assert_eq!(g.cell(), Cell::new(1, 1).unwrap());
//! assert_eq!(GlobalCoord::from_parts(g.board(), g.cell()), g);
//! ```

use serde::{Deserialize, Serialize};

use super::error::MoveError;

/// A position on a 3×3 grid, row-major.
///
/// Serialized as a `(row, col)` pair; decoding rejects values outside `0..3`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "(u8, u8)", into = "(u8, u8)")]
pub struct Cell {
    row: u8,
    col: u8,
}

impl Cell {
    /// The centre cell.
    pub const CENTER: Cell = Cell { row: 1, col: 1 };

    /// Create a cell, or `None` if either coordinate is outside `0..3`.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Option<Self> {
        if row < 3 && col < 3 {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Build from a row-major index in `0..9`.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < 9 {
            Self::new(index / 3, index % 3)
        } else {
            None
        }
    }

    /// Row in `0..3`.
    #[inline]
    #[must_use]
    pub const fn row(self) -> usize {
        self.row as usize
    }

    /// Column in `0..3`.
    #[inline]
    #[must_use]
    pub const fn col(self) -> usize {
        self.col as usize
    }

    /// Row-major index in `0..9`.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.row as usize * 3 + self.col as usize
    }

    /// All nine cells in row-major order.
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..9u8).map(|i| Cell { row: i / 3, col: i % 3 })
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl TryFrom<(u8, u8)> for Cell {
    type Error = MoveError;

    fn try_from((row, col): (u8, u8)) -> Result<Self, Self::Error> {
        let (row, col) = (usize::from(row), usize::from(col));
        Cell::new(row, col).ok_or(MoveError::OutOfBounds { row, col })
    }
}

impl From<Cell> for (u8, u8) {
    fn from(cell: Cell) -> Self {
        (cell.row, cell.col)
    }
}

/// A position on the full 9×9 surface.
///
/// Serialized as a `(row, col)` pair; decoding rejects values outside `0..9`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "(u8, u8)", into = "(u8, u8)")]
pub struct GlobalCoord {
    row: u8,
    col: u8,
}

impl GlobalCoord {
    /// Create a coordinate, or `None` if either value is outside `0..9`.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Option<Self> {
        if row < 9 && col < 9 {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Compose from a sub-board position and a cell within it.
    #[must_use]
    pub const fn from_parts(board: Cell, cell: Cell) -> Self {
        Self {
            row: board.row * 3 + cell.row,
            col: board.col * 3 + cell.col,
        }
    }

    /// Global row in `0..9`.
    #[inline]
    #[must_use]
    pub const fn row(self) -> usize {
        self.row as usize
    }

    /// Global column in `0..9`.
    #[inline]
    #[must_use]
    pub const fn col(self) -> usize {
        self.col as usize
    }

    /// The sub-board this coordinate falls in.
    #[must_use]
    pub const fn board(self) -> Cell {
        Cell {
            row: self.row / 3,
            col: self.col / 3,
        }
    }

    /// The cell within that sub-board.
    #[must_use]
    pub const fn cell(self) -> Cell {
        Cell {
            row: self.row % 3,
            col: self.col % 3,
        }
    }

    /// All 81 coordinates in global row-major order.
    pub fn all() -> impl Iterator<Item = GlobalCoord> {
        (0..81u8).map(|i| GlobalCoord { row: i / 9, col: i % 9 })
    }
}

impl std::fmt::Display for GlobalCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl TryFrom<(u8, u8)> for GlobalCoord {
    type Error = MoveError;

    fn try_from((row, col): (u8, u8)) -> Result<Self, Self::Error> {
        let (row, col) = (usize::from(row), usize::from(col));
        GlobalCoord::new(row, col).ok_or(MoveError::OutOfBounds { row, col })
    }
}

impl From<GlobalCoord> for (u8, u8) {
    fn from(coord: GlobalCoord) -> Self {
        (coord.row, coord.col)
    }
}
