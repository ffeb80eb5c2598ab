//! A single 3×3 grid with self-contained win/draw detection.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Cell, Mark, MoveError, Player};

use super::lines;
use super::status::BoardStatus;

/// One of the nine inner grids.
///
/// The status is cached and recomputed once per accepted placement, never
/// on read.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubBoard {
    cells: [Mark; 9],
    status: BoardStatus,
    last_move: Option<Cell>,
}

impl SubBoard {
    /// Create an empty sub-board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a sub-board from its cells, deriving the status.
    #[must_use]
    pub fn from_marks(cells: [Mark; 9]) -> Self {
        let mut board = Self {
            cells,
            status: BoardStatus::InProgress,
            last_move: None,
        };
        board.update_status();
        board
    }

    /// Place a mark at (row, col).
    ///
    /// Rejected without mutation if the board is decided, the cell is
    /// taken, or the coordinates are outside `0..3`.
    pub fn place(&mut self, row: usize, col: usize, player: Player) -> Result<(), MoveError> {
        let cell = Cell::new(row, col).ok_or(MoveError::OutOfBounds { row, col })?;
        self.place_cell(cell, player)
    }

    /// Place a mark at a typed cell.
    pub fn place_cell(&mut self, cell: Cell, player: Player) -> Result<(), MoveError> {
        if self.status.is_finished() {
            return Err(MoveError::BoardClosed);
        }
        if !self.cells[cell.index()].is_empty() {
            return Err(MoveError::CellOccupied { cell });
        }

        self.cells[cell.index()] = Mark::from(player);
        self.last_move = Some(cell);
        self.update_status();
        Ok(())
    }

    /// Every empty cell in row-major order, or nothing once decided.
    #[must_use]
    pub fn legal_cells(&self) -> SmallVec<[Cell; 9]> {
        if self.status.is_finished() {
            return SmallVec::new();
        }
        Cell::all().filter(|c| self.cells[c.index()].is_empty()).collect()
    }

    /// Mark at a cell.
    #[inline]
    #[must_use]
    pub fn get(&self, cell: Cell) -> Mark {
        self.cells[cell.index()]
    }

    /// All cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[Mark; 9] {
        &self.cells
    }

    /// Cached status.
    #[inline]
    #[must_use]
    pub fn status(&self) -> BoardStatus {
        self.status
    }

    /// Most recent placement on this board.
    #[must_use]
    pub fn last_move(&self) -> Option<Cell> {
        self.last_move
    }

    /// Number of filled cells.
    #[must_use]
    pub fn filled(&self) -> usize {
        self.cells.iter().filter(|m| !m.is_empty()).count()
    }

    fn update_status(&mut self) {
        let owners = self.cells.map(Mark::player);
        self.status = lines::evaluate(&owners, |i| owners[i].is_some());
    }
}

impl std::fmt::Display for SubBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                write!(f, "{}", self.cells[row * 3 + col])?;
            }
            if row < 2 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
