//! The full game: nine sub-boards, turn tracking, and active-board routing.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};
use tracing::{debug, info, instrument, trace};

use crate::board::{lines, BoardStatus, SubBoard};
use crate::core::{Cell, GlobalCoord, Mark, MoveError, MoveRecord, Player};

/// Status of the meta-board. Same shape as a sub-board status.
pub type MetaStatus = BoardStatus;

/// Where the player to move is allowed to play.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActiveBoard {
    /// Any unfinished sub-board.
    #[default]
    Any,
    /// The sub-board selected by the previous move's cell.
    ///
    /// If that sub-board is already decided, play relaxes to free choice
    /// for this turn only.
    Board(Cell),
}

/// Ultimate tic-tac-toe game state.
///
/// Owns its nine sub-boards exclusively. Control flows downward: a
/// placement is delegated to exactly one sub-board, then the meta status
/// is derived from the sub-boards' cached statuses.
///
/// ## Example
///
/// ```
/// use ultimate_ttt::core::{Cell, Player};
/// use ultimate_ttt::game::{ActiveBoard, UltimateGame};
///
/// let mut game = UltimateGame::new();
/// game.place_global(4, 4).unwrap();
///
/// // Cell (1, 1) was played, so O is sent to sub-board (1, 1)
/// assert_eq!(game.turn(), Player::O);
/// assert_eq!(game.active_board(), ActiveBoard::Board(Cell::CENTER));
/// assert_eq!(game.meta_legal_boards().as_slice(), &[Cell::CENTER]);
///
/// // Playing outside the forced board is rejected
/// assert!(game.place_global(0, 0).is_err());
/// assert_eq!(game.turn(), Player::O);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UltimateGame {
    /// Sub-boards in row-major meta order.
    boards: [SubBoard; 9],
    turn: Player,
    status: MetaStatus,
    active_board: ActiveBoard,
    last_move: Option<GlobalCoord>,
    /// Persistent vector so clones made during search stay O(1).
    history: Vector<MoveRecord>,
}

impl Default for UltimateGame {
    fn default() -> Self {
        Self::new()
    }
}

impl UltimateGame {
    /// Fresh game: all sub-boards empty, X to move, free choice.
    #[must_use]
    pub fn new() -> Self {
        Self {
            boards: Default::default(),
            turn: Player::X,
            status: BoardStatus::InProgress,
            active_board: ActiveBoard::Any,
            last_move: None,
            history: Vector::new(),
        }
    }

    /// Discard all state and start over.
    #[instrument(skip(self), fields(plies = self.history.len()))]
    pub fn restart(&mut self) {
        *self = Self::new();
        debug!("game restarted");
    }

    // === Commands ===

    /// Place the current player's mark at a global (row, col) in `0..9`.
    ///
    /// Rejected without mutation if the game is over, the coordinates are
    /// out of range, the forced-board rule excludes the sub-board, or the
    /// cell is taken.
    #[instrument(level = "debug", skip(self), fields(turn = %self.turn))]
    pub fn place_global(&mut self, row: usize, col: usize) -> Result<(), MoveError> {
        let coord = self
            .check_ongoing()
            .and_then(|()| GlobalCoord::new(row, col).ok_or(MoveError::OutOfBounds { row, col }));

        match coord {
            Ok(coord) => self.play(coord),
            Err(err) => {
                trace!(%err, row, col, "placement rejected");
                Err(err)
            }
        }
    }

    /// Place the current player's mark at a typed coordinate.
    pub fn play(&mut self, coord: GlobalCoord) -> Result<(), MoveError> {
        let result = self.check_ongoing().and_then(|()| self.apply(coord));
        if let Err(err) = &result {
            trace!(%err, %coord, "placement rejected");
        }
        result
    }

    fn check_ongoing(&self) -> Result<(), MoveError> {
        if self.status.is_finished() {
            Err(MoveError::GameOver)
        } else {
            Ok(())
        }
    }

    fn apply(&mut self, coord: GlobalCoord) -> Result<(), MoveError> {
        let board = coord.board();
        if !self.meta_legal_boards().contains(&board) {
            return Err(MoveError::BoardNotPlayable { board });
        }

        let player = self.turn;
        self.boards[board.index()].place_cell(coord.cell(), player)?;

        self.last_move = Some(coord);
        let ply = self.history.len() as u32 + 1;
        self.history.push_back(MoveRecord::new(player, coord, ply));
        self.update_meta_status();

        // The cell index just played selects the next board, wherever it was played
        self.active_board = ActiveBoard::Board(coord.cell());
        self.turn = player.opponent();

        debug!(%player, %coord, ply, board_status = %self.boards[board.index()].status(), "move accepted");
        if self.status.is_finished() {
            info!(status = %self.status, plies = ply, "game finished");
        }
        Ok(())
    }

    fn update_meta_status(&mut self) {
        // Only won sub-boards count as marks; drawn ones behave like empty cells
        let owners: [Option<Player>; 9] = std::array::from_fn(|i| self.boards[i].status().winner());
        let status = lines::evaluate(&owners, |i| self.boards[i].status().is_finished());
        self.status = status;
    }

    // === Legality ===

    /// Sub-boards the player to move may play in, row-major.
    ///
    /// Empty once the game is over. The forced board alone while it is
    /// still open; otherwise every unfinished sub-board.
    #[must_use]
    pub fn meta_legal_boards(&self) -> SmallVec<[Cell; 9]> {
        if self.status.is_finished() {
            return SmallVec::new();
        }

        if let ActiveBoard::Board(cell) = self.active_board {
            if self.boards[cell.index()].status().is_in_progress() {
                return smallvec![cell];
            }
        }

        Cell::all()
            .filter(|c| self.boards[c.index()].status().is_in_progress())
            .collect()
    }

    /// Every legal placement, grouped by board in `meta_legal_boards` order
    /// and row-major within each board.
    #[must_use]
    pub fn legal_global_moves(&self) -> Vec<GlobalCoord> {
        self.meta_legal_boards()
            .into_iter()
            .flat_map(|board| {
                self.boards[board.index()]
                    .legal_cells()
                    .into_iter()
                    .map(move |cell| GlobalCoord::from_parts(board, cell))
            })
            .collect()
    }

    /// Check whether a placement would be accepted.
    #[must_use]
    pub fn is_legal(&self, coord: GlobalCoord) -> bool {
        self.meta_legal_boards().contains(&coord.board()) && self.mark(coord).is_empty()
    }

    /// The sub-board the player to move is forced into, if the forced-board
    /// rule currently applies.
    #[must_use]
    pub fn forced_board(&self) -> Option<Cell> {
        match self.active_board {
            ActiveBoard::Board(cell)
                if self.status.is_in_progress() && self.boards[cell.index()].status().is_in_progress() =>
            {
                Some(cell)
            }
            _ => None,
        }
    }

    // === Queries ===

    /// Mark at a global coordinate.
    #[must_use]
    pub fn mark(&self, coord: GlobalCoord) -> Mark {
        self.boards[coord.board().index()].get(coord.cell())
    }

    /// Sub-board at a meta position.
    #[must_use]
    pub fn board(&self, board: Cell) -> &SubBoard {
        &self.boards[board.index()]
    }

    /// Status of the sub-board at a meta position.
    #[must_use]
    pub fn board_status(&self, board: Cell) -> BoardStatus {
        self.boards[board.index()].status()
    }

    /// All sub-boards with their meta positions, row-major.
    pub fn boards(&self) -> impl Iterator<Item = (Cell, &SubBoard)> {
        Cell::all().zip(self.boards.iter())
    }

    /// Overall status.
    #[must_use]
    pub fn status(&self) -> MetaStatus {
        self.status
    }

    /// Check if the game has been won or drawn.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    /// Player to move.
    #[must_use]
    pub fn turn(&self) -> Player {
        self.turn
    }

    /// Routing target set by the previous move.
    #[must_use]
    pub fn active_board(&self) -> ActiveBoard {
        self.active_board
    }

    /// Most recent placement.
    #[must_use]
    pub fn last_move(&self) -> Option<GlobalCoord> {
        self.last_move
    }

    /// Accepted moves in order.
    #[must_use]
    pub fn history(&self) -> &Vector<MoveRecord> {
        &self.history
    }

    /// Number of accepted moves.
    #[must_use]
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    /// Number of sub-boards won by a player.
    #[must_use]
    pub fn boards_won(&self, player: Player) -> usize {
        self.boards
            .iter()
            .filter(|b| b.status() == BoardStatus::WonBy(player))
            .count()
    }

    // === Snapshots ===

    /// Check that cached statuses, counters, history and routing agree
    /// with the cells.
    pub(crate) fn validate(&self) -> Result<(), String> {
        for (cell, board) in self.boards() {
            let derived = SubBoard::from_marks(*board.cells()).status();
            if derived != board.status() {
                return Err(format!(
                    "sub-board {} caches {} but cells give {}",
                    cell,
                    board.status(),
                    derived
                ));
            }
        }

        let mut derived = self.clone();
        derived.update_meta_status();
        if derived.status != self.status {
            return Err(format!("meta status {} should be {}", self.status, derived.status));
        }

        let count = |m: Mark| {
            self.boards
                .iter()
                .flat_map(|b| b.cells().iter())
                .filter(|&&c| c == m)
                .count()
        };
        let (xs, os) = (count(Mark::X), count(Mark::O));
        let expected_turn = if xs == os {
            Player::X
        } else if xs == os + 1 {
            Player::O
        } else {
            return Err(format!("{} X marks against {} O marks", xs, os));
        };
        if expected_turn != self.turn {
            return Err(format!("turn is {} but marks imply {}", self.turn, expected_turn));
        }

        if self.history.len() != xs + os {
            return Err(format!("history has {} moves for {} marks", self.history.len(), xs + os));
        }

        // Each record names a distinct cell holding its player's mark, X first
        let mut seen = [false; 81];
        let mut board_last: [Option<Cell>; 9] = [None; 9];
        for (i, record) in self.history.iter().enumerate() {
            let expected = if i % 2 == 0 { Player::X } else { Player::O };
            if record.player != expected || record.ply as usize != i + 1 {
                return Err(format!("history entry {} is out of order", i + 1));
            }
            let slot = &mut seen[record.coord.row() * 9 + record.coord.col()];
            if *slot || self.mark(record.coord) != Mark::from(record.player) {
                return Err(format!("history entry {} does not match the cells", i + 1));
            }
            *slot = true;
            board_last[record.coord.board().index()] = Some(record.coord.cell());
        }

        for (cell, board) in self.boards() {
            if board.last_move() != board_last[cell.index()] {
                return Err(format!("sub-board {} last move does not match history", cell));
            }
        }
        if self.last_move != self.history.last().map(|r| r.coord) {
            return Err("last move does not match history".to_string());
        }
        let expected_active = self
            .last_move
            .map_or(ActiveBoard::Any, |g| ActiveBoard::Board(g.cell()));
        if self.active_board != expected_active {
            return Err("active board does not follow the last move".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
impl UltimateGame {
    pub(crate) fn force_status_for_test(&mut self, status: MetaStatus) {
        self.status = status;
    }

    pub(crate) fn force_active_board_for_test(&mut self, active_board: ActiveBoard) {
        self.active_board = active_board;
    }
}

impl std::fmt::Display for UltimateGame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..9 {
            if row == 3 || row == 6 {
                writeln!(f, "----+-----+----")?;
            }
            for col in 0..9 {
                if col == 3 || col == 6 {
                    write!(f, " | ")?;
                }
                // Both indices are < 9
                if let Some(coord) = GlobalCoord::new(row, col) {
                    write!(f, "{}", self.mark(coord))?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "{} to move, {}", self.turn, self.status)
    }
}
