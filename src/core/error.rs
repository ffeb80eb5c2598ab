//! Error types.
//!
//! Every rejected command is an ordinary outcome, reported through
//! `MoveError`. A rejected command never mutates the game.

use derive_more::{Display, Error, From};

use super::coord::Cell;
use super::player::Player;

/// Why a placement was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// Coordinate outside the addressed grid.
    #[display("coordinate ({row}, {col}) is out of bounds")]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// The game has already been won or drawn.
    #[display("game is already over")]
    GameOver,

    /// The forced-board rule does not allow this sub-board.
    #[display("sub-board {board} is not playable this turn")]
    BoardNotPlayable {
        /// Sub-board that was targeted.
        board: Cell,
    },

    /// The sub-board has already been won or drawn.
    #[display("sub-board is already decided")]
    BoardClosed,

    /// The cell already holds a mark.
    #[display("cell {cell} is already occupied")]
    CellOccupied {
        /// Cell within the sub-board.
        cell: Cell,
    },

    /// The player to move is controlled by a strategy, not by the caller.
    #[display("it is not a human turn ({player} is computer-controlled)")]
    NotYourTurn {
        /// Player whose turn it is.
        player: Player,
    },

    /// A strategy had no move to offer.
    #[display("strategy returned no move")]
    NoLegalMove,
}

/// Failure to restore a game from a snapshot.
#[derive(Debug, Display, Error, From)]
pub enum SnapshotError {
    /// The bytes could not be encoded or decoded.
    #[display("snapshot codec error: {_0}")]
    #[from]
    Codec(bincode::Error),

    /// Decoded state violates a board invariant.
    #[display("snapshot is inconsistent: {_0}")]
    Inconsistent(#[error(not(source))] String),
}
