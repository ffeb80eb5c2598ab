//! Outcome of a 3×3 grid.

use serde::{Deserialize, Serialize};

use crate::core::Player;

/// Status of a sub-board, or of the meta-board.
///
/// Monotonic: once a grid leaves `InProgress` it never changes again.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardStatus {
    /// Still accepting moves.
    #[default]
    InProgress,
    /// Three in a line for this player.
    WonBy(Player),
    /// Full with no line.
    Draw,
}

impl BoardStatus {
    /// Check if the grid still accepts moves.
    #[must_use]
    pub const fn is_in_progress(self) -> bool {
        matches!(self, BoardStatus::InProgress)
    }

    /// Check if the grid is decided (won or drawn).
    #[must_use]
    pub const fn is_finished(self) -> bool {
        !self.is_in_progress()
    }

    /// The winner, if any.
    #[must_use]
    pub const fn winner(self) -> Option<Player> {
        match self {
            BoardStatus::WonBy(player) => Some(player),
            _ => None,
        }
    }
}

impl std::fmt::Display for BoardStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoardStatus::InProgress => write!(f, "in progress"),
            BoardStatus::WonBy(player) => write!(f, "won by {}", player),
            BoardStatus::Draw => write!(f, "draw"),
        }
    }
}
