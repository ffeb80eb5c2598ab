//! Rules engine trait for two-player, perfect-information games.
//!
//! Games implement `RulesEngine` to define:
//! - Whose turn it is and what moves are legal
//! - How a move changes the game
//! - Win/draw conditions and a heuristic value for unfinished positions

use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::board::BoardStatus;
use crate::core::{MoveError, Player};

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(Player),
    /// No winner.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: Player) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }

    /// Terminal reward for a player: 1 for a win, 0 for a loss, 0.5 for a draw.
    #[must_use]
    pub fn reward(&self, player: Player) -> f64 {
        match self {
            GameResult::Winner(p) if *p == player => 1.0,
            GameResult::Winner(_) => 0.0,
            GameResult::Draw => 0.5,
        }
    }

    /// Convert a grid status, `None` while still in progress.
    #[must_use]
    pub fn from_status(status: BoardStatus) -> Option<Self> {
        match status {
            BoardStatus::InProgress => None,
            BoardStatus::WonBy(player) => Some(GameResult::Winner(player)),
            BoardStatus::Draw => Some(GameResult::Draw),
        }
    }
}

/// Rules engine trait.
///
/// The game value itself is the state; search players clone it to explore.
///
/// ## Implementation Notes
///
/// - `legal_moves`: Deterministic order; empty iff the game is over
/// - `apply_move`: Must leave the game untouched on error
/// - `evaluate`: Value in `[0, 1]` from `player`'s point of view
/// - `position_key`: Equal for positions with equal futures
pub trait RulesEngine: Clone {
    /// A single move.
    type Move: Copy + Eq + Hash + Debug + Send + Sync;

    /// Player to move.
    fn to_move(&self) -> Player;

    /// All legal moves for the player to move.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Apply a move for the player to move.
    fn apply_move(&mut self, mv: Self::Move) -> Result<(), MoveError>;

    /// Check if the game is over.
    ///
    /// Returns `Some(result)` if the game has ended, `None` if it continues.
    fn is_terminal(&self) -> Option<GameResult>;

    /// Heuristic value of the position for `player`.
    ///
    /// Default: terminal reward, or 0.5 while the game continues.
    fn evaluate(&self, player: Player) -> f64 {
        self.is_terminal().map_or(0.5, |result| result.reward(player))
    }

    /// Hash of everything that affects future play.
    fn position_key(&self) -> u64;
}
