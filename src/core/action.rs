//! Move records for history tracking.
//!
//! Used for:
//! - Replay and debugging
//! - Last-move queries from a host
//! - Search diagnostics

use serde::{Deserialize, Serialize};

use super::coord::GlobalCoord;
use super::player::Player;

/// An accepted placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveRecord {
    /// The player who moved.
    pub player: Player,

    /// Where the mark was placed.
    pub coord: GlobalCoord,

    /// 1-based ply number (X's first move is ply 1).
    pub ply: u32,
}

impl MoveRecord {
    /// Create a new move record.
    #[must_use]
    pub fn new(player: Player, coord: GlobalCoord, ply: u32) -> Self {
        Self { player, coord, ply }
    }
}

impl std::fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}. {} {}", self.ply, self.player, self.coord)
    }
}
