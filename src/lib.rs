//! # ultimate-ttt
//!
//! Rules engine for ultimate (nested) tic-tac-toe, with pluggable search
//! players.
//!
//! Nine 3×3 sub-boards sit on a 3×3 meta-board. Winning a sub-board claims
//! the matching meta cell, and three claimed cells in a line win the game.
//! The cell a player picks inside a sub-board decides which sub-board the
//! opponent must play in next.
//!
//! ## Design Principles
//!
//! 1. **Ownership flows down**: `UltimateGame` owns nine `SubBoard`s; a move
//!    is delegated to exactly one of them and status is re-derived upward.
//!
//! 2. **Rejections are values**: every illegal move returns a `MoveError`
//!    and leaves the game untouched.
//!
//! 3. **Search-agnostic rules**: the game implements `RulesEngine`; minimax
//!    and MCTS only see that trait.
//!
//! ## Modules
//!
//! - `core`: Players, marks, coordinates, move records, errors, RNG
//! - `board`: Sub-boards, line detection, board status
//! - `game`: The full game, its `RulesEngine` impl, and snapshots
//! - `rules`: RulesEngine trait for search players
//! - `strategy`: Move selection for computer seats (random, minimax)
//! - `mcts`: Monte Carlo Tree Search
//! - `session`: Human/computer seats around one game
//!
//! ```
//! use ultimate_ttt::{Cell, MetaStatus, UltimateGame};
//!
//! let mut game = UltimateGame::new();
//! game.place_global(4, 4).unwrap();
//!
//! assert_eq!(game.forced_board(), Some(Cell::CENTER));
//! assert_eq!(game.status(), MetaStatus::InProgress);
//! ```

pub mod core;
pub mod board;
pub mod game;
pub mod rules;
pub mod strategy;
pub mod mcts;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Cell, GlobalCoord, Mark, Player, PlayerMap,
    MoveRecord, MoveError, SnapshotError,
    GameRng,
};

pub use crate::board::{BoardStatus, SubBoard};

pub use crate::game::{ActiveBoard, MetaStatus, UltimateGame};

pub use crate::rules::{GameResult, RulesEngine};

pub use crate::strategy::{
    FirstLegal, Minimax, MinimaxConfig, Strategy, StrategyKind, UniformRandom,
};

pub use crate::mcts::{MCTSConfig, MCTSSearch, SearchStats};

pub use crate::session::{Seat, SeatConfig, Session, SessionConfig};
