//! Core types: players, marks, coordinates, move records, errors, RNG.
//!
//! These are shared by the board, the rules engine, and the search players.

pub mod player;
pub mod coord;
pub mod action;
pub mod error;
pub mod rng;

pub use player::{Mark, Player, PlayerMap};
pub use coord::{Cell, GlobalCoord};
pub use action::MoveRecord;
pub use error::{MoveError, SnapshotError};
pub use rng::GameRng;
