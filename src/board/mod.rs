//! Sub-boards: the leaf level of the game.
//!
//! A `SubBoard` knows nothing about the outer game. It validates
//! placements on its own nine cells and caches its `BoardStatus`.

pub mod lines;
pub mod status;
pub mod sub_board;

pub use status::BoardStatus;
pub use sub_board::SubBoard;
