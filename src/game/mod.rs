//! The root level: nine sub-boards on a meta-board.
//!
//! `UltimateGame` holds turn order, forced-board routing, and the meta
//! status. It implements `RulesEngine`, so any search player can drive it.

mod engine;
mod snapshot;
pub mod ultimate;

pub use ultimate::{ActiveBoard, MetaStatus, UltimateGame};
