//! Rules engine trait for game implementations.
//!
//! Search players call into `RulesEngine` and never interpret
//! game-specific concepts directly.

pub mod engine;

pub use engine::{GameResult, RulesEngine};
