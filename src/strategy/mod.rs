//! Pluggable move selection for computer-controlled seats.
//!
//! A `Strategy` receives the game and the list of legal moves and returns one
//! member of that list, or `None` when the list is empty. Strategies only
//! read the game; the caller applies the move.
//!
//! ```
//! use ultimate_ttt::game::UltimateGame;
//! use ultimate_ttt::strategy::{Strategy, StrategyKind};
//!
//! let game = UltimateGame::new();
//! let legal = game.legal_global_moves();
//!
//! let mut random = StrategyKind::Random.build(7);
//! let mv = random.choose_move(&game, &legal).unwrap();
//! assert!(legal.contains(&mv));
//! ```

pub mod minimax;
pub mod random;

use serde::{Deserialize, Serialize};

use crate::game::UltimateGame;
use crate::mcts::{MCTSConfig, MCTSSearch};
use crate::rules::RulesEngine;

pub use minimax::{Minimax, MinimaxConfig, MinimaxStats};
pub use random::{FirstLegal, UniformRandom};

/// Chooses a move for the player to move.
pub trait Strategy<E: RulesEngine>: Send {
    /// Pick one of `legal`, or `None` if it is empty.
    fn choose_move(&mut self, game: &E, legal: &[E::Move]) -> Option<E::Move>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// Serializable description of a strategy, used by session configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum StrategyKind {
    /// Uniform over legal moves.
    #[default]
    Random,
    /// Always the first legal move.
    FirstLegal,
    /// Alpha-beta search.
    Minimax(MinimaxConfig),
    /// Monte Carlo tree search.
    Mcts(MCTSConfig),
}

impl StrategyKind {
    /// Build the strategy. `seed` drives `Random`; the search strategies
    /// use the seed in their own config.
    #[must_use]
    pub fn build(&self, seed: u64) -> Box<dyn Strategy<UltimateGame>> {
        match self {
            StrategyKind::Random => Box::new(UniformRandom::new(seed)),
            StrategyKind::FirstLegal => Box::new(FirstLegal),
            StrategyKind::Minimax(config) => Box::new(Minimax::new(config.clone())),
            StrategyKind::Mcts(config) => Box::new(MCTSSearch::<UltimateGame>::new(config.clone())),
        }
    }
}
