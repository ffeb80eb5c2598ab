//! Monte Carlo Tree Search over any `RulesEngine`.
//!
//! ## Overview
//!
//! - **Full information**: both players are expanded in the tree, each
//!   choosing edges by their own reward
//! - **Arena tree**: nodes indexed by `NodeId`, serializable
//! - **Configurable policies**: selection (UCB1) and simulation (random rollout)
//! - **Deterministic**: a fixed seed gives the same search
//!
//! ## Usage
//!
//! ```rust
//! use ultimate_ttt::game::UltimateGame;
//! use ultimate_ttt::mcts::{MCTSConfig, MCTSSearch};
//!
//! let game = UltimateGame::new();
//! let mut search = MCTSSearch::new(MCTSConfig::default().with_seed(1));
//!
//! let mv = search.search(&game, 200).unwrap();
//! assert!(game.is_legal(mv));
//!
//! let probs = search.action_probabilities();
//! assert_eq!(probs.len(), 81);
//! ```

pub mod config;
pub mod node;
pub mod policy;
pub mod search;
pub mod stats;
pub mod tree;

pub use config::MCTSConfig;
pub use node::{Edge, MCTSNode, NodeId};
pub use policy::{RandomSimulation, SelectionPolicy, SimulationPolicy, UCB1};
pub use search::MCTSSearch;
pub use stats::SearchStats;
pub use tree::{MCTSTree, TreeStats};
