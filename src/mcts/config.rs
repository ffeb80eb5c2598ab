//! MCTS configuration parameters.

use serde::{Deserialize, Serialize};

/// MCTS configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MCTSConfig {
    /// UCB1 exploration constant (default: sqrt(2)).
    /// Higher values favor exploration over exploitation.
    pub exploration: f64,

    /// Maximum tree depth (0 = unlimited).
    /// Rollouts past this depth are cut short and scored by the heuristic.
    pub max_depth: u32,

    /// Maximum nodes to allocate in the tree.
    pub max_nodes: usize,

    /// Random seed for expansion order and rollouts.
    /// Same seed produces deterministic searches.
    pub seed: u64,

    /// Temperature for the final move choice (0 = most visited).
    pub temperature: f64,

    /// Iterations run per move when used as a strategy.
    pub iterations: u32,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        Self {
            exploration: std::f64::consts::SQRT_2,
            max_depth: 0,
            max_nodes: 100_000,
            seed: 42,
            temperature: 0.0,
            iterations: 1_000,
        }
    }
}

impl MCTSConfig {
    /// Set the exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }

    /// Set the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the max tree depth.
    pub fn with_max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set the node budget.
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// Set the final-choice temperature.
    pub fn with_temperature(mut self, temp: f64) -> Self {
        self.temperature = temp;
        self
    }

    /// Set iterations per move.
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }
}
