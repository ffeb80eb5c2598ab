//! Per-search counters, reset at the start of every search.

use serde::{Deserialize, Serialize};

/// Statistics collected during one MCTS search.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Iterations performed.
    pub iterations: u32,

    /// Nodes whose edges were generated.
    pub nodes_expanded: u32,

    /// Rollouts performed.
    pub simulations: u32,

    /// Iterations that ended on an already-terminal node.
    pub terminal_hits: u32,

    /// Deepest node created.
    pub max_depth: u16,

    /// Wall time spent searching (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    /// Reset all counters to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Iterations per second of wall time.
    #[must_use]
    pub fn iterations_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            f64::from(self.iterations) / (self.time_us as f64 / 1_000_000.0)
        }
    }

    /// Share of iterations that reached a rollout.
    #[must_use]
    pub fn simulation_ratio(&self) -> f64 {
        if self.iterations == 0 {
            0.0
        } else {
            f64::from(self.simulations) / f64::from(self.iterations)
        }
    }
}
