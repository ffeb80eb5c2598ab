//! MCTS policies for selection and simulation.
//!
//! - `SelectionPolicy`: which fully expanded child to descend into (UCB1)
//! - `SimulationPolicy`: how to score a new leaf (random rollout)

use crate::core::{GameRng, PlayerMap};
use crate::rules::{GameResult, RulesEngine};

use super::config::MCTSConfig;
use super::node::MCTSNode;

// =============================================================================
// Selection Policy
// =============================================================================

/// Policy for selecting which child node to explore.
pub trait SelectionPolicy<M>: Send + Sync {
    /// Index of the edge to follow. Nodes passed in always have edges.
    fn select(&self, node: &MCTSNode<M>, config: &MCTSConfig) -> usize;
}

/// UCB1 (Upper Confidence Bound) selection policy.
///
/// Scores each edge from the point of view of the player to move at the
/// node: `Q(a) + c * sqrt(ln(N) / n(a))`.
#[derive(Clone, Copy, Debug, Default)]
pub struct UCB1;

impl<M> SelectionPolicy<M> for UCB1 {
    fn select(&self, node: &MCTSNode<M>, config: &MCTSConfig) -> usize {
        let ln_parent = f64::from(node.visits.max(1)).ln();
        let player = node.to_move;

        node.edges
            .iter()
            .enumerate()
            .map(|(i, edge)| {
                let score = if edge.visits == 0 {
                    f64::INFINITY
                } else {
                    edge.mean_reward(player)
                        + config.exploration * (ln_parent / f64::from(edge.visits)).sqrt()
                };
                (i, score)
            })
            .reduce(|best, cur| if cur.1 > best.1 { cur } else { best })
            .map_or(0, |(i, _)| i)
    }
}

// =============================================================================
// Simulation Policy
// =============================================================================

/// Policy for scoring a freshly expanded leaf.
pub trait SimulationPolicy<E: RulesEngine>: Send + Sync {
    /// Play out from `game`, returning a reward in `[0, 1]` per player.
    ///
    /// The game is consumed by the rollout.
    fn simulate(&self, game: &mut E, rng: &mut GameRng, max_depth: u32) -> PlayerMap<f64>;
}

/// Random rollout policy.
///
/// Plays uniformly random legal moves until the game ends. With a depth
/// limit, unfinished rollouts are scored by `RulesEngine::evaluate`.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomSimulation;

impl<E: RulesEngine> SimulationPolicy<E> for RandomSimulation {
    fn simulate(&self, game: &mut E, rng: &mut GameRng, max_depth: u32) -> PlayerMap<f64> {
        let mut depth = 0;

        loop {
            if let Some(result) = game.is_terminal() {
                return result_to_rewards(&result);
            }
            if max_depth > 0 && depth >= max_depth {
                return heuristic_rewards(game);
            }

            let moves = game.legal_moves();
            let Some(&mv) = rng.choose(&moves) else {
                return PlayerMap::with_value(0.5);
            };
            if game.apply_move(mv).is_err() {
                return heuristic_rewards(game);
            }
            depth += 1;
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Per-player rewards for a finished game.
#[must_use]
pub fn result_to_rewards(result: &GameResult) -> PlayerMap<f64> {
    PlayerMap::new(|player| result.reward(player))
}

/// Per-player heuristic values for an unfinished game.
pub fn heuristic_rewards<E: RulesEngine>(game: &E) -> PlayerMap<f64> {
    PlayerMap::new(|player| game.evaluate(player))
}
