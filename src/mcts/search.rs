//! Core MCTS search algorithm.
//!
//! Full-information UCT: every node is expanded for whichever player is to
//! move there, and each player picks edges that maximize their own reward.

use std::time::Instant;

use tracing::{debug, instrument, warn};

use crate::core::{GameRng, PlayerMap};
use crate::rules::RulesEngine;
use crate::strategy::Strategy;

use super::config::MCTSConfig;
use super::node::{Edge, MCTSNode, NodeId};
use super::policy::{
    heuristic_rewards, result_to_rewards, RandomSimulation, SelectionPolicy, SimulationPolicy,
    UCB1,
};
use super::stats::SearchStats;
use super::tree::MCTSTree;

/// Main MCTS search context.
///
/// Generic over the rules engine type. Owns the search tree, RNG, and
/// policies; the game to search is passed to each call.
pub struct MCTSSearch<E: RulesEngine> {
    config: MCTSConfig,
    tree: MCTSTree<E::Move>,
    rng: GameRng,
    selection: Box<dyn SelectionPolicy<E::Move>>,
    simulation: Box<dyn SimulationPolicy<E>>,
    stats: SearchStats,
}

impl<E: RulesEngine> MCTSSearch<E> {
    /// Create a new MCTS search context.
    pub fn new(config: MCTSConfig) -> Self {
        let rng = GameRng::new(config.seed);
        let capacity = config.max_nodes.min(4096);

        Self {
            config,
            tree: MCTSTree::with_capacity(crate::core::Player::X, capacity),
            rng,
            selection: Box::new(UCB1),
            simulation: Box::new(RandomSimulation),
            stats: SearchStats::default(),
        }
    }

    /// Set a custom selection policy.
    pub fn with_selection<S: SelectionPolicy<E::Move> + 'static>(mut self, selection: S) -> Self {
        self.selection = Box::new(selection);
        self
    }

    /// Set a custom simulation policy.
    pub fn with_simulation<S: SimulationPolicy<E> + 'static>(mut self, simulation: S) -> Self {
        self.simulation = Box::new(simulation);
        self
    }

    /// Run MCTS from `game` over all of its legal moves.
    ///
    /// Returns `None` only when the game is over.
    pub fn search(&mut self, game: &E, iterations: u32) -> Option<E::Move> {
        let legal = game.legal_moves();
        self.search_moves(game, &legal, iterations)
    }

    /// Run MCTS with the root restricted to `legal`.
    ///
    /// The returned move is always a member of `legal`.
    #[instrument(skip_all, fields(moves = legal.len(), iterations = iterations))]
    pub fn search_moves(&mut self, game: &E, legal: &[E::Move], iterations: u32) -> Option<E::Move> {
        let start = Instant::now();
        self.stats.reset();
        self.tree.reset(game.to_move());

        if legal.is_empty() || game.is_terminal().is_some() {
            return None;
        }
        if legal.len() == 1 {
            return Some(legal[0]);
        }

        let root = self.tree.root();
        self.tree
            .get_mut(root)
            .edges
            .extend(legal.iter().map(|&mv| Edge::new(mv)));
        self.stats.nodes_expanded += 1;

        for _ in 0..iterations {
            let mut sim = game.clone();
            self.iteration(&mut sim);
            self.stats.iterations += 1;

            if self.tree.len() >= self.config.max_nodes {
                break;
            }
        }

        self.stats.time_us = start.elapsed().as_micros() as u64;
        debug!(
            iterations = self.stats.iterations,
            simulations = self.stats.simulations,
            nodes = self.tree.len(),
            max_depth = self.stats.max_depth,
            time_us = self.stats.time_us,
            "mcts search finished"
        );

        self.best_move()
    }

    /// Single MCTS iteration: select, expand, simulate, backpropagate.
    fn iteration(&mut self, game: &mut E) {
        let mut path: Vec<(NodeId, usize)> = Vec::new();
        let mut current = self.tree.root();

        loop {
            let node = self.tree.get(current);

            if node.is_terminal {
                let rewards = node.terminal_reward.unwrap_or(PlayerMap::with_value(0.5));
                self.stats.terminal_hits += 1;
                self.backpropagate(&path, rewards);
                return;
            }

            if self.config.max_depth > 0 && u32::from(node.depth) >= self.config.max_depth {
                let rewards = heuristic_rewards(game);
                self.backpropagate(&path, rewards);
                return;
            }

            if node.edges.is_empty() {
                self.backpropagate(&path, PlayerMap::with_value(0.5));
                return;
            }

            let expanding = node.has_unexpanded();
            let edge_idx = if expanding {
                self.select_unexpanded(current)
            } else {
                self.selection.select(node, &self.config)
            };
            path.push((current, edge_idx));

            let mv = self.tree.get(current).edges[edge_idx].mv;
            if let Err(err) = game.apply_move(mv) {
                warn!(?mv, %err, "search tree holds an illegal move");
                self.backpropagate(&path, PlayerMap::with_value(0.5));
                return;
            }

            if expanding {
                self.expand_child(current, edge_idx, game);
                let rewards = self.simulate(game);
                self.stats.simulations += 1;
                self.backpropagate(&path, rewards);
                return;
            }

            current = self.tree.get(current).edges[edge_idx].child;
        }
    }

    /// Generate edges for a node, or mark it terminal.
    fn expand_node(&mut self, node_id: NodeId, game: &E) {
        if let Some(result) = game.is_terminal() {
            let node = self.tree.get_mut(node_id);
            node.is_terminal = true;
            node.terminal_reward = Some(result_to_rewards(&result));
            return;
        }

        let moves = game.legal_moves();
        self.tree
            .get_mut(node_id)
            .edges
            .extend(moves.into_iter().map(Edge::new));
        self.stats.nodes_expanded += 1;
    }

    /// Pick an unexpanded edge at random.
    fn select_unexpanded(&mut self, node_id: NodeId) -> usize {
        let unexpanded: Vec<usize> = self.tree.get(node_id).unexpanded_edges().collect();
        self.rng.choose(&unexpanded).copied().unwrap_or(0)
    }

    /// Create the child node behind an edge. `game` is the position after the move.
    fn expand_child(&mut self, parent_id: NodeId, edge_idx: usize, game: &E) -> NodeId {
        let depth = self.tree.get(parent_id).depth + 1;
        self.stats.max_depth = self.stats.max_depth.max(depth);

        let child = MCTSNode::new(parent_id, edge_idx as u16, game.to_move(), depth);
        let child_id = self.tree.alloc(child);
        self.tree.get_mut(parent_id).edges[edge_idx].child = child_id;

        self.expand_node(child_id, game);
        child_id
    }

    fn simulate(&mut self, game: &mut E) -> PlayerMap<f64> {
        let mut sim_rng = self.rng.fork();
        self.simulation
            .simulate(game, &mut sim_rng, self.config.max_depth)
    }

    /// Add rewards along the path, deepest edge first.
    fn backpropagate(&mut self, path: &[(NodeId, usize)], rewards: PlayerMap<f64>) {
        if path.is_empty() {
            self.tree.root_node_mut().visits += 1;
            return;
        }

        for &(node_id, edge_idx) in path.iter().rev() {
            let node = self.tree.get_mut(node_id);
            node.visits += 1;

            let edge = &mut node.edges[edge_idx];
            edge.visits += 1;
            for (player, reward) in rewards.iter() {
                edge.total_reward[player] += reward;
            }
        }
    }

    /// Final move choice at the root.
    fn best_move(&mut self) -> Option<E::Move> {
        let root = self.tree.root_node();

        if self.config.temperature <= 0.0 {
            return root.best_edge_by_visits().map(|e| e.mv);
        }

        let visits: Vec<u32> = root.edges.iter().map(|e| e.visits).collect();
        let weights = temperature_weights(&visits, self.config.temperature);

        match self.rng.choose_weighted(&weights) {
            Some(idx) => Some(root.edges[idx].mv),
            None => root.best_edge_by_visits().map(|e| e.mv),
        }
    }

    /// Statistics from the last search.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Tree from the last search.
    #[must_use]
    pub fn tree(&self) -> &MCTSTree<E::Move> {
        &self.tree
    }

    /// Root visit counts from the last search.
    pub fn action_visits(&self) -> Vec<(E::Move, u32)> {
        self.tree
            .root_node()
            .edges
            .iter()
            .map(|e| (e.mv, e.visits))
            .collect()
    }

    /// Root visit distribution from the last search; sums to 1.
    pub fn action_probabilities(&self) -> Vec<(E::Move, f64)> {
        let root = self.tree.root_node();
        let total: u32 = root.edges.iter().map(|e| e.visits).sum();

        if total == 0 {
            let uniform = 1.0 / root.edges.len().max(1) as f64;
            return root.edges.iter().map(|e| (e.mv, uniform)).collect();
        }

        root.edges
            .iter()
            .map(|e| (e.mv, f64::from(e.visits) / f64::from(total)))
            .collect()
    }

    /// Search configuration.
    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }
}

/// Visit counts raised to `1 / temperature`, scaled so the top edge weighs 1.
///
/// Scaling first keeps low temperatures from overflowing to infinity.
fn temperature_weights(visits: &[u32], temperature: f64) -> Vec<f32> {
    let max = visits.iter().copied().max().unwrap_or(0);
    if max == 0 {
        return vec![0.0; visits.len()];
    }
    let inv_temp = 1.0 / temperature;
    visits
        .iter()
        .map(|&v| (f64::from(v) / f64::from(max)).powf(inv_temp) as f32)
        .collect()
}

impl<E: RulesEngine> Strategy<E> for MCTSSearch<E> {
    fn choose_move(&mut self, game: &E, legal: &[E::Move]) -> Option<E::Move> {
        let iterations = self.config.iterations;
        self.search_moves(game, legal, iterations)
    }

    fn name(&self) -> &'static str {
        "mcts"
    }
}
