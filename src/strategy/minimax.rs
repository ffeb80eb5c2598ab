//! Depth-limited alpha-beta search with a transposition table.
//!
//! Values are from the root player's point of view: the root player
//! maximizes, the opponent minimizes, and leaves are scored with
//! `RulesEngine::evaluate`. The table is keyed by `position_key` and cleared
//! at the start of every search.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::core::{GameRng, Player};
use crate::rules::RulesEngine;

use super::Strategy;

/// Minimax configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MinimaxConfig {
    /// Plies searched below the root (minimum 1).
    pub depth: u8,

    /// Seed for tie-break noise.
    pub seed: u64,

    /// Uniform noise in `[0, noise)` added to root scores when comparing
    /// moves (0 = deterministic).
    pub noise: f64,
}

impl Default for MinimaxConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            seed: 42,
            noise: 0.0,
        }
    }
}

impl MinimaxConfig {
    /// Set the search depth.
    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    /// Set the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the tie-break noise.
    pub fn with_noise(mut self, noise: f64) -> Self {
        self.noise = noise;
        self
    }
}

/// Counters from the last search.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinimaxStats {
    /// Positions visited.
    pub nodes: u64,
    /// Positions answered from the table.
    pub table_hits: u64,
    /// Alpha-beta cutoffs.
    pub cutoffs: u64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Bound {
    Exact,
    Lower,
    Upper,
}

#[derive(Clone, Copy, Debug)]
struct TableEntry {
    depth: u8,
    value: f64,
    bound: Bound,
}

/// Alpha-beta player.
#[derive(Clone, Debug)]
pub struct Minimax {
    config: MinimaxConfig,
    rng: GameRng,
    table: FxHashMap<u64, TableEntry>,
    stats: MinimaxStats,
}

impl Minimax {
    /// Create a new minimax player.
    #[must_use]
    pub fn new(config: MinimaxConfig) -> Self {
        let rng = GameRng::new(config.seed);
        Self {
            config,
            rng,
            table: FxHashMap::default(),
            stats: MinimaxStats::default(),
        }
    }

    /// Configuration.
    #[must_use]
    pub fn config(&self) -> &MinimaxConfig {
        &self.config
    }

    /// Counters from the last search.
    #[must_use]
    pub fn stats(&self) -> &MinimaxStats {
        &self.stats
    }

    /// Best move among `legal` and its value for the player to move.
    ///
    /// Ties (without noise) go to the earliest move in `legal`.
    #[instrument(skip_all, fields(depth = self.config.depth, moves = legal.len()))]
    pub fn best_move<E: RulesEngine>(
        &mut self,
        game: &E,
        legal: &[E::Move],
    ) -> Option<(E::Move, f64)> {
        self.stats = MinimaxStats::default();
        self.table.clear();

        let root = game.to_move();
        let depth = self.config.depth.max(1) - 1;

        let mut best: Option<(E::Move, f64)> = None;
        let mut best_cmp = f64::NEG_INFINITY;

        for &mv in legal {
            let mut child = game.clone();
            if child.apply_move(mv).is_err() {
                continue;
            }

            // With noise, weaker moves can still win the comparison, so
            // their scores must be exact.
            let alpha = match best {
                Some((_, value)) if self.config.noise <= 0.0 => value,
                _ => f64::NEG_INFINITY,
            };
            let score = self.search(&child, depth, alpha, f64::INFINITY, root);

            let cmp = if self.config.noise > 0.0 {
                score + self.config.noise * self.rng.gen_unit()
            } else {
                score
            };
            if best.is_none() || cmp > best_cmp {
                best_cmp = cmp;
                best = Some((mv, score));
            }
        }

        debug!(
            nodes = self.stats.nodes,
            table_hits = self.stats.table_hits,
            cutoffs = self.stats.cutoffs,
            value = best.map(|(_, v)| v),
            "minimax search finished"
        );
        best
    }

    fn search<E: RulesEngine>(
        &mut self,
        game: &E,
        depth: u8,
        mut alpha: f64,
        mut beta: f64,
        root: Player,
    ) -> f64 {
        self.stats.nodes += 1;

        if depth == 0 || game.is_terminal().is_some() {
            return game.evaluate(root);
        }

        let key = game.position_key();
        if let Some(entry) = self.table.get(&key) {
            if entry.depth >= depth {
                self.stats.table_hits += 1;
                match entry.bound {
                    Bound::Exact => return entry.value,
                    Bound::Lower => alpha = alpha.max(entry.value),
                    Bound::Upper => beta = beta.min(entry.value),
                }
                if alpha >= beta {
                    return entry.value;
                }
            }
        }

        let moves = game.legal_moves();
        if moves.is_empty() {
            return game.evaluate(root);
        }

        let (alpha_in, beta_in) = (alpha, beta);
        let maximizing = game.to_move() == root;
        let mut value = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };

        for mv in moves {
            let mut child = game.clone();
            if child.apply_move(mv).is_err() {
                continue;
            }
            let score = self.search(&child, depth - 1, alpha, beta, root);

            if maximizing {
                value = value.max(score);
                alpha = alpha.max(value);
            } else {
                value = value.min(score);
                beta = beta.min(value);
            }
            if alpha >= beta {
                self.stats.cutoffs += 1;
                break;
            }
        }

        if value.is_infinite() {
            return game.evaluate(root);
        }

        let bound = if value <= alpha_in {
            Bound::Upper
        } else if value >= beta_in {
            Bound::Lower
        } else {
            Bound::Exact
        };
        self.table.insert(key, TableEntry { depth, value, bound });
        value
    }
}

impl<E: RulesEngine> Strategy<E> for Minimax {
    fn choose_move(&mut self, game: &E, legal: &[E::Move]) -> Option<E::Move> {
        self.best_move(game, legal).map(|(mv, _)| mv)
    }

    fn name(&self) -> &'static str {
        "minimax"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GlobalCoord;
    use crate::game::UltimateGame;

    fn play_all(game: &mut UltimateGame, moves: &[(usize, usize)]) {
        for &(r, c) in moves {
            game.place_global(r, c).unwrap();
        }
    }

    /// X to move on board (2, 2); (8, 8) wins the meta diagonal.
    fn x_wins_next() -> UltimateGame {
        let mut game = UltimateGame::new();
        play_all(
            &mut game,
            &[
                (3, 3), (1, 1), (3, 4), (1, 4), (3, 5), (0, 6), (1, 0), (3, 0),
                (2, 0), (6, 0), (0, 0), (5, 2), (6, 6), (8, 2), (7, 7), (2, 8),
            ],
        );
        game
    }

    #[test]
    fn test_default_config() {
        let config = MinimaxConfig::default();
        assert_eq!(config.depth, 3);
        assert_eq!(config.noise, 0.0);

        let config = config.with_depth(5).with_seed(9).with_noise(0.1);
        assert_eq!((config.depth, config.seed, config.noise), (5, 9, 0.1));
    }

    #[test]
    fn test_takes_immediate_win() {
        let game = x_wins_next();
        let legal = game.legal_global_moves();
        let mut minimax = Minimax::new(MinimaxConfig::default().with_depth(1));

        let (mv, value) = minimax.best_move(&game, &legal).unwrap();

        assert_eq!(mv, GlobalCoord::new(8, 8).unwrap());
        assert_eq!(value, 1.0);
    }

    #[test]
    fn test_deeper_search_still_wins() {
        let game = x_wins_next();
        let legal = game.legal_global_moves();
        let mut minimax = Minimax::new(MinimaxConfig::default().with_depth(3));

        let mv = minimax.choose_move(&game, &legal).unwrap();

        assert_eq!(mv, GlobalCoord::new(8, 8).unwrap());
        assert!(minimax.stats().nodes > legal.len() as u64);
    }

    #[test]
    fn test_respects_restricted_list() {
        let game = x_wins_next();
        let only = [GlobalCoord::new(6, 7).unwrap()];
        let mut minimax = Minimax::new(MinimaxConfig::default());

        assert_eq!(minimax.choose_move(&game, &only), Some(only[0]));
        assert_eq!(minimax.choose_move(&game, &[]), None);
    }

    #[test]
    fn test_deterministic_without_noise() {
        let mut game = UltimateGame::new();
        play_all(&mut game, &[(4, 4), (3, 3)]);
        let legal = game.legal_global_moves();

        let mut a = Minimax::new(MinimaxConfig::default());
        let mut b = Minimax::new(MinimaxConfig::default().with_seed(1));

        assert_eq!(a.best_move(&game, &legal), b.best_move(&game, &legal));
    }

    #[test]
    fn test_table_answers_repeated_position() {
        let mut game = UltimateGame::new();
        game.place_global(4, 4).unwrap();
        let mut minimax = Minimax::new(MinimaxConfig::default());

        let first = minimax.search(&game, 2, f64::NEG_INFINITY, f64::INFINITY, Player::O);
        let nodes = minimax.stats().nodes;
        assert_eq!(minimax.stats().table_hits, 0);

        let second = minimax.search(&game, 2, f64::NEG_INFINITY, f64::INFINITY, Player::O);
        assert_eq!(first, second);
        assert_eq!(minimax.stats().table_hits, 1);
        assert_eq!(minimax.stats().nodes, nodes + 1);
    }
}
