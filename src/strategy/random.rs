//! Baseline strategies.

use crate::core::GameRng;
use crate::rules::RulesEngine;

use super::Strategy;

/// Uniformly random legal move, from a seeded RNG.
#[derive(Clone, Debug)]
pub struct UniformRandom {
    rng: GameRng,
}

impl UniformRandom {
    /// Create with a seed; same seed, same choices.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }
}

impl<E: RulesEngine> Strategy<E> for UniformRandom {
    fn choose_move(&mut self, _game: &E, legal: &[E::Move]) -> Option<E::Move> {
        self.rng.choose(legal).copied()
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

/// Always plays the first legal move.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstLegal;

impl<E: RulesEngine> Strategy<E> for FirstLegal {
    fn choose_move(&mut self, _game: &E, legal: &[E::Move]) -> Option<E::Move> {
        legal.first().copied()
    }

    fn name(&self) -> &'static str {
        "first-legal"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GlobalCoord;
    use crate::game::UltimateGame;

    #[test]
    fn test_uniform_random_is_seeded() {
        let game = UltimateGame::new();
        let legal = game.legal_global_moves();

        let mut a = UniformRandom::new(11);
        let mut b = UniformRandom::new(11);
        for _ in 0..10 {
            let x: Option<GlobalCoord> = a.choose_move(&game, &legal);
            assert_eq!(x, b.choose_move(&game, &legal));
            assert!(legal.contains(&x.unwrap()));
        }
    }

    #[test]
    fn test_first_legal() {
        let game = UltimateGame::new();
        let legal = game.legal_global_moves();

        assert_eq!(FirstLegal.choose_move(&game, &legal), Some(legal[0]));
        assert_eq!(FirstLegal.choose_move(&game, &[]), None);
    }
}
