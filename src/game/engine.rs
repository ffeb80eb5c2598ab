//! `RulesEngine` implementation and position heuristic.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use crate::board::lines;
use crate::core::{Cell, GlobalCoord, MoveError, Player};
use crate::rules::{GameResult, RulesEngine};

use super::ultimate::UltimateGame;

/// Weight of a won sub-board by meta position: centre, corners, edges.
const BOARD_WEIGHTS: [f64; 9] = [3.0, 2.0, 3.0, 2.0, 4.0, 2.0, 3.0, 2.0, 3.0];
const META_TWO_WEIGHT: f64 = 2.0;
const LOCAL_TWO_WEIGHT: f64 = 0.5;
/// Largest possible one-sided score, so the difference fits in `[-1, 1]`.
const SCORE_SPAN: f64 = 24.0 + 8.0 * META_TWO_WEIGHT + 9.0 * 8.0 * LOCAL_TWO_WEIGHT;

impl UltimateGame {
    fn score(&self, player: Player) -> f64 {
        let owners: [Option<Player>; 9] = std::array::from_fn(|i| {
            Cell::from_index(i).and_then(|c| self.board_status(c).winner())
        });

        let won: f64 = owners
            .iter()
            .zip(BOARD_WEIGHTS)
            .filter(|(owner, _)| **owner == Some(player))
            .map(|(_, w)| w)
            .sum();

        let open_board = |i: usize| {
            Cell::from_index(i).is_some_and(|c| self.board_status(c).is_in_progress())
        };
        let meta_twos = lines::open_twos(&owners, player, open_board) as f64;

        let local_twos: usize = self
            .boards()
            .filter(|(_, b)| b.status().is_in_progress())
            .map(|(_, b)| {
                let marks = (*b.cells()).map(|m| m.player());
                lines::open_twos(&marks, player, |i| marks[i].is_none())
            })
            .sum();

        won + META_TWO_WEIGHT * meta_twos + LOCAL_TWO_WEIGHT * local_twos as f64
    }
}

impl RulesEngine for UltimateGame {
    type Move = GlobalCoord;

    fn to_move(&self) -> Player {
        self.turn()
    }

    fn legal_moves(&self) -> Vec<GlobalCoord> {
        self.legal_global_moves()
    }

    fn apply_move(&mut self, mv: GlobalCoord) -> Result<(), MoveError> {
        self.play(mv)
    }

    fn is_terminal(&self) -> Option<GameResult> {
        GameResult::from_status(self.status())
    }

    fn evaluate(&self, player: Player) -> f64 {
        if let Some(result) = self.is_terminal() {
            return result.reward(player);
        }
        let diff = self.score(player) - self.score(player.opponent());
        0.5 + 0.5 * (diff / SCORE_SPAN).clamp(-1.0, 1.0)
    }

    fn position_key(&self) -> u64 {
        let mut hasher = FxHasher::default();
        for (_, board) in self.boards() {
            board.cells().hash(&mut hasher);
        }
        self.turn().hash(&mut hasher);
        self.forced_board().hash(&mut hasher);
        hasher.finish()
    }
}
