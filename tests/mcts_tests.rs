//! MCTS integration tests on the full game.

use ultimate_ttt::core::GlobalCoord;
use ultimate_ttt::game::UltimateGame;
use ultimate_ttt::mcts::{MCTSConfig, MCTSSearch};

fn play_all(game: &mut UltimateGame, moves: &[(usize, usize)]) {
    for &(r, c) in moves {
        game.place_global(r, c).unwrap();
    }
}

/// X to move inside (2, 2); (8, 8) completes the meta diagonal.
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

// =============================================================================
// Basic Search Tests
// =============================================================================

#[test]
fn test_mcts_returns_legal_move() {
    let game = UltimateGame::new();
    let mut search = MCTSSearch::new(MCTSConfig::default());

    let mv = search.search(&game, 100).unwrap();

    assert!(game.is_legal(mv));
}

#[test]
fn test_mcts_with_low_iterations() {
    let mut game = UltimateGame::new();
    game.place_global(4, 4).unwrap();
    let mut search = MCTSSearch::new(MCTSConfig::default());

    // Fewer iterations than root moves still yields a forced-board move
    let mv = search.search(&game, 3).unwrap();

    assert_eq!(mv.board(), game.forced_board().unwrap());
}

#[test]
fn test_mcts_finished_game_returns_none() {
    let mut game = UltimateGame::new();
    play_all(
        &mut game,
        &[
            (2, 2), (7, 6), (3, 2), (1, 7), (3, 3), (0, 0), (0, 2), (2, 7),
            (8, 4), (6, 3), (1, 2), (3, 6), (8, 7), (7, 4), (3, 4), (2, 3),
            (6, 2), (0, 6), (6, 7), (0, 3), (7, 7), (4, 4), (3, 5),
        ],
    );
    assert!(game.is_finished());

    let mut search = MCTSSearch::new(MCTSConfig::default());
    assert_eq!(search.search(&game, 50), None);
}

// =============================================================================
// Tree and Statistics Tests
// =============================================================================

#[test]
fn test_root_visits_match_iterations() {
    let game = UltimateGame::new();
    let mut search = MCTSSearch::new(MCTSConfig::default().with_seed(3));

    search.search(&game, 300);

    let total: u32 = search.action_visits().iter().map(|&(_, v)| v).sum();
    assert_eq!(total, search.stats().iterations);
    assert_eq!(search.stats().iterations, 300);
    assert!(search.tree().len() > 1);
}

#[test]
fn test_action_probabilities_sum_to_one() {
    let game = UltimateGame::new();
    let mut search = MCTSSearch::new(MCTSConfig::default());

    search.search(&game, 200);
    let probs = search.action_probabilities();

    assert_eq!(probs.len(), 81);
    let sum: f64 = probs.iter().map(|&(_, p)| p).sum();
    assert!((sum - 1.0).abs() < 1e-9);
}

#[test]
fn test_node_limit_stops_search() {
    let game = UltimateGame::new();
    let config = MCTSConfig::default().with_max_nodes(50);
    let mut search = MCTSSearch::new(config);

    let mv = search.search(&game, 10_000).unwrap();

    assert!(game.is_legal(mv));
    assert!(search.tree().len() <= 51);
    assert!(search.stats().iterations < 10_000);
}

// =============================================================================
// Play Strength and Determinism
// =============================================================================

#[test]
fn test_mcts_finds_meta_win() {
    let game = x_wins_next();
    let mut search = MCTSSearch::new(MCTSConfig::default().with_seed(11));

    let mv = search.search(&game, 800).unwrap();

    assert_eq!(mv, GlobalCoord::new(8, 8).unwrap());
}

#[test]
fn test_mcts_restricted_root() {
    let game = x_wins_next();
    let legal = vec![GlobalCoord::new(6, 7).unwrap(), GlobalCoord::new(7, 8).unwrap()];
    let mut search = MCTSSearch::new(MCTSConfig::default());

    let mv = search.search_moves(&game, &legal, 100).unwrap();

    assert!(legal.contains(&mv));
}

#[test]
fn test_mcts_deterministic_with_seed() {
    let game = UltimateGame::new();
    let config = MCTSConfig::default().with_seed(12345);

    let mut a = MCTSSearch::new(config.clone());
    let mut b = MCTSSearch::new(config);

    assert_eq!(a.search(&game, 200), b.search(&game, 200));
    assert_eq!(a.action_visits(), b.action_visits());
}
