//! Compact binary snapshots of a game, for a host's save/replay.
//!
//! The core never touches the filesystem; hosts decide where bytes go.

use tracing::{debug, instrument};

use crate::core::SnapshotError;

use super::ultimate::UltimateGame;

impl UltimateGame {
    /// Encode the full game state.
    pub fn to_snapshot(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a game state, rejecting bytes whose cached statuses or
    /// counters disagree with the cells.
    #[instrument(skip(bytes), fields(len = bytes.len()))]
    pub fn from_snapshot(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let game: UltimateGame = bincode::deserialize(bytes)?;
        game.validate().map_err(SnapshotError::Inconsistent)?;
        debug!(plies = game.ply(), "snapshot restored");
        Ok(game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardStatus;
    use crate::core::{Cell, Player};
    use crate::game::ActiveBoard;

    #[test]
    fn test_snapshot_restores_mid_game() {
        let mut game = UltimateGame::new();
        for (r, c) in [(4, 4), (3, 3), (0, 0), (1, 1)] {
            game.place_global(r, c).unwrap();
        }

        let bytes = game.to_snapshot().unwrap();
        let restored = UltimateGame::from_snapshot(&bytes).unwrap();

        assert_eq!(restored, game);
        assert_eq!(restored.legal_global_moves(), game.legal_global_moves());
    }

    #[test]
    fn test_snapshot_rejects_garbage() {
        let err = UltimateGame::from_snapshot(&[1, 2, 3]).unwrap_err();
        assert!(matches!(err, SnapshotError::Codec(_)));
    }

    #[test]
    fn test_snapshot_rejects_forged_status() {
        let mut game = UltimateGame::new();
        game.place_global(4, 4).unwrap();
        let mut forged = game.clone();
        forged.force_status_for_test(BoardStatus::WonBy(Player::O));

        let bytes = forged.to_snapshot().unwrap();
        let err = UltimateGame::from_snapshot(&bytes).unwrap_err();
        assert!(matches!(err, SnapshotError::Inconsistent(_)));
    }

    #[test]
    fn test_snapshot_rejects_forged_active_board() {
        let mut game = UltimateGame::new();
        game.place_global(4, 4).unwrap();

        // Sent to (0, 0) instead of the centre
        let mut forged = game.clone();
        forged.force_active_board_for_test(ActiveBoard::Board(Cell::new(0, 0).unwrap()));
        let bytes = forged.to_snapshot().unwrap();
        let err = UltimateGame::from_snapshot(&bytes).unwrap_err();
        assert!(matches!(err, SnapshotError::Inconsistent(_)));

        // Routing set before any move was made
        let mut forged = UltimateGame::new();
        forged.force_active_board_for_test(ActiveBoard::Board(Cell::CENTER));
        let bytes = forged.to_snapshot().unwrap();
        assert!(UltimateGame::from_snapshot(&bytes).is_err());
    }

    #[test]
    fn test_out_of_range_active_board_fails_to_decode() {
        let mut game = UltimateGame::new();
        game.place_global(4, 4).unwrap();

        let mut value = serde_json::to_value(&game).unwrap();
        value["active_board"] = serde_json::json!({ "Board": [7, 7] });

        assert!(serde_json::from_value::<UltimateGame>(value).is_err());
    }

    #[test]
    fn test_snapshot_rejects_history_off_the_cells() {
        let mut game = UltimateGame::new();
        game.place_global(4, 4).unwrap();
        let bytes = game.to_snapshot().unwrap();

        // Re-encode with the history pointing at an empty cell
        let mut value = serde_json::to_value(&game).unwrap();
        value["history"][0]["coord"] = serde_json::json!([0, 0]);
        value["last_move"] = serde_json::json!([0, 0]);
        value["active_board"] = serde_json::json!({ "Board": [0, 0] });
        let forged: UltimateGame = serde_json::from_value(value).unwrap();
        let forged_bytes = forged.to_snapshot().unwrap();

        assert!(UltimateGame::from_snapshot(&bytes).is_ok());
        let err = UltimateGame::from_snapshot(&forged_bytes).unwrap_err();
        assert!(matches!(err, SnapshotError::Inconsistent(_)));
    }
}
