//! A game with seats: the host-facing loop around `UltimateGame`.
//!
//! Each player sits at a human or computer seat. Hosts forward human moves
//! with `submit` and call `advance` to let a computer seat move. Drawing and
//! input handling stay with the host.
//!
//! ```
//! use ultimate_ttt::core::Player;
//! use ultimate_ttt::session::{Session, SessionConfig};
//!
//! let mut session = Session::new(SessionConfig::default());
//! session.submit(4, 4).unwrap();
//!
//! // Hand O to the computer mid-game.
//! assert!(session.toggle_computer(Player::O));
//! let reply = session.advance().unwrap().unwrap();
//! assert_eq!(reply.board(), ultimate_ttt::core::Cell::CENTER);
//! ```

pub mod config;

use tracing::{debug, info, instrument};

use crate::core::{GlobalCoord, MoveError, Player, PlayerMap};
use crate::game::{MetaStatus, UltimateGame};
use crate::strategy::Strategy;

pub use config::{SeatConfig, SessionConfig};

/// A live seat.
pub enum Seat {
    /// Waits for `Session::submit`.
    Human,
    /// Moves on `Session::advance`.
    Computer(Box<dyn Strategy<UltimateGame>>),
}

impl Seat {
    fn from_config(config: &SeatConfig, seed: u64) -> Self {
        match config {
            SeatConfig::Human => Seat::Human,
            SeatConfig::Computer(kind) => Seat::Computer(kind.build(seed)),
        }
    }

    /// Check if this seat is computer-controlled.
    #[must_use]
    pub fn is_computer(&self) -> bool {
        matches!(self, Seat::Computer(_))
    }

    /// Strategy name, `None` for a human seat.
    #[must_use]
    pub fn strategy_name(&self) -> Option<&'static str> {
        match self {
            Seat::Human => None,
            Seat::Computer(strategy) => Some(strategy.name()),
        }
    }
}

impl std::fmt::Debug for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Seat::Human => write!(f, "Human"),
            Seat::Computer(strategy) => write!(f, "Computer({})", strategy.name()),
        }
    }
}

/// One game plus the seats playing it.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    game: UltimateGame,
    seats: PlayerMap<Seat>,
}

impl Session {
    /// Start a fresh game with the configured seats.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        let seats = Self::build_seats(&config);
        Self {
            config,
            game: UltimateGame::new(),
            seats,
        }
    }

    fn build_seats(config: &SessionConfig) -> PlayerMap<Seat> {
        PlayerMap::new(|player| Seat::from_config(&config.seats[player], config.seed_for(player)))
    }

    /// The game being played.
    #[must_use]
    pub fn game(&self) -> &UltimateGame {
        &self.game
    }

    /// A player's seat.
    #[must_use]
    pub fn seat(&self, player: Player) -> &Seat {
        &self.seats[player]
    }

    /// Session configuration.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Play a human move at a global coordinate.
    ///
    /// Rejected with `NotYourTurn` while a computer seat is to move.
    pub fn submit(&mut self, row: usize, col: usize) -> Result<(), MoveError> {
        let player = self.game.turn();
        if !self.game.is_finished() && self.seats[player].is_computer() {
            debug!(%player, row, col, "human move rejected at computer seat");
            return Err(MoveError::NotYourTurn { player });
        }
        self.game.place_global(row, col)
    }

    /// Let a computer seat move.
    ///
    /// Returns the move played, or `None` when the game is over or a human
    /// is to move.
    #[instrument(skip(self), fields(ply = self.game.ply()))]
    pub fn advance(&mut self) -> Result<Option<GlobalCoord>, MoveError> {
        if self.game.is_finished() {
            return Ok(None);
        }

        let player = self.game.turn();
        let Seat::Computer(strategy) = &mut self.seats[player] else {
            return Ok(None);
        };

        let legal = self.game.legal_global_moves();
        let mv = strategy
            .choose_move(&self.game, &legal)
            .ok_or(MoveError::NoLegalMove)?;
        debug!(%player, %mv, strategy = strategy.name(), "computer move");

        self.game.play(mv)?;
        Ok(Some(mv))
    }

    /// Flip a seat between human and computer control.
    ///
    /// Returns `true` if the seat is now computer-controlled.
    pub fn toggle_computer(&mut self, player: Player) -> bool {
        let seat = &mut self.seats[player];
        *seat = if seat.is_computer() {
            Seat::Human
        } else {
            Seat::Computer(self.config.toggle_strategy.build(self.config.seed_for(player)))
        };
        let computer = seat.is_computer();
        info!(%player, computer, "seat toggled");
        computer
    }

    /// Start a new game and restore the configured seats.
    pub fn restart(&mut self) {
        self.game.restart();
        self.seats = Self::build_seats(&self.config);
    }

    /// Let computer seats play until the game ends, a human is to move, or
    /// `max_plies` moves have been made.
    pub fn run_to_completion(&mut self, max_plies: usize) -> Result<MetaStatus, MoveError> {
        for _ in 0..max_plies {
            if self.advance()?.is_none() {
                break;
            }
        }
        Ok(self.game.status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardStatus;
    use crate::strategy::StrategyKind;

    fn computer_vs_computer(kind: StrategyKind) -> SessionConfig {
        SessionConfig::default()
            .with_seat(Player::X, SeatConfig::Computer(kind.clone()))
            .with_seat(Player::O, SeatConfig::Computer(kind))
    }

    #[test]
    fn test_human_session_submit() {
        let mut session = Session::new(SessionConfig::default());

        session.submit(4, 4).unwrap();

        assert_eq!(session.game().turn(), Player::O);
        assert_eq!(session.advance().unwrap(), None);
    }

    #[test]
    fn test_submit_rejected_at_computer_seat() {
        let config =
            SessionConfig::default().with_seat(Player::X, SeatConfig::Computer(StrategyKind::FirstLegal));
        let mut session = Session::new(config);

        assert_eq!(
            session.submit(4, 4),
            Err(MoveError::NotYourTurn { player: Player::X })
        );
        assert_eq!(session.game().ply(), 0);
    }

    #[test]
    fn test_advance_first_legal() {
        let config =
            SessionConfig::default().with_seat(Player::X, SeatConfig::Computer(StrategyKind::FirstLegal));
        let mut session = Session::new(config);

        let mv = session.advance().unwrap();

        assert_eq!(mv, GlobalCoord::new(0, 0));
        assert_eq!(session.game().turn(), Player::O);
        // O is human
        assert_eq!(session.advance().unwrap(), None);
    }

    #[test]
    fn test_toggle_computer() {
        let mut session = Session::new(SessionConfig::default());

        assert!(session.toggle_computer(Player::O));
        assert_eq!(session.seat(Player::O).strategy_name(), Some("random"));
        assert!(!session.toggle_computer(Player::O));
        assert!(!session.seat(Player::O).is_computer());
    }

    #[test]
    fn test_restart_restores_seats() {
        let mut session = Session::new(SessionConfig::default());
        session.submit(4, 4).unwrap();
        session.toggle_computer(Player::O);

        session.restart();

        assert_eq!(session.game(), &UltimateGame::new());
        assert!(!session.seat(Player::O).is_computer());
    }

    #[test]
    fn test_run_to_completion_finishes() {
        let mut session = Session::new(computer_vs_computer(StrategyKind::Random));

        let status = session.run_to_completion(81).unwrap();

        assert!(status.is_finished());
        assert!(session.game().ply() <= 81);
        assert_eq!(session.advance().unwrap(), None);
    }

    #[test]
    fn test_run_to_completion_respects_ply_limit() {
        let mut session = Session::new(computer_vs_computer(StrategyKind::FirstLegal));

        let status = session.run_to_completion(5).unwrap();

        assert_eq!(status, BoardStatus::InProgress);
        assert_eq!(session.game().ply(), 5);
    }
}
