//! Session configuration.

use serde::{Deserialize, Serialize};

use crate::core::{Player, PlayerMap};
use crate::strategy::StrategyKind;

/// Who controls one side of the board.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum SeatConfig {
    /// Moves arrive through `Session::submit`.
    #[default]
    Human,
    /// Moves come from a strategy through `Session::advance`.
    Computer(StrategyKind),
}

impl SeatConfig {
    /// Check if this seat is computer-controlled.
    #[must_use]
    pub fn is_computer(&self) -> bool {
        matches!(self, SeatConfig::Computer(_))
    }
}

/// Session configuration parameters.
///
/// The default is two human seats; toggling a seat to computer control
/// uses a uniformly random player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Base seed for strategies that need one.
    pub seed: u64,

    /// Seat setup applied at start and on every restart.
    pub seats: PlayerMap<SeatConfig>,

    /// Strategy installed by `Session::toggle_computer`.
    pub toggle_strategy: StrategyKind,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            seats: PlayerMap::with_value(SeatConfig::Human),
            toggle_strategy: StrategyKind::Random,
        }
    }
}

impl SessionConfig {
    /// Set the base seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set one player's seat.
    pub fn with_seat(mut self, player: Player, seat: SeatConfig) -> Self {
        self.seats[player] = seat;
        self
    }

    /// Set the strategy used when a seat is toggled to computer.
    pub fn with_toggle_strategy(mut self, strategy: StrategyKind) -> Self {
        self.toggle_strategy = strategy;
        self
    }

    /// Seed for a player's strategy; differs per player.
    #[must_use]
    pub fn seed_for(&self, player: Player) -> u64 {
        self.seed.wrapping_add(player.index() as u64)
    }
}
