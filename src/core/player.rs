//! Player identification for a strictly two-player match.
//!
//! Pancha Keliya is always played by exactly two players, so the engine
//! uses a closed enum rather than a numeric ID. `opponent()` is total and
//! the compiler checks match exhaustiveness in the rules code.

use serde::{Deserialize, Serialize};

/// One of the two players. The first player traditionally moves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// The other player.
    #[must_use]
    pub const fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// 0-based index for per-player storage.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    /// 1-based player number as shown to users.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    /// Both players in seat order.
    #[must_use]
    pub const fn both() -> [Player; 2] {
        [Player::One, Player::Two]
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.number())
    }
}
