pub mod engine;
mod error;
pub mod opponent;
pub mod rules;
pub mod schedule;
mod state;
mod symmetry;

use serde_enum_str::{Deserialize_enum_str, Serialize_enum_str};
use std::fmt;
use std::str::FromStr;
use strum_macros::EnumIter;

pub use error::InvalidMove;
pub use state::{GameState, PlayerHands};
pub use symmetry::{SymmetryKey, SymmetrySet};

/// The largest number of fingers a live hand can show.
pub const MAX_FINGERS: u8 = 4;
/// A hand that reaches this sum after an Add dies (wraps to 0).
pub const KILL_SUM: u8 = 5;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize_enum_str, Deserialize_enum_str,
)]
pub enum Player {
    A,
    B,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Side {
    Left,
    Right,
}

/// Addresses one of the four hands on the table.
///
/// Parses from and prints as the names used by the table layout: Player A sits
/// at the bottom, Player B at the top, e.g. `bottomLeft` or `topRight`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandRef {
    pub player: Player,
    pub side: Side,
}

impl HandRef {
    pub const fn new(player: Player, side: Side) -> Self {
        HandRef { player, side }
    }
}

impl fmt::Display for HandRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let row = match self.player {
            Player::A => "bottom",
            Player::B => "top",
        };
        let side = match self.side {
            Side::Left => "Left",
            Side::Right => "Right",
        };
        write!(f, "{}{}", row, side)
    }
}

impl FromStr for HandRef {
    type Err = InvalidMove;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (player, rest) = if let Some(rest) = s.strip_prefix("top") {
            (Player::B, rest)
        } else if let Some(rest) = s.strip_prefix("bottom") {
            (Player::A, rest)
        } else {
            return Err(InvalidMove::UnknownHand(s.to_string()));
        };
        let side = match rest {
            "Left" => Side::Left,
            "Right" => Side::Right,
            _ => return Err(InvalidMove::UnknownHand(s.to_string())),
        };
        Ok(HandRef { player, side })
    }
}

/// A move request. Moves are transient: build one, submit it, drop it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    /// Tap the opponent's `target` hand with the mover's `source` hand.
    Add { source: HandRef, target: HandRef },
    /// Redistribute the mover's own fingers.
    Split { left: u8, right: u8 },
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Add { source, target } => write!(f, "add {} -> {}", source, target),
            Move::Split { left, right } => write!(f, "split {}/{}", left, right),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize_enum_str, Deserialize_enum_str)]
pub enum Difficulty {
    Easy,
    Medium,
    #[default]
    Hard,
}
