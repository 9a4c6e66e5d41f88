use std::collections::HashSet;

use crate::{GameState, Player, MAX_FINGERS};

const PAIR_BASE: u16 = (MAX_FINGERS as u16 + 1) * (MAX_FINGERS as u16 + 1);

/// Fingerprint of a position that ignores which of a player's hands is left
/// and which is right. Two positions with the same key play identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymmetryKey {
    hash_value: u16,
}

impl SymmetryKey {
    pub fn of(state: &GameState) -> Self {
        let a = pair_index(state.hands_of(Player::A).canonical());
        let b = pair_index(state.hands_of(Player::B).canonical());
        let turn = match state.current_player() {
            Player::A => 0,
            Player::B => 1,
        };
        SymmetryKey {
            hash_value: (a * PAIR_BASE + b) * 2 + turn,
        }
    }
}

fn pair_index((lo, hi): (u8, u8)) -> u16 {
    lo as u16 * (MAX_FINGERS as u16 + 1) + hi as u16
}

/// Remembers which symmetry classes have already been seen.
#[derive(Debug, Default, Clone)]
pub struct SymmetrySet {
    data: HashSet<SymmetryKey>,
}

impl SymmetrySet {
    pub fn new() -> SymmetrySet {
        SymmetrySet {
            data: HashSet::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: HashSet::with_capacity(capacity),
        }
    }

    /// Returns true if the state's class was not present before.
    pub fn insert(&mut self, state: &GameState) -> bool {
        self.data.insert(SymmetryKey::of(state))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
