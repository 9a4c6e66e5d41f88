use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::Opponent;
use crate::rules::{is_valid_add, valid_splits_for};
use crate::{GameState, HandRef, Move, Side};

const SIDES: [Side; 2] = [Side::Left, Side::Right];

/// Flips a coin between splitting and adding, then picks uniformly among the
/// options of that kind.
#[derive(Debug, Clone)]
pub struct RandomOpponent {
    rng: StdRng,
}

impl RandomOpponent {
    /// `Some(seed)` gives a reproducible sequence of moves.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        RandomOpponent { rng }
    }

    fn random_split(&mut self, state: &GameState) -> Option<Move> {
        let hands = state.hands_of(state.current_player());
        valid_splits_for(hands.left(), hands.right())
            .choose(&mut self.rng)
            .map(|&(left, right)| Move::Split { left, right })
    }

    fn random_add(&mut self, state: &GameState) -> Move {
        let mover = state.current_player();
        let opponent = mover.opponent();
        if state.is_defeated(mover) || state.is_defeated(opponent) {
            panic!("No add is possible from a finished position!");
        }
        loop {
            let source = HandRef::new(mover, SIDES[self.rng.gen_range(0..2)]);
            let target = HandRef::new(opponent, SIDES[self.rng.gen_range(0..2)]);
            if is_valid_add(state, source, target) {
                return Move::Add { source, target };
            }
        }
    }
}

impl Opponent for RandomOpponent {
    fn select_move(&mut self, state: &GameState) -> Option<Move> {
        if state.is_over() {
            return None;
        }
        if self.rng.gen_bool(0.5) {
            if let Some(split) = self.random_split(state) {
                return Some(split);
            }
        }
        Some(self.random_add(state))
    }
}
