use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{MinimaxOpponent, Opponent, RandomOpponent};
use crate::{GameState, Move};

/// Defers each turn to either a random or a searching opponent.
#[derive(Debug, Clone)]
pub struct BlendedOpponent {
    random: RandomOpponent,
    search: MinimaxOpponent,
    random_weight: f64,
    rng: StdRng,
}

impl BlendedOpponent {
    /// `random_weight` is the chance of playing a random move on any turn.
    pub fn new(
        random: RandomOpponent,
        search: MinimaxOpponent,
        random_weight: f64,
        seed: Option<u64>,
    ) -> Self {
        if !(0.0..=1.0).contains(&random_weight) {
            panic!("Invalid random weight! It must be in [0, 1]")
        }
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        BlendedOpponent {
            random,
            search,
            random_weight,
            rng,
        }
    }
}

impl Opponent for BlendedOpponent {
    fn select_move(&mut self, state: &GameState) -> Option<Move> {
        if self.rng.gen_bool(self.random_weight) {
            self.random.select_move(state)
        } else {
            self.search.select_move(state)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Player, PlayerHands};

    // A/B = 0/2 vs 1/2: both adds hand B a kill, the split to 1/1 does not.
    fn trap() -> GameState {
        GameState::from_hands(PlayerHands::new(0, 2), PlayerHands::new(1, 2), Player::A)
    }

    #[test]
    fn zero_weight_always_searches() {
        let mut opponent = BlendedOpponent::new(
            RandomOpponent::new(Some(1)),
            MinimaxOpponent::new(4),
            0.0,
            Some(2),
        );
        for _ in 0..20 {
            assert_eq!(
                opponent.select_move(&trap()),
                Some(Move::Split { left: 1, right: 1 })
            );
        }
    }

    #[test]
    fn full_weight_plays_randomly() {
        let mut opponent = BlendedOpponent::new(
            RandomOpponent::new(Some(1)),
            MinimaxOpponent::new(4),
            1.0,
            Some(2),
        );
        let moves: Vec<Move> = (0..60)
            .filter_map(|_| opponent.select_move(&trap()))
            .collect();
        assert!(moves.iter().any(|mv| matches!(mv, Move::Add { .. })));
    }

    #[test]
    #[should_panic]
    fn weight_above_one_should_panic() {
        BlendedOpponent::new(
            RandomOpponent::new(None),
            MinimaxOpponent::new(4),
            1.5,
            None,
        );
    }
}
