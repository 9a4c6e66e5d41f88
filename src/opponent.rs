mod blended;
mod minimax;
mod random;

pub use blended::BlendedOpponent;
pub use minimax::{MinimaxOpponent, SearchStats, LOSS_SCORE, WIN_SCORE};
pub use random::RandomOpponent;

use crate::{Difficulty, GameState, Move};

pub const DEFAULT_SEARCH_DEPTH: u32 = 12;
pub const DEFAULT_BLENDED_SEARCH_DEPTH: u32 = 4;
pub const DEFAULT_BLENDED_RANDOM_WEIGHT: f64 = 0.4;

/// A computer player.
pub trait Opponent {
    /// Picks a legal move for the side to move in `state`.
    ///
    /// Returns `None` only when the game is already over.
    fn select_move(&mut self, state: &GameState) -> Option<Move>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpponentSettings {
    pub difficulty: Difficulty,
    pub search_depth: u32,
    pub blended_search_depth: u32,
    pub blended_random_weight: f64,
    pub seed: Option<u64>,
}

impl Default for OpponentSettings {
    fn default() -> Self {
        OpponentSettings {
            difficulty: Difficulty::default(),
            search_depth: DEFAULT_SEARCH_DEPTH,
            blended_search_depth: DEFAULT_BLENDED_SEARCH_DEPTH,
            blended_random_weight: DEFAULT_BLENDED_RANDOM_WEIGHT,
            seed: None,
        }
    }
}

/// The opponent behind the difficulty selector: `Easy` plays at random,
/// `Medium` mixes random play with a shallow search, `Hard` searches deep.
#[derive(Debug, Clone)]
pub struct Computer {
    difficulty: Difficulty,
    random: RandomOpponent,
    blended: BlendedOpponent,
    minimax: MinimaxOpponent,
}

impl Computer {
    pub fn new(difficulty: Difficulty) -> Self {
        Computer::with_settings(&OpponentSettings {
            difficulty,
            ..Default::default()
        })
    }

    pub fn with_settings(settings: &OpponentSettings) -> Self {
        let seed_for = |offset: u64| settings.seed.map(|seed| seed.wrapping_add(offset));
        Computer {
            difficulty: settings.difficulty,
            random: RandomOpponent::new(seed_for(0)),
            blended: BlendedOpponent::new(
                RandomOpponent::new(seed_for(1)),
                MinimaxOpponent::new(settings.blended_search_depth),
                settings.blended_random_weight,
                seed_for(2),
            ),
            minimax: MinimaxOpponent::new(settings.search_depth),
        }
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
}

impl Opponent for Computer {
    fn select_move(&mut self, state: &GameState) -> Option<Move> {
        match self.difficulty {
            Difficulty::Easy => self.random.select_move(state),
            Difficulty::Medium => self.blended.select_move(state),
            Difficulty::Hard => self.minimax.select_move(state),
        }
    }
}
