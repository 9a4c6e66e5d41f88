use super::Opponent;
use crate::rules::{legal_moves, successor, winning_add};
use crate::{GameState, Move, Player, SymmetrySet};

pub const WIN_SCORE: i32 = 100;
pub const LOSS_SCORE: i32 = -WIN_SCORE;
const VULNERABILITY: i32 = 10;

/// Counters from the most recent search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub cutoffs: u64,
}

/// Depth-bounded minimax with alpha-beta pruning. Successors that only differ
/// by swapping a player's hands are searched once.
#[derive(Debug, Clone)]
pub struct MinimaxOpponent {
    depth: u32,
    stats: SearchStats,
}

impl MinimaxOpponent {
    pub fn new(depth: u32) -> Self {
        if depth == 0 {
            panic!("Search depth must be at least 1")
        }
        MinimaxOpponent {
            depth,
            stats: SearchStats::default(),
        }
    }

    /// Statistics collected by the last call to [`Self::best_move`].
    pub fn last_stats(&self) -> SearchStats {
        self.stats
    }

    /// The best move for the side to move together with its score from that
    /// side's point of view.
    pub fn best_move(&mut self, state: &GameState) -> Option<(Move, i32)> {
        self.stats = SearchStats::default();
        if state.is_over() {
            return None;
        }
        if let Some(kill) = winning_add(state) {
            self.stats.nodes = 1;
            return Some((kill, WIN_SCORE));
        }

        let root = state.current_player();
        let branches = self.branches(state);
        if branches.is_empty() {
            panic!("No legal move for an undefeated player: {:?}", state);
        }

        let mut alpha = i32::MIN;
        let mut best: Option<(Move, i32)> = None;
        for (mv, next) in branches {
            let score = self.search(&next, self.depth - 1, alpha, i32::MAX, root);
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((mv, score));
            }
            alpha = alpha.max(score);
        }

        if let Some((mv, score)) = best {
            log::debug!(
                "minimax depth {} picked {} ({}), {} nodes, {} cutoffs",
                self.depth,
                mv,
                score,
                self.stats.nodes,
                self.stats.cutoffs
            );
        }
        best
    }

    fn search(
        &mut self,
        state: &GameState,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        root: Player,
    ) -> i32 {
        self.stats.nodes += 1;
        if state.is_over() || depth == 0 {
            return evaluate(state, root);
        }
        let immediate = immediate_win(state, root);
        if immediate != 0 {
            return immediate;
        }

        let maximizing = state.current_player() == root;
        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for (_, next) in self.branches(state) {
            let score = self.search(&next, depth - 1, alpha, beta, root);
            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }
            if beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }
        best
    }

    /// Legal moves paired with their successors, one per symmetry class.
    fn branches(&self, state: &GameState) -> Vec<(Move, GameState)> {
        let mut seen = SymmetrySet::with_capacity(8);
        legal_moves(state)
            .into_iter()
            .map(|mv| (mv, successor(state, mv)))
            .filter(|(_, next)| seen.insert(next))
            .collect()
    }
}

impl Opponent for MinimaxOpponent {
    fn select_move(&mut self, state: &GameState) -> Option<Move> {
        self.best_move(state).map(|(mv, _)| mv)
    }
}

/// Static score of `state` for `root`.
fn evaluate(state: &GameState, root: Player) -> i32 {
    if state.is_over() {
        return if state.winner() == Some(root) {
            WIN_SCORE
        } else {
            LOSS_SCORE
        };
    }
    let immediate = immediate_win(state, root);
    if immediate != 0 {
        return immediate;
    }
    vulnerability(state, root)
}

/// A player down to one finger or less is one tap from losing.
fn vulnerability(state: &GameState, root: Player) -> i32 {
    let mut score = 0;
    if state.hands_of(root.opponent()).total() <= 1 {
        score += VULNERABILITY;
    }
    if state.hands_of(root).total() <= 1 {
        score -= VULNERABILITY;
    }
    score
}

/// Decided already if the side to move can finish the game with one Add.
fn immediate_win(state: &GameState, root: Player) -> i32 {
    match winning_add(state) {
        Some(_) if state.current_player() == root => WIN_SCORE,
        Some(_) => LOSS_SCORE,
        None => 0,
    }
}
