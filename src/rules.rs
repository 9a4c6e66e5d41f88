//! Legality and effect of the two kinds of move.
//!
//! Everything here is a pure function of a [`GameState`] value; the engine and
//! the opponents are the only callers that turn the results into a new state.

use crate::{GameState, HandRef, InvalidMove, Move, Player, Side, KILL_SUM, MAX_FINGERS};

/// Value of the target hand after being tapped by `source`. A sum of
/// [`KILL_SUM`] or more kills the hand.
pub fn apply_add(source: u8, target: u8) -> u8 {
    let sum = source.saturating_add(target);
    if sum >= KILL_SUM {
        0
    } else {
        sum
    }
}

pub fn is_valid_add(state: &GameState, source: HandRef, target: HandRef) -> bool {
    check_add(state, source, target).is_ok()
}

fn check_add(state: &GameState, source: HandRef, target: HandRef) -> Result<(), InvalidMove> {
    if source.player == target.player {
        return Err(InvalidMove::SameOwner);
    }
    if state.hand(source) == 0 {
        return Err(InvalidMove::DeadSource);
    }
    if state.hand(target) == 0 {
        return Err(InvalidMove::DeadTarget);
    }
    Ok(())
}

/// What the target would show if the Add went through. `None` if it can't.
pub fn preview_add(state: &GameState, source: HandRef, target: HandRef) -> Option<u8> {
    if is_valid_add(state, source, target) {
        Some(apply_add(state.hand(source), state.hand(target)))
    } else {
        None
    }
}

/// All unordered ways to hold `total` fingers on two hands, smaller hand
/// first, in ascending order.
pub fn enumerate_splits(total: u8) -> Vec<(u8, u8)> {
    let mut distributions = Vec::with_capacity(3);
    for i in 0..=MAX_FINGERS {
        for j in i..=MAX_FINGERS {
            if i + j == total {
                distributions.push((i, j));
            }
        }
    }
    distributions
}

/// Splits available from `(current_left, current_right)`. The current
/// distribution itself, in either order, is never included.
pub fn valid_splits_for(current_left: u8, current_right: u8) -> Vec<(u8, u8)> {
    let current = unordered(current_left, current_right);
    enumerate_splits(current_left + current_right)
        .into_iter()
        .filter(|distribution| *distribution != current)
        .collect()
}

pub fn is_valid_split(new_left: u8, new_right: u8, current_left: u8, current_right: u8) -> bool {
    if new_left > MAX_FINGERS || new_right > MAX_FINGERS {
        return false;
    }
    valid_splits_for(current_left, current_right).contains(&unordered(new_left, new_right))
}

fn unordered(a: u8, b: u8) -> (u8, u8) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Checks `mv` for the player whose turn it is.
pub fn check_move(state: &GameState, mv: Move) -> Result<(), InvalidMove> {
    let mover = state.current_player();
    match mv {
        Move::Add { source, target } => {
            if source.player != mover {
                return Err(InvalidMove::NotYourHand);
            }
            check_add(state, source, target)
        }
        Move::Split { left, right } => {
            for value in [left, right] {
                if value > MAX_FINGERS {
                    return Err(InvalidMove::OutOfRange(value));
                }
            }
            let hands = state.hands_of(mover);
            if is_valid_split(left, right, hands.left(), hands.right()) {
                Ok(())
            } else {
                Err(InvalidMove::SplitNotAllowed { left, right })
            }
        }
    }
}

/// Validates `mv` and returns the position after it, with the game concluded
/// or the turn passed.
pub fn apply_move(state: &GameState, mv: Move) -> Result<GameState, InvalidMove> {
    check_move(state, mv)?;
    Ok(successor(state, mv))
}

/// Same as [`apply_move`] for moves already known to be legal.
pub(crate) fn successor(state: &GameState, mv: Move) -> GameState {
    debug_assert!(check_move(state, mv).is_ok(), "illegal move {}", mv);
    let mut next = *state;
    match mv {
        Move::Add { source, target } => {
            let value = apply_add(state.hand(source), state.hand(target));
            next.hands_of_mut(target.player).set(target.side, value);
        }
        Move::Split { left, right } => {
            let hands = next.hands_of_mut(state.current_player());
            hands.set(Side::Left, left);
            hands.set(Side::Right, right);
        }
    }
    next.conclude_turn();
    next
}

/// Every legal move for the side to move: Adds first, then Splits.
pub fn legal_moves(state: &GameState) -> Vec<Move> {
    if state.is_over() {
        return Vec::new();
    }
    let mover = state.current_player();
    let mut moves = add_moves(state, mover);
    let hands = state.hands_of(mover);
    moves.extend(
        valid_splits_for(hands.left(), hands.right())
            .into_iter()
            .map(|(left, right)| Move::Split { left, right }),
    );
    moves
}

fn add_moves(state: &GameState, mover: Player) -> Vec<Move> {
    let opponent = mover.opponent();
    let mut moves = Vec::with_capacity(4);
    for source_side in state.hands_of(mover).live_sides() {
        for target_side in state.hands_of(opponent).live_sides() {
            moves.push(Move::Add {
                source: HandRef::new(mover, source_side),
                target: HandRef::new(opponent, target_side),
            });
        }
    }
    moves
}

/// An Add for the side to move that leaves the opponent with no live hand.
pub fn winning_add(state: &GameState) -> Option<Move> {
    if state.is_over() {
        return None;
    }
    let mover = state.current_player();
    let opponent = state.hands_of(mover.opponent());
    let mut live = opponent.live_sides();
    let only_target = match (live.next(), live.next()) {
        (Some(side), None) => side,
        _ => return None,
    };
    let target = HandRef::new(mover.opponent(), only_target);
    state
        .hands_of(mover)
        .live_sides()
        .map(|side| HandRef::new(mover, side))
        .find(|source| apply_add(state.hand(*source), state.hand(target)) == 0)
        .map(|source| Move::Add { source, target })
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::{PlayerHands, SymmetrySet};
    use strum::IntoEnumIterator;

    fn hand(player: Player, side: Side) -> HandRef {
        HandRef::new(player, side)
    }

    fn position(a: (u8, u8), b: (u8, u8), to_move: Player) -> GameState {
        GameState::from_hands(
            PlayerHands::new(a.0, a.1),
            PlayerHands::new(b.0, b.1),
            to_move,
        )
    }

    #[test]
    fn add_kills_at_exactly_five() {
        assert_eq!(apply_add(3, 2), 0);
        assert_eq!(apply_add(2, 1), 3);
        assert_eq!(apply_add(1, 3), 4);
        assert_eq!(apply_add(4, 4), 0);
        assert_eq!(apply_add(200, 100), 0);
    }

    #[test]
    fn add_values_never_leave_range() {
        for source in 1..=MAX_FINGERS {
            for target in 1..=MAX_FINGERS {
                assert!(apply_add(source, target) <= MAX_FINGERS);
            }
        }
    }

    #[test]
    fn add_to_own_hand_is_never_valid() {
        for a in 0..=4 {
            for b in 0..=4 {
                let state = position((a, b), (1, 1), Player::A);
                for player in Player::iter() {
                    for source in Side::iter() {
                        for target in Side::iter() {
                            let from = hand(player, source);
                            let to = hand(player, target);
                            assert!(!is_valid_add(&state, from, to));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn add_rejects_dead_source_and_dead_target() {
        let state = position((0, 2), (3, 0), Player::A);
        let a_left = hand(Player::A, Side::Left);
        let a_right = hand(Player::A, Side::Right);
        let b_left = hand(Player::B, Side::Left);
        let b_right = hand(Player::B, Side::Right);
        assert!(!is_valid_add(&state, a_left, b_left));
        assert!(!is_valid_add(&state, a_right, b_right));
        assert!(is_valid_add(&state, a_right, b_left));
        assert_eq!(preview_add(&state, a_right, b_left), Some(0));
        assert_eq!(preview_add(&state, a_left, b_left), None);
    }

    #[test]
    fn splits_enumerate_unordered_pairs() {
        assert_eq!(enumerate_splits(0), vec![(0, 0)]);
        assert_eq!(enumerate_splits(2), vec![(0, 2), (1, 1)]);
        assert_eq!(enumerate_splits(4), vec![(0, 4), (1, 3), (2, 2)]);
        assert_eq!(enumerate_splits(5), vec![(1, 4), (2, 3)]);
        assert_eq!(enumerate_splits(8), vec![(4, 4)]);
        for total in 0..=8 {
            let splits = enumerate_splits(total);
            for (i, j) in &splits {
                assert!(i <= j);
                assert_eq!(i + j, total);
            }
            let mut deduped = splits.clone();
            deduped.dedup();
            assert_eq!(deduped, splits);
        }
    }

    #[test]
    fn valid_splits_exclude_the_current_distribution() {
        assert_eq!(valid_splits_for(1, 1), vec![(0, 2)]);
        assert_eq!(valid_splits_for(3, 1), vec![(0, 4), (2, 2)]);
        assert!(valid_splits_for(0, 0).is_empty());
        assert!(valid_splits_for(4, 4).is_empty());
        for l in 0..=4 {
            for r in 0..=4 {
                let splits = valid_splits_for(l, r);
                assert!(!splits.contains(&(l, r)));
                assert!(!splits.contains(&(r, l)));
            }
        }
    }

    #[test]
    fn split_validity_ignores_order() {
        assert!(is_valid_split(0, 2, 1, 1));
        assert!(is_valid_split(2, 0, 1, 1));
        assert!(!is_valid_split(1, 1, 1, 1));
        assert!(!is_valid_split(1, 3, 3, 1));
        assert!(!is_valid_split(1, 2, 1, 1));
        assert!(!is_valid_split(5, 0, 3, 2));
    }

    #[test]
    fn check_move_reports_the_reason() {
        let state = position((1, 1), (1, 1), Player::A);
        let b_left = hand(Player::B, Side::Left);
        let a_left = hand(Player::A, Side::Left);
        let stolen = Move::Add {
            source: b_left,
            target: a_left,
        };
        assert_eq!(check_move(&state, stolen), Err(InvalidMove::NotYourHand));
        let own = Move::Add {
            source: a_left,
            target: a_left,
        };
        assert_eq!(check_move(&state, own), Err(InvalidMove::SameOwner));
        assert_eq!(
            check_move(&state, Move::Split { left: 1, right: 1 }),
            Err(InvalidMove::SplitNotAllowed { left: 1, right: 1 })
        );
        assert_eq!(
            check_move(&state, Move::Split { left: 7, right: 0 }),
            Err(InvalidMove::OutOfRange(7))
        );
    }

    #[test]
    fn opening_add_passes_the_turn() {
        let state = GameState::new(Player::A);
        let next = apply_move(
            &state,
            Move::Add {
                source: hand(Player::A, Side::Left),
                target: hand(Player::B, Side::Left),
            },
        )
        .unwrap();
        assert_eq!(*next.hands_of(Player::B), PlayerHands::new(2, 1));
        assert_eq!(*next.hands_of(Player::A), PlayerHands::new(1, 1));
        assert_eq!(next.current_player(), Player::B);
        assert!(!next.is_over());
    }

    #[test]
    fn split_rewrites_the_movers_hands() {
        let state = GameState::new(Player::A);
        let next = apply_move(&state, Move::Split { left: 2, right: 0 }).unwrap();
        assert_eq!(*next.hands_of(Player::A), PlayerHands::new(2, 0));
        assert_eq!(next.current_player(), Player::B);
    }

    #[test]
    fn legal_moves_lists_adds_then_splits() {
        let state = position((0, 3), (2, 2), Player::A);
        let moves = legal_moves(&state);
        assert_eq!(
            moves,
            vec![
                Move::Add {
                    source: hand(Player::A, Side::Right),
                    target: hand(Player::B, Side::Left),
                },
                Move::Add {
                    source: hand(Player::A, Side::Right),
                    target: hand(Player::B, Side::Right),
                },
                Move::Split { left: 1, right: 2 },
            ]
        );
        let over = position((0, 0), (2, 2), Player::A);
        assert!(legal_moves(&over).is_empty());
    }

    #[test]
    fn winning_add_needs_a_single_live_target() {
        let state = position((4, 1), (0, 1), Player::A);
        assert_eq!(
            winning_add(&state),
            Some(Move::Add {
                source: hand(Player::A, Side::Left),
                target: hand(Player::B, Side::Right),
            })
        );
        assert_eq!(winning_add(&position((1, 1), (0, 1), Player::A)), None);
        assert_eq!(winning_add(&position((4, 4), (1, 1), Player::A)), None);
    }

    #[test]
    fn every_reachable_position_stays_in_range() {
        let start = GameState::new(Player::A);
        let mut seen = SymmetrySet::new();
        let mut queue = VecDeque::from([start]);
        seen.insert(&start);
        while let Some(state) = queue.pop_front() {
            let moves = legal_moves(&state);
            if !state.is_over() {
                assert!(!moves.is_empty(), "no moves from {:?}", state);
            }
            for mv in moves {
                let next = apply_move(&state, mv).unwrap();
                for player in Player::iter() {
                    for side in Side::iter() {
                        assert!(next.hand(hand(player, side)) <= MAX_FINGERS);
                    }
                }
                if seen.insert(&next) {
                    queue.push_back(next);
                }
            }
        }
        assert!(seen.len() > 100);
    }
}
