use crate::{HandRef, Player, Side, MAX_FINGERS};

/// The two hands of one player. Both values stay in `[0, 4]`; 0 is a dead hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayerHands {
    left: u8,
    right: u8,
}

impl PlayerHands {
    pub const STARTING: PlayerHands = PlayerHands { left: 1, right: 1 };

    pub fn new(left: u8, right: u8) -> Self {
        if left > MAX_FINGERS || right > MAX_FINGERS {
            panic!("Invalid hand value! It must be in [0, {}]", MAX_FINGERS)
        }
        PlayerHands { left, right }
    }

    pub fn left(&self) -> u8 {
        self.left
    }

    pub fn right(&self) -> u8 {
        self.right
    }

    pub fn get(&self, side: Side) -> u8 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn set(&mut self, side: Side, value: u8) {
        debug_assert!(value <= MAX_FINGERS);
        match side {
            Side::Left => self.left = value,
            Side::Right => self.right = value,
        }
    }

    pub fn total(&self) -> u8 {
        self.left + self.right
    }

    pub fn is_defeated(&self) -> bool {
        self.left == 0 && self.right == 0
    }

    /// Sides whose hand is still alive, left first.
    pub fn live_sides(&self) -> impl Iterator<Item = Side> + '_ {
        [Side::Left, Side::Right]
            .into_iter()
            .filter(move |side| self.get(*side) > 0)
    }

    /// The hands as an unordered pair, smaller value first.
    pub fn canonical(&self) -> (u8, u8) {
        if self.left <= self.right {
            (self.left, self.right)
        } else {
            (self.right, self.left)
        }
    }
}

impl Default for PlayerHands {
    fn default() -> Self {
        PlayerHands::STARTING
    }
}

/// Everything needed to render or search a position.
///
/// Only the engine and the rules mutate a `GameState`; everyone else works on
/// copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    hands: [PlayerHands; 2],
    current_player: Player,
    starting_player: Player,
    is_over: bool,
    winner: Option<Player>,
}

impl GameState {
    pub fn new(starting_player: Player) -> Self {
        GameState {
            hands: [PlayerHands::STARTING; 2],
            current_player: starting_player,
            starting_player,
            is_over: false,
            winner: None,
        }
    }

    /// Builds an arbitrary position with `to_move` on turn. Terminal positions
    /// come out already concluded.
    pub fn from_hands(a: PlayerHands, b: PlayerHands, to_move: Player) -> Self {
        let mut state = GameState {
            hands: [a, b],
            current_player: to_move,
            starting_player: to_move,
            is_over: false,
            winner: None,
        };
        state.detect_winner(to_move.opponent());
        state
    }

    pub fn hands_of(&self, player: Player) -> &PlayerHands {
        &self.hands[player.index()]
    }

    pub(crate) fn hands_of_mut(&mut self, player: Player) -> &mut PlayerHands {
        &mut self.hands[player.index()]
    }

    pub fn hand(&self, hand: HandRef) -> u8 {
        self.hands_of(hand.player).get(hand.side)
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn starting_player(&self) -> Player {
        self.starting_player
    }

    pub fn is_over(&self) -> bool {
        self.is_over
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn is_defeated(&self, player: Player) -> bool {
        self.hands_of(player).is_defeated()
    }

    /// Called after the current player's move has been applied. Either ends
    /// the game or passes the turn.
    pub(crate) fn conclude_turn(&mut self) {
        let mover = self.current_player;
        if !self.detect_winner(mover) {
            self.current_player = mover.opponent();
        }
    }

    /// If both players are wiped out at once the player who just moved wins.
    fn detect_winner(&mut self, mover: Player) -> bool {
        let winner = if self.is_defeated(mover.opponent()) {
            Some(mover)
        } else if self.is_defeated(mover) {
            Some(mover.opponent())
        } else {
            None
        };
        if winner.is_some() {
            self.is_over = true;
            self.winner = winner;
        }
        winner.is_some()
    }

    /// Restores the opening position and hands the first move to the other
    /// player.
    pub(crate) fn reset(&mut self) {
        self.starting_player = self.starting_player.opponent();
        self.hands = [PlayerHands::STARTING; 2];
        self.current_player = self.starting_player;
        self.is_over = false;
        self.winner = None;
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState::new(Player::A)
    }
}
