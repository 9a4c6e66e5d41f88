use crate::opponent::Opponent;
use crate::rules;
use crate::{GameState, InvalidMove, Move, Player, Side};
use chopsticks_macros::allowed_phase;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    InPlay,
    Over,
}

/// Identifies the turn a move was computed for. Every accepted move and every
/// reset invalidates the tickets handed out before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TurnTicket {
    generation: u64,
}

/// Receives the engine's notifications. Events are delivered synchronously,
/// after the state has changed.
pub trait GameEventHandler {
    fn on_state_changed(&mut self, state: &GameState);
    fn on_game_over(&mut self, winner: Player);
}

impl GameEventHandler for () {
    fn on_state_changed(&mut self, _: &GameState) {}
    fn on_game_over(&mut self, _: Player) {}
}

/// Owns the one mutable `GameState` of a game and is the only way to change it.
#[derive(Debug, Clone)]
pub struct GameEngine {
    current_game_phase: GamePhase,
    state: GameState,
    generation: u64,
}

impl GameEngine {
    /// A fresh game. Player A moves first; each reset hands the first move to
    /// the other player.
    pub fn new() -> Self {
        Self::with_starting_player(Player::A)
    }

    pub fn with_starting_player(starting_player: Player) -> Self {
        Self::from_state(GameState::new(starting_player))
    }

    /// Continues from an arbitrary position.
    pub fn from_state(state: GameState) -> Self {
        let current_game_phase = if state.is_over() {
            GamePhase::Over
        } else {
            GamePhase::InPlay
        };
        GameEngine {
            current_game_phase,
            state,
            generation: 0,
        }
    }

    pub fn get_hand(&self, player: Player, side: Side) -> u8 {
        self.state.hands_of(player).get(side)
    }

    pub fn get_current_player(&self) -> Player {
        self.state.current_player()
    }

    pub fn is_over(&self) -> bool {
        self.current_game_phase == GamePhase::Over
    }

    pub fn get_winner(&self) -> Option<Player> {
        self.state.winner()
    }

    pub fn phase(&self) -> GamePhase {
        self.current_game_phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// A copy of the current position for opponents and renderers.
    pub fn snapshot(&self) -> GameState {
        self.state
    }

    pub fn ticket(&self) -> TurnTicket {
        TurnTicket {
            generation: self.generation,
        }
    }

    /// Can be called at InPlay phase.
    /// Validates and applies `mv` for the player to move. On success the
    /// handler sees the new state, and the winner too if the move ended the
    /// game. On error nothing changes.
    #[allowed_phase(InPlay)]
    pub fn submit_move<U: GameEventHandler + ?Sized>(
        &mut self,
        mv: Move,
        handler: &mut U,
    ) -> Result<(), InvalidMove> {
        let next = rules::apply_move(&self.state, mv)?;
        log::trace!("{:?} plays {}", self.state.current_player(), mv);
        self.state = next;
        self.generation += 1;
        handler.on_state_changed(&self.state);

        if let Some(winner) = self.state.winner() {
            self.current_game_phase = GamePhase::Over;
            log::info!("game over, {:?} wins", winner);
            handler.on_game_over(winner);
        }
        Ok(())
    }

    /// Can be called at InPlay phase.
    /// Same as [`Self::submit_move`] for a move computed ahead of time, e.g.
    /// after a think delay. Refused if anything happened since `ticket` was
    /// taken.
    #[allowed_phase(InPlay)]
    pub fn submit_scheduled_move<U: GameEventHandler + ?Sized>(
        &mut self,
        ticket: TurnTicket,
        mv: Move,
        handler: &mut U,
    ) -> Result<(), InvalidMove> {
        if ticket != self.ticket() {
            return Err(InvalidMove::StaleTicket);
        }
        self.submit_move(mv, handler)
    }

    /// Can be called at any phase.
    /// Starts a new game with every hand at 1. The other player moves first.
    pub fn reset<U: GameEventHandler + ?Sized>(&mut self, handler: &mut U) {
        self.state.reset();
        self.current_game_phase = GamePhase::InPlay;
        self.generation += 1;
        log::info!("new game, {:?} moves first", self.state.starting_player());
        handler.on_state_changed(&self.state);
    }

    /// Can be called at InPlay phase.
    /// Lets `opponent` move for whoever is on turn. Returns the move played.
    #[allowed_phase(InPlay)]
    pub fn play_computer_turn<T: Opponent + ?Sized, U: GameEventHandler + ?Sized>(
        &mut self,
        opponent: &mut T,
        handler: &mut U,
    ) -> Result<Move, InvalidMove> {
        let mv = match opponent.select_move(&self.state) {
            Some(mv) => mv,
            None => panic!("Opponent found no move in a running game!"),
        };
        self.submit_move(mv, handler)?;
        Ok(mv)
    }

    /// Plays the current game to the end with `player_a` and `player_b` moving
    /// for their sides. Returns the winner, or `None` if nobody has won after
    /// `max_turns` moves.
    pub fn automatic_play<T, S, U>(
        &mut self,
        player_a: &mut T,
        player_b: &mut S,
        max_turns: u32,
        handler: &mut U,
    ) -> Result<Option<Player>, InvalidMove>
    where
        T: Opponent + ?Sized,
        S: Opponent + ?Sized,
        U: GameEventHandler + ?Sized,
    {
        let mut turns = 0;
        while self.current_game_phase == GamePhase::InPlay {
            if turns == max_turns {
                return Ok(None);
            }
            match self.state.current_player() {
                Player::A => self.play_computer_turn(player_a, handler)?,
                Player::B => self.play_computer_turn(player_b, handler)?,
            };
            turns += 1;
        }
        Ok(self.get_winner())
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        GameEngine::new()
    }
}
