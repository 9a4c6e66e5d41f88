use self::private::Statistics;
use chopsticks::engine::{GameEngine, GameEventHandler};
use chopsticks::opponent::{Computer, OpponentSettings};
use chopsticks::{Difficulty, GameState, Player};
use chopsticks_drivers::ConfigSimulator;

mod private {
    use chopsticks::Player;

    #[derive(Debug, Clone, Copy, Default)]
    pub struct Statistics {
        wins: [u64; 2],
        draws: u64,
        total_moves: u64,
    }

    impl Statistics {
        pub fn record_move(&mut self) {
            self.total_moves += 1;
        }

        pub fn record_win(&mut self, winner: Player) {
            match winner {
                Player::A => self.wins[0] += 1,
                Player::B => self.wins[1] += 1,
            }
        }

        pub fn record_draw(&mut self) {
            self.draws += 1;
        }

        pub fn get_wins(&self, player: Player) -> u64 {
            match player {
                Player::A => self.wins[0],
                Player::B => self.wins[1],
            }
        }

        pub fn get_draws(&self) -> u64 {
            self.draws
        }

        pub fn get_games(&self) -> u64 {
            self.wins[0] + self.wins[1] + self.draws
        }

        pub fn get_average_length(&self) -> f64 {
            if self.get_games() == 0 {
                return 0.0;
            }
            self.total_moves as f64 / self.get_games() as f64
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Handler {
    game_id: u64,
    moves_this_game: u32,
    stat: Statistics,
}

impl Handler {
    fn on_game_begin(&mut self) {
        self.game_id += 1;
        self.moves_this_game = 0;
    }

    fn on_turn_limit(&mut self) {
        log::debug!(
            "game {} stopped after {} moves",
            self.game_id,
            self.moves_this_game
        );
        self.stat.record_draw();
    }
}

impl GameEventHandler for Handler {
    fn on_state_changed(&mut self, _: &GameState) {
        self.moves_this_game += 1;
        self.stat.record_move();
    }

    fn on_game_over(&mut self, winner: Player) {
        log::debug!(
            "game {} won by {:?} in {} moves",
            self.game_id,
            winner,
            self.moves_this_game
        );
        self.stat.record_win(winner);
    }
}

pub fn simulate_games(
    settings: &OpponentSettings,
    difficulties: (Difficulty, Difficulty),
    config: &ConfigSimulator,
) -> anyhow::Result<()> {
    let (difficulty_a, difficulty_b) = difficulties;
    let mut player_a = Computer::with_settings(settings);
    player_a.set_difficulty(difficulty_a);
    // Seeded runs must not give both seats the same random stream.
    let settings_b = OpponentSettings {
        seed: settings.seed.map(|seed| seed.wrapping_add(1000)),
        ..*settings
    };
    let mut player_b = Computer::with_settings(&settings_b);
    player_b.set_difficulty(difficulty_b);

    let mut engine = GameEngine::new();
    let mut handler = Handler::default();
    for game in 0..config.number_of_games {
        if game > 0 {
            engine.reset(&mut ());
        }
        handler.on_game_begin();
        let winner =
            engine.automatic_play(&mut player_a, &mut player_b, config.max_turns, &mut handler)?;
        if winner.is_none() {
            handler.on_turn_limit();
        }
    }

    let stat = &handler.stat;
    println!(
        "Player A ({:?}) vs Player B ({:?})",
        difficulty_a, difficulty_b
    );
    println!("Games played: {}", stat.get_games());
    for player in [Player::A, Player::B] {
        let wins = stat.get_wins(player);
        println!(
            "Player {:?} wins: {} ({:.2}%)",
            player,
            wins,
            percentage(wins, stat.get_games())
        );
    }
    println!(
        "Unfinished after {} moves: {} ({:.2}%)",
        config.max_turns,
        stat.get_draws(),
        percentage(stat.get_draws(), stat.get_games())
    );
    println!(
        "Average game length: {:.2} moves",
        stat.get_average_length()
    );
    Ok(())
}

fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}
