use anyhow::{bail, Context};
use chopsticks::engine::{GameEngine, GameEventHandler};
use chopsticks::opponent::{Computer, OpponentSettings};
use chopsticks::rules::preview_add;
use chopsticks::schedule::PendingMove;
use chopsticks::{Difficulty, GameState, InvalidMove, Move, Player, Side};
use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

pub const DEFAULT_CONFIG_PATH: &str = "~/.chopsticks.yml";

/// The human sits at the bottom of the table.
pub const HUMAN_PLAYER: Player = Player::A;
pub const COMPUTER_PLAYER: Player = Player::B;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub opponent: ConfigOpponent,
    pub simulator: ConfigSimulator,
    pub play: ConfigPlay,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigOpponent {
    pub difficulty: String,
    pub search_depth: u32,
    pub blended_search_depth: u32,
    pub blended_random_weight: f64,
    pub seed: Option<u64>,
}

impl TryInto<OpponentSettings> for ConfigOpponent {
    type Error = serde::de::value::Error;

    fn try_into(self) -> Result<OpponentSettings, Self::Error> {
        if self.search_depth == 0 || self.blended_search_depth == 0 {
            return Err(serde::de::value::Error::custom(
                "search depths must be at least 1",
            ));
        }
        if !(0.0..=1.0).contains(&self.blended_random_weight) {
            return Err(serde::de::value::Error::custom(
                "blended_random_weight must be in [0, 1]",
            ));
        }
        let settings = OpponentSettings {
            difficulty: self.difficulty.parse()?,
            search_depth: self.search_depth,
            blended_search_depth: self.blended_search_depth,
            blended_random_weight: self.blended_random_weight,
            seed: self.seed,
        };

        Ok(settings)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSimulator {
    pub number_of_games: u64,
    pub max_turns: u32,
    pub player_a: String,
    pub player_b: String,
}

impl ConfigSimulator {
    pub fn difficulties(&self) -> Result<(Difficulty, Difficulty), serde::de::value::Error> {
        Ok((self.player_a.parse()?, self.player_b.parse()?))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigPlay {
    pub think_delay_ms: u64,
}

impl ConfigPlay {
    pub fn think_delay(&self) -> Duration {
        Duration::from_millis(self.think_delay_ms)
    }
}

/// Turns the `--config` argument into a file path, looking in the home
/// directory for the default one.
pub fn resolve_config_path(arg: &str) -> anyhow::Result<PathBuf> {
    let path = if arg == DEFAULT_CONFIG_PATH {
        let home_dir = home::home_dir().context("Cannot find home directory")?;
        home_dir.join(".chopsticks.yml")
    } else {
        PathBuf::from(arg)
    };
    if !path.exists() {
        bail!("Config file {} does not exist", path.display());
    }
    if path.is_dir() {
        bail!(
            "{} should be a file rather than a directory",
            path.display()
        );
    }
    Ok(path)
}

/// Reads the content of a given config file and parses it to a Config.
pub fn parse_config_from_file(filename: &Path) -> anyhow::Result<Config> {
    let file_content = fs::read_to_string(filename)
        .with_context(|| format!("Cannot read {}", filename.display()))?;
    parse_config(&file_content)
}

pub fn parse_config(content: &str) -> anyhow::Result<Config> {
    serde_yaml::from_str(content).context("Malformed config")
}

/// Draws the table with Player B across the top and Player A at the bottom.
pub fn render_table(state: &GameState) -> String {
    let row = |player: Player, name: &str| {
        let hands = state.hands_of(player);
        let marker = if !state.is_over() && state.current_player() == player {
            "*"
        } else {
            " "
        };
        format!(
            "{} {:<8} L:{}  R:{}",
            marker,
            name,
            hands.get(Side::Left),
            hands.get(Side::Right)
        )
    };
    format!("{}\n{}", row(Player::B, "top"), row(Player::A, "bottom"))
}

/// Menu label for a move, showing what an Add would leave on the target.
pub fn describe_move(state: &GameState, mv: Move) -> String {
    match mv {
        Move::Add { source, target } => match preview_add(state, source, target) {
            Some(0) => format!("{} (kills it)", mv),
            Some(after) => format!("{} (makes {})", mv, after),
            None => mv.to_string(),
        },
        Move::Split { .. } => mv.to_string(),
    }
}

/// A human against the computer. The computer's move is played after a think
/// delay, and is thrown away if the game restarts before it arrives.
pub struct Session<U: GameEventHandler> {
    engine: GameEngine,
    computer: Arc<Mutex<Computer>>,
    pending: Option<PendingMove>,
    think_delay: Duration,
    handler: U,
}

impl<U: GameEventHandler> Session<U> {
    pub fn new(settings: &OpponentSettings, think_delay: Duration, handler: U) -> Self {
        Session {
            engine: GameEngine::new(),
            computer: Arc::new(Mutex::new(Computer::with_settings(settings))),
            pending: None,
            think_delay,
            handler,
        }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn handler(&self) -> &U {
        &self.handler
    }

    pub fn is_thinking(&self) -> bool {
        self.pending.is_some()
    }

    pub fn submit_human_move(&mut self, mv: Move) -> Result<(), InvalidMove> {
        if !self.engine.is_over() && self.engine.get_current_player() != HUMAN_PLAYER {
            return Err(InvalidMove::NotYourHand);
        }
        self.engine.submit_move(mv, &mut self.handler)
    }

    /// Starts the computer's think delay if it is on turn and not already
    /// thinking. Must be called from within a tokio runtime.
    pub fn schedule_computer_move(&mut self) -> bool {
        if self.pending.is_some()
            || self.engine.is_over()
            || self.engine.get_current_player() != COMPUTER_PLAYER
        {
            return false;
        }
        self.pending = Some(PendingMove::spawn(
            Arc::clone(&self.computer),
            self.engine.snapshot(),
            self.engine.ticket(),
            self.think_delay,
        ));
        true
    }

    /// Waits for the scheduled computer move and plays it. `Ok(None)` if
    /// nothing was scheduled or the move was cancelled.
    pub async fn play_computer_move(&mut self) -> Result<Option<Move>, InvalidMove> {
        let scheduled = match self.pending.as_mut() {
            Some(pending) => pending.wait().await,
            None => return Ok(None),
        };
        self.pending = None;
        match scheduled {
            Some(scheduled) => {
                self.engine
                    .submit_scheduled_move(scheduled.ticket, scheduled.mv, &mut self.handler)?;
                Ok(Some(scheduled.mv))
            }
            None => Ok(None),
        }
    }

    /// Cancels the computer's pending move, if any, and starts a new game.
    pub fn restart(&mut self) {
        if let Some(pending) = self.pending.take() {
            log::debug!("discarding computer move for {:?}", pending.ticket());
            pending.cancel();
        }
        self.engine.reset(&mut self.handler);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TYPICAL_CONFIG: &str = "
opponent:
  difficulty: Hard
  search_depth: 12
  blended_search_depth: 4
  blended_random_weight: 0.4
  seed: 7
simulator:
  number_of_games: 1000
  max_turns: 200
  player_a: Medium
  player_b: Hard
play:
  think_delay_ms: 1000
";

    fn get_typical_config_opponent() -> ConfigOpponent {
        ConfigOpponent {
            difficulty: String::from("Medium"),
            search_depth: 12,
            blended_search_depth: 4,
            blended_random_weight: 0.4,
            seed: None,
        }
    }

    #[test]
    fn can_convert_opponent() {
        let config_opponent = get_typical_config_opponent();
        let settings: OpponentSettings = config_opponent.try_into().unwrap();
        assert_eq!(settings.difficulty, Difficulty::Medium);
        assert_eq!(settings.search_depth, 12);
        assert_eq!(settings.blended_random_weight, 0.4);
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn should_return_error_when_converting_opponent() {
        let mut config_opponent = get_typical_config_opponent();
        config_opponent.difficulty = String::from("Not a difficulty");
        let convert_result: Result<OpponentSettings, serde::de::value::Error> =
            config_opponent.try_into();
        assert!(convert_result.is_err());

        let mut config_opponent = get_typical_config_opponent();
        config_opponent.blended_random_weight = 1.5;
        let convert_result: Result<OpponentSettings, _> = config_opponent.try_into();
        assert!(convert_result.is_err());

        let mut config_opponent = get_typical_config_opponent();
        config_opponent.search_depth = 0;
        let convert_result: Result<OpponentSettings, _> = config_opponent.try_into();
        assert!(convert_result.is_err());
    }

    #[test]
    fn can_parse_yaml() {
        let config = parse_config(TYPICAL_CONFIG).unwrap();
        assert_eq!(config.opponent.seed, Some(7));
        assert_eq!(config.simulator.number_of_games, 1000);
        assert_eq!(
            config.simulator.difficulties().unwrap(),
            (Difficulty::Medium, Difficulty::Hard)
        );
        assert_eq!(config.play.think_delay(), Duration::from_secs(1));
    }

    #[test]
    fn seed_is_optional() {
        let config = parse_config(&TYPICAL_CONFIG.replace("  seed: 7\n", "")).unwrap();
        assert_eq!(config.opponent.seed, None);
    }

    #[test]
    fn table_marks_the_side_to_move() {
        let table = render_table(&GameState::new(Player::A));
        assert_eq!(table, "  top      L:1  R:1\n* bottom   L:1  R:1");
    }

    #[test]
    fn add_labels_preview_the_result() {
        use chopsticks::{HandRef, PlayerHands};

        let state = GameState::from_hands(
            PlayerHands::new(3, 1),
            PlayerHands::new(2, 1),
            Player::A,
        );
        let kill = Move::Add {
            source: HandRef::new(Player::A, Side::Left),
            target: HandRef::new(Player::B, Side::Left),
        };
        assert_eq!(
            describe_move(&state, kill),
            "add bottomLeft -> topLeft (kills it)"
        );
        let tap = Move::Add {
            source: HandRef::new(Player::A, Side::Right),
            target: HandRef::new(Player::B, Side::Right),
        };
        assert_eq!(
            describe_move(&state, tap),
            "add bottomRight -> topRight (makes 2)"
        );
        let split = Move::Split { left: 2, right: 2 };
        assert_eq!(describe_move(&state, split), "split 2/2");
    }

    #[derive(Debug, Default)]
    struct Counter {
        changes: usize,
    }

    impl GameEventHandler for Counter {
        fn on_state_changed(&mut self, _: &GameState) {
            self.changes += 1;
        }

        fn on_game_over(&mut self, _: Player) {}
    }

    fn session(think_delay: Duration) -> Session<Counter> {
        let settings = OpponentSettings {
            difficulty: Difficulty::Easy,
            seed: Some(1),
            ..Default::default()
        };
        Session::new(&settings, think_delay, Counter::default())
    }

    #[tokio::test]
    async fn restart_discards_the_move_being_thought_about() {
        let mut session = session(Duration::from_millis(200));
        // The computer opens the second game.
        session.restart();
        assert!(session.schedule_computer_move());
        assert!(session.is_thinking());

        session.restart();
        assert!(!session.is_thinking());
        assert_eq!(session.play_computer_move().await, Ok(None));
        assert_eq!(
            *session.engine().state(),
            GameState::new(HUMAN_PLAYER)
        );
        assert_eq!(session.handler().changes, 2);
    }

    #[tokio::test]
    async fn computer_answers_after_the_delay() {
        let mut session = session(Duration::from_millis(10));
        session.restart();
        assert!(session.schedule_computer_move());
        assert!(!session.schedule_computer_move());
        let mv = session.play_computer_move().await.unwrap();
        assert!(mv.is_some());
        assert!(!session.is_thinking());
        assert_eq!(session.engine().get_current_player(), HUMAN_PLAYER);
        assert_eq!(session.handler().changes, 2);
    }

    #[tokio::test]
    async fn human_only_moves_on_their_turn() {
        let mut session = session(Duration::ZERO);
        assert!(!session.schedule_computer_move());
        let split = Move::Split { left: 0, right: 2 };
        assert_eq!(session.submit_human_move(split), Ok(()));
        assert_eq!(
            session.submit_human_move(split),
            Err(InvalidMove::NotYourHand)
        );
        assert_eq!(session.engine().get_current_player(), COMPUTER_PLAYER);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(resolve_config_path("/definitely/not/here.yml").is_err());
    }
}
