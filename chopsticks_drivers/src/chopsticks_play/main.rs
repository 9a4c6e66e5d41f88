use anyhow::Context;
use chopsticks::engine::GameEventHandler;
use chopsticks::opponent::OpponentSettings;
use chopsticks::rules::legal_moves;
use chopsticks::{GameState, Player};
use chopsticks_drivers::{
    describe_move, parse_config_from_file, render_table, resolve_config_path, Session,
    COMPUTER_PLAYER, DEFAULT_CONFIG_PATH, HUMAN_PLAYER,
};
use clap::Parser;
use dialoguer::Select;

#[derive(Debug, Parser)]
#[command(author, about, long_about = None)]
struct CommandLineArgs {
    /// The path of the config file
    #[arg(short, long, default_value_t = String::from(DEFAULT_CONFIG_PATH))]
    config: String,
}

/// Prints the table whenever the engine reports a change.
struct Table;

impl GameEventHandler for Table {
    fn on_state_changed(&mut self, state: &GameState) {
        println!("\n{}\n", render_table(state));
    }

    fn on_game_over(&mut self, winner: Player) {
        if winner == HUMAN_PLAYER {
            println!("You win!");
        } else {
            println!("The computer wins.");
        }
    }
}

enum Choice {
    Played,
    Restart,
    Quit,
}

fn human_turn(session: &mut Session<Table>) -> anyhow::Result<Choice> {
    let state = session.engine().snapshot();
    let moves = legal_moves(&state);
    let mut labels: Vec<String> = moves
        .iter()
        .map(|&mv| describe_move(&state, mv))
        .collect();
    labels.push(String::from("Restart"));
    labels.push(String::from("Quit"));

    let selection = Select::new()
        .with_prompt("Your move")
        .items(&labels)
        .default(0)
        .interact()?;
    match moves.get(selection) {
        Some(&mv) => {
            session.submit_human_move(mv)?;
            Ok(Choice::Played)
        }
        None if selection == moves.len() => Ok(Choice::Restart),
        None => Ok(Choice::Quit),
    }
}

async fn computer_turn(session: &mut Session<Table>) -> anyhow::Result<Choice> {
    session.schedule_computer_move();
    println!("The computer is thinking... (Ctrl-C to start over)");
    tokio::select! {
        played = session.play_computer_move() => {
            match played? {
                Some(mv) => println!("The computer plays {}", mv),
                None => log::warn!("computer move was discarded"),
            }
            Ok(Choice::Played)
        }
        interrupted = tokio::signal::ctrl_c() => {
            interrupted.context("Cannot listen for Ctrl-C")?;
            Ok(Choice::Restart)
        }
    }
}

fn ask_after_game() -> anyhow::Result<Choice> {
    let selection = Select::new()
        .with_prompt("Game over")
        .items(&["Play again", "Quit"])
        .default(0)
        .interact()?;
    Ok(if selection == 0 {
        Choice::Restart
    } else {
        Choice::Quit
    })
}

async fn run(session: &mut Session<Table>) -> anyhow::Result<()> {
    Table.on_state_changed(session.engine().state());
    loop {
        let engine = session.engine();
        let choice = if engine.is_over() {
            ask_after_game()?
        } else if engine.get_current_player() == HUMAN_PLAYER {
            human_turn(session)?
        } else {
            computer_turn(session).await?
        };
        match choice {
            Choice::Played => {}
            Choice::Restart => session.restart(),
            Choice::Quit => return Ok(()),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = CommandLineArgs::parse();

    let config_path = resolve_config_path(&args.config)?;
    let config = parse_config_from_file(&config_path)?;
    log::debug!("{:#?}", config);

    let settings: OpponentSettings = config
        .opponent
        .clone()
        .try_into()
        .context("Invalid opponent config")?;
    println!(
        "You are {:?} at the bottom, the computer ({:?}) is {:?} at the top.",
        HUMAN_PLAYER, settings.difficulty, COMPUTER_PLAYER
    );
    let mut session = Session::new(&settings, config.play.think_delay(), Table);
    run(&mut session).await
}
