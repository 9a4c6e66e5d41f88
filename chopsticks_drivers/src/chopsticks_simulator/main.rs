mod simulation;

use anyhow::Context;
use chopsticks::opponent::OpponentSettings;
use chopsticks_drivers::{parse_config_from_file, resolve_config_path, DEFAULT_CONFIG_PATH};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, about, long_about = None)]
struct CommandLineArgs {
    /// The path of the config file
    #[arg(short, long, default_value_t = String::from(DEFAULT_CONFIG_PATH))]
    config: String,
}

fn main() -> anyhow::Result<()> {
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
    let difficulties = config
        .simulator
        .difficulties()
        .context("Invalid simulator config")?;
    simulation::simulate_games(&settings, difficulties, &config.simulator)
}
