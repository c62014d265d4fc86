use std::path::PathBuf;

use anyhow::Result;
use catsnake::{game::SnakeGame, GameConfig, Level};
use clap::Parser;

#[derive(Parser)]
#[command(name = "catsnake")]
#[command(version, about = "Steer a hungry cat around a wrap-around grid")]
struct Cli {
    /// RON config file (defaults to ./catsnake.ron when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Level picked by Enter on the start screen
    #[arg(long)]
    level: Option<Level>,

    /// Grid width in cells
    #[arg(long)]
    cols: Option<u16>,

    /// Grid height in cells
    #[arg(long)]
    rows: Option<u16>,

    /// Seed for food placement, to replay a game
    #[arg(long)]
    seed: Option<u64>,

    /// No terminal bell
    #[arg(long)]
    mute: bool,
}

fn main() -> Result<()> {
    // Logs go to stderr, redirect it while playing: `catsnake 2>catsnake.log`
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let mut game = SnakeGame::new(config)?;
    game.run()
}

fn load_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = GameConfig::load(cli.config.as_deref())?;

    if let Some(level) = cli.level {
        config.level = level;
    }
    if let Some(cols) = cli.cols {
        config.cols = cols;
    }
    if let Some(rows) = cli.rows {
        config.rows = rows;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if cli.mute {
        config.sound = false;
    }

    config.validate()?;
    Ok(config)
}
