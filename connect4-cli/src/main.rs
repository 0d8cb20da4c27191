use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

use connect4::{GameEngine, Outcome};

use config::{Cli, Commands, Config};

mod config;
mod logging;
mod tui;

fn cli_connect4_match(config: &Config) -> anyhow::Result<()> {
    // The board is allocated before the terminal is touched.
    let mut engine = GameEngine::with_dimensions(
        config.player1.clone(),
        config.player2.clone(),
        config.dimensions,
    )?;

    // Wrap the match in setup/cleanup so we make sure to cleanup on any error.
    tui::setup().context("Could not set up the terminal")?;
    let result = _cli_connect4_match(&mut engine, config);
    tui::cleanup().context("Could not restore the terminal")?;
    result
}

fn _cli_connect4_match(engine: &mut GameEngine, config: &Config) -> anyhow::Result<()> {
    let mut last_drop = None;

    loop {
        tui::show_connect4(engine, &config.palette, last_drop)?;
        match tui::read_char()? {
            'q' => return Ok(()),
            'n' => {
                engine.reset();
                last_drop = None;
            }
            c => {
                // Keys are 1-based, the engine ignores anything off the board.
                let Some(column) = c.to_digit(10).and_then(|d| d.checked_sub(1)) else {
                    continue;
                };
                match engine.drop_piece(column as usize) {
                    Outcome::Ignored => debug!(key = %c, "move ignored"),
                    Outcome::Placed { row, column }
                    | Outcome::Tied { row, column }
                    | Outcome::Won { row, column, .. } => last_drop = Some((row, column)),
                }
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    match args.command {
        Commands::Play(args) => {
            let config = Config::from_args(args)?;
            logging::init(config.log_file.as_deref(), config.log_level)?;
            info!(
                player1 = %config.player1,
                player2 = %config.player2,
                size = %config.dimensions,
                "starting match"
            );
            cli_connect4_match(&config)?;
        }
    }

    Ok(())
}
