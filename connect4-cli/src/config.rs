use std::path::PathBuf;

use anyhow::{bail, ensure};
use clap::{Args, Parser, Subcommand};
use crossterm::style::Color;
use tracing::level_filters::LevelFilter;

use connect4::{Dimensions, Player, Seat};

/// Columns are picked with the digit keys 1-9.
pub const MAX_COLUMNS: usize = 9;
/// Taller boards don't fit on a terminal.
pub const MAX_ROWS: usize = 20;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Play a match between two people at this terminal
    Play(PlayArgs),
}

#[derive(Args)]
pub struct PlayArgs {
    /// Color of the first player (red, dark_blue, ...)
    #[arg(long, env = "CONNECT4_PLAYER1", default_value = "red")]
    pub player1: String,
    /// Color of the second player
    #[arg(long, env = "CONNECT4_PLAYER2", default_value = "yellow")]
    pub player2: String,
    /// Board size as WIDTHxHEIGHT
    #[arg(long, env = "CONNECT4_SIZE", default_value = "7x6")]
    pub size: Dimensions,
    /// Write logs to this file. Nothing is logged without it.
    #[arg(long, env = "CONNECT4_LOG_FILE")]
    pub log_file: Option<PathBuf>,
    #[arg(long, env = "CONNECT4_LOG_LEVEL", default_value = "info")]
    pub log_level: LevelFilter,
}

/// Terminal colors for the two seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub first: Color,
    pub second: Color,
}

impl Palette {
    pub fn color(&self, seat: Seat) -> Color {
        match seat {
            Seat::First => self.first,
            Seat::Second => self.second,
        }
    }
}

#[derive(Debug)]
pub struct Config {
    pub player1: Player,
    pub player2: Player,
    pub palette: Palette,
    pub dimensions: Dimensions,
    pub log_file: Option<PathBuf>,
    pub log_level: LevelFilter,
}

fn parse_color(name: &str) -> Option<Color> {
    Color::try_from(name.trim()).ok()
}

impl Config {
    pub fn from_args(args: PlayArgs) -> anyhow::Result<Self> {
        let (first, second) = match (parse_color(&args.player1), parse_color(&args.player2)) {
            (Some(first), Some(second)) if first != second => (first, second),
            _ => bail!("Please enter valid color values for Player colors"),
        };
        ensure!(
            args.size.width <= MAX_COLUMNS,
            "Boards can be at most {} columns wide. Got `{}`.",
            MAX_COLUMNS,
            args.size
        );
        ensure!(
            args.size.height <= MAX_ROWS,
            "Boards can be at most {} rows tall. Got `{}`.",
            MAX_ROWS,
            args.size
        );

        Ok(Self {
            player1: Player::new(args.player1.trim()),
            player2: Player::new(args.player2.trim()),
            palette: Palette { first, second },
            dimensions: args.size,
            log_file: args.log_file,
            log_level: args.log_level,
        })
    }
}
