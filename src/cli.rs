//! Command-line interface for tictactoe.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tictactoe_engine::{Difficulty, Player};

/// Tic-tac-toe against Easy, Intermediate and Advanced bots
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Tic-tac-toe with a minimax bot", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// Bot strength (overrides config)
        #[arg(short, long, value_enum)]
        difficulty: Option<DifficultyArg>,

        /// Mark the bot plays (overrides config)
        #[arg(short, long, value_enum)]
        bot_player: Option<MarkArg>,

        /// Two-player mode, no bot
        #[arg(long)]
        no_bot: bool,

        /// Bot reply delay in milliseconds (overrides config)
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Seed for bot randomness (overrides config)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Pit two bots against each other
    Simulate {
        /// Strategy playing X
        #[arg(long, value_enum, default_value = "easy")]
        x: DifficultyArg,

        /// Strategy playing O
        #[arg(long, value_enum, default_value = "advanced")]
        o: DifficultyArg,

        /// Number of games
        #[arg(short, long, default_value = "100")]
        games: u32,

        /// Base seed
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Bot strength as a CLI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DifficultyArg {
    /// Random moves
    Easy,
    /// Win, block, otherwise random
    Intermediate,
    /// Minimax
    Advanced,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Intermediate => Difficulty::Intermediate,
            DifficultyArg::Advanced => Difficulty::Advanced,
        }
    }
}

/// Mark as a CLI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MarkArg {
    /// X, moves first
    X,
    /// O, moves second
    O,
}

impl From<MarkArg> for Player {
    fn from(arg: MarkArg) -> Self {
        match arg {
            MarkArg::X => Player::X,
            MarkArg::O => Player::O,
        }
    }
}
