//! Tictactoe - terminal game and bot simulator.

#![warn(missing_docs)]

mod cli;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::path::Path;
use tictactoe::{AppConfig, SimulationConfig, run_simulation};
use tictactoe_engine::{Difficulty, GameController, GameEngine, Player};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load config")?;

    match cli.command {
        Command::Play {
            difficulty,
            bot_player,
            no_bot,
            delay_ms,
            seed,
        } => {
            let config = apply_overrides(
                config,
                difficulty.map(Difficulty::from),
                bot_player.map(Player::from),
                no_bot,
                delay_ms,
                seed,
            );
            run_play(config).await
        }
        Command::Simulate {
            x,
            o,
            games,
            seed,
            json,
        } => {
            init_stderr_logging(config.log_filter());
            run_simulate(SimulationConfig::new(x.into(), o.into(), games, seed), json)
        }
    }
}

/// Layers command-line flags over the loaded config.
fn apply_overrides(
    mut config: AppConfig,
    difficulty: Option<Difficulty>,
    bot_player: Option<Player>,
    no_bot: bool,
    delay_ms: Option<u64>,
    seed: Option<u64>,
) -> AppConfig {
    let mut bot = *config.bot();
    if let Some(difficulty) = difficulty {
        bot = bot.with_difficulty(difficulty);
    }
    if let Some(bot_player) = bot_player {
        bot = bot.with_bot_player(bot_player);
    }
    if no_bot {
        bot = bot.with_enabled(false);
    }
    config.set_bot(bot);

    if let Some(delay_ms) = delay_ms {
        config.set_reply_delay_ms(delay_ms);
    }
    if seed.is_some() {
        config.set_seed(seed);
    }
    config
}

/// Run the interactive terminal game
async fn run_play(config: AppConfig) -> Result<()> {
    init_file_logging(config.log_file(), config.log_filter())?;
    info!(
        enabled = config.bot().enabled,
        difficulty = %config.bot().difficulty,
        bot_player = %config.bot().bot_player,
        "Starting tictactoe"
    );

    let engine = match config.seed() {
        Some(seed) => GameEngine::with_seed(*config.bot(), *seed),
        None => GameEngine::new(*config.bot()),
    };
    let (controller, events) = GameController::new(engine, config.reply_delay());

    tui::run_tui(controller, events).await
}

/// Run a bot-versus-bot match and print the report
#[instrument]
fn run_simulate(config: SimulationConfig, json: bool) -> Result<()> {
    let report = run_simulation(config);

    if json {
        let out = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{}", out);
    } else {
        println!("{}", report.headline());
        println!();
        println!("{}", report.statistics().summary());
        println!();
        print!("{}", report.statistics().bot_summary());
    }
    Ok(())
}

/// Logs to a file so the terminal stays free for the UI.
fn init_file_logging(path: &Path, default_filter: &str) -> Result<()> {
    let log_file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized
    Ok(())
}

fn init_stderr_logging(default_filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
