//! Headless bot-versus-bot matches.

use crate::statistics::Statistics;
use derive_getters::Getters;
use derive_new::new;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use std::time::Instant;
use tictactoe_engine::{BotSettings, Difficulty, GameEngine, GameStatus, Player};
use tracing::{debug, info, instrument};

/// Parameters for a series of bot games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, new)]
pub struct SimulationConfig {
    /// Strategy playing X.
    x: Difficulty,
    /// Strategy playing O; recorded as the bot in the statistics.
    o: Difficulty,
    /// Number of games.
    games: u32,
    /// Base seed; game `n` uses a seed derived from it.
    seed: u64,
}

/// Outcome of a simulation run.
#[derive(Debug, Clone, Serialize, Getters)]
pub struct MatchReport {
    x: Difficulty,
    o: Difficulty,
    x_wins: u32,
    o_wins: u32,
    draws: u32,
    statistics: Statistics,
}

impl MatchReport {
    /// One-line result, e.g. `Easy (X) vs Advanced (O): 0-87-13 (X wins-O wins-draws)`.
    pub fn headline(&self) -> String {
        format!(
            "{} (X) vs {} (O): {}-{}-{} (X wins-O wins-draws)",
            self.x, self.o, self.x_wins, self.o_wins, self.draws
        )
    }
}

/// Mixes a base seed and a game number into a per-game seed.
fn derive_seed(base: u64, game: u32) -> u64 {
    base.wrapping_mul(0x9E37_79B9_7F4A_7C15)
        .wrapping_add(u64::from(game))
        .rotate_left(17)
}

/// Plays one game between two strategies and returns its final status.
///
/// The O strategy is the engine's own bot and answers every X move; X is
/// driven from outside through `make_move`.
#[instrument]
pub fn play_game(x: Difficulty, o: Difficulty, seed: u64) -> GameStatus {
    let mut engine = GameEngine::with_seed(BotSettings::bot(o, Player::O), seed);
    let mut x_bot = x.strategy(StdRng::seed_from_u64(seed.rotate_right(7)));

    while !engine.is_game_over() {
        let cell = x_bot.select_move(engine.board(), Player::X);
        engine.make_move(cell);
    }

    debug!(status = ?engine.status(), moves = engine.history().len(), "Game finished");
    engine.status()
}

/// Runs `config.games` games and aggregates the results.
#[instrument]
pub fn run(config: SimulationConfig) -> MatchReport {
    info!("Starting simulation");
    let mut statistics = Statistics::new();
    let (mut x_wins, mut o_wins, mut draws) = (0, 0, 0);

    for game in 0..config.games {
        let started = Instant::now();
        let status = play_game(config.x, config.o, derive_seed(config.seed, game));
        match status.winner() {
            Some(Player::X) => x_wins += 1,
            Some(Player::O) => o_wins += 1,
            None => draws += 1,
        }
        statistics.record_game_result(
            status.winner(),
            started.elapsed(),
            Some((config.o, Player::O)),
        );
    }

    info!(x_wins, o_wins, draws, "Simulation complete");
    MatchReport {
        x: config.x,
        o: config.o,
        x_wins,
        o_wins,
        draws,
        statistics,
    }
}
