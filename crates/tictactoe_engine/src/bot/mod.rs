//! Bot strategies, one per difficulty level.
//!
//! Every strategy picks an empty cell index for the acting player.
//! Calling a strategy on a full board is a contract violation and
//! panics.

mod heuristic;
mod minimax;
mod random;

pub use heuristic::HeuristicBot;
pub use minimax::{MinimaxBot, best_move, minimax};
pub use random::RandomBot;

use crate::{Board, Player};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};
use tracing::{instrument, trace};

/// Bot difficulty levels.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
pub enum Difficulty {
    /// Uniformly random moves.
    Easy,
    /// Takes wins, blocks losses, otherwise random.
    #[default]
    Intermediate,
    /// Perfect play via minimax with alpha-beta pruning.
    Advanced,
}

impl Difficulty {
    /// Builds the strategy for this difficulty.
    ///
    /// `rng` is only consumed by the strategies that need randomness.
    #[instrument(skip(rng))]
    pub fn strategy(self, rng: StdRng) -> Box<dyn BotStrategy> {
        match self {
            Difficulty::Easy => Box::new(RandomBot::new(rng)),
            Difficulty::Intermediate => Box::new(HeuristicBot::new(rng)),
            Difficulty::Advanced => Box::new(MinimaxBot::new()),
        }
    }

    /// Cycles Easy -> Intermediate -> Advanced -> Easy.
    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Intermediate,
            Difficulty::Intermediate => Difficulty::Advanced,
            Difficulty::Advanced => Difficulty::Easy,
        }
    }
}

/// A move-selection policy.
pub trait BotStrategy: Send + std::fmt::Debug {
    /// Picks an empty cell (0-8) for `player` to play on `board`.
    ///
    /// # Panics
    ///
    /// Panics if `board` has no empty cells.
    fn select_move(&mut self, board: &Board, player: Player) -> usize;

    /// The difficulty this strategy implements.
    fn difficulty(&self) -> Difficulty;
}

/// First cell that wins for `player`, else first cell that blocks the
/// opponent, scanning in ascending index order.
#[instrument(level = "trace", skip(board))]
pub fn win_or_block(board: &Board, player: Player) -> Option<usize> {
    let empty = board.empty_cells();

    if let Some(cell) = empty.iter().copied().find(|&c| board.would_win(player, c)) {
        trace!(cell, "Taking immediate win");
        return Some(cell);
    }

    let opponent = board.opponent(player);
    let block = empty.iter().copied().find(|&c| board.would_win(opponent, c));
    if let Some(cell) = block {
        trace!(cell, "Blocking opponent win");
    }
    block
}
