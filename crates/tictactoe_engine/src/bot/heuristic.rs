//! Intermediate bot: win, block, otherwise random.

use super::{BotStrategy, Difficulty, win_or_block};
use crate::{Board, Player};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

/// Takes an immediate win, else blocks an immediate loss, else plays randomly.
#[derive(Debug)]
pub struct HeuristicBot<R: Rng> {
    rng: R,
}

impl<R: Rng> HeuristicBot<R> {
    /// Creates a heuristic bot drawing fallback moves from `rng`.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + Send + std::fmt::Debug> BotStrategy for HeuristicBot<R> {
    fn select_move(&mut self, board: &Board, player: Player) -> usize {
        let empty = board.empty_cells();
        assert!(!empty.is_empty(), "no legal moves available");

        if let Some(cell) = win_or_block(board, player) {
            debug!(%player, cell, "Intermediate bot played tactical move");
            return cell;
        }

        let cell = *empty.choose(&mut self.rng).expect("no legal moves available");
        debug!(%player, cell, "Intermediate bot chose random cell");
        cell
    }

    fn difficulty(&self) -> Difficulty {
        Difficulty::Intermediate
    }
}
