//! Easy bot: uniform random moves.

use super::{BotStrategy, Difficulty};
use crate::{Board, Player};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

/// Picks uniformly among the empty cells.
#[derive(Debug)]
pub struct RandomBot<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomBot<R> {
    /// Creates a random bot drawing from `rng`.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + Send + std::fmt::Debug> BotStrategy for RandomBot<R> {
    fn select_move(&mut self, board: &Board, player: Player) -> usize {
        let empty = board.empty_cells();
        let cell = *empty.choose(&mut self.rng).expect("no legal moves available");
        debug!(%player, cell, "Easy bot chose cell");
        cell
    }

    fn difficulty(&self) -> Difficulty {
        Difficulty::Easy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn test_random_bot_selects_empty_cell() {
        let mut bot = RandomBot::new(StdRng::seed_from_u64(1));
        let mut board = Board::new();
        board.place(0, Player::X);
        board.place(4, Player::O);

        for _ in 0..100 {
            let cell = bot.select_move(&board, Player::X);
            assert!(board.is_empty(cell), "cell {} is occupied", cell);
        }
    }

    #[test]
    fn test_random_bot_covers_all_cells() {
        let mut bot = RandomBot::new(StdRng::seed_from_u64(42));
        let board = Board::new();
        let seen: HashSet<usize> = (0..500)
            .map(|_| bot.select_move(&board, Player::O))
            .collect();
        assert_eq!(seen.len(), 9);
    }

    #[test]
    #[should_panic(expected = "no legal moves")]
    fn test_random_bot_panics_on_full_board() {
        let mut board = Board::new();
        for i in 0..9 {
            board.place(i, Player::X);
        }
        RandomBot::new(StdRng::seed_from_u64(0)).select_move(&board, Player::O);
    }
}
