//! Win detection logic for tic-tac-toe.

use crate::{Board, Player};
use tracing::instrument;

/// Checks if there is a winner on the board.
///
/// Returns `Some(player)` for the first complete line in row, column,
/// diagonal order, `None` otherwise.
#[instrument(level = "trace")]
pub fn check_winner(board: &Board) -> Option<Player> {
    board.winner()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new();
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_winner_top_row() {
        let mut board = Board::new();
        board.place(0, Player::X);
        board.place(1, Player::X);
        board.place(2, Player::X);
        assert_eq!(check_winner(&board), Some(Player::X));
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let mut board = Board::new();
        board.place(2, Player::O);
        board.place(4, Player::O);
        board.place(6, Player::O);
        assert_eq!(check_winner(&board), Some(Player::O));
    }

    #[test]
    fn test_no_winner_mixed_line() {
        let mut board = Board::new();
        board.place(0, Player::X);
        board.place(1, Player::X);
        board.place(2, Player::O);
        assert_eq!(check_winner(&board), None);
    }
}
