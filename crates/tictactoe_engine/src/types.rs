//! Core domain types for tic-tac-toe.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Number of cells on the board.
pub const CELLS: usize = 9;

/// The eight winning lines: rows, then columns, then diagonals.
///
/// Every win check goes through this table so that real and
/// hypothetical wins can never disagree.
#[rustfmt::skip]
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2], [3, 4, 5], [6, 7, 8], // Rows
    [0, 3, 6], [1, 4, 7], [2, 5, 8], // Columns
    [0, 4, 8], [2, 4, 6],            // Diagonals
];

/// Player in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// Player X (goes first).
    X,
    /// Player O (goes second).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Returns the player who moves after this one.
    pub fn next(self) -> Self {
        self.opponent()
    }

    /// The mark drawn on screen.
    pub fn symbol(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

impl Square {
    /// Returns the occupying player, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Square::Empty => None,
            Square::Occupied(player) => Some(player),
        }
    }
}

/// 3x3 tic-tac-toe board.
///
/// The board is a small `Copy` value. Search code takes copies for
/// hypothetical moves and never touches the board it was handed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; CELLS],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; CELLS],
        }
    }

    /// Gets the square at the given position (0-8).
    ///
    /// # Panics
    ///
    /// Panics if `index >= 9`.
    pub fn get(&self, index: usize) -> Square {
        self.squares[index]
    }

    /// Checks if a square is empty.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 9`.
    pub fn is_empty(&self, index: usize) -> bool {
        self.get(index) == Square::Empty
    }

    /// Indices of all empty squares, in ascending order.
    pub fn empty_cells(&self) -> Vec<usize> {
        self.squares
            .iter()
            .enumerate()
            .filter(|(_, square)| **square == Square::Empty)
            .map(|(index, _)| index)
            .collect()
    }

    /// Places `player`'s mark at `index` without any legality check.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 9`.
    pub fn place(&mut self, index: usize, player: Player) {
        assert!(index < CELLS, "board index {index} out of range");
        self.squares[index] = Square::Occupied(player);
    }

    /// Returns true if `player` holds any complete line.
    pub fn has_winner(&self, player: Player) -> bool {
        let mark = Square::Occupied(player);
        LINES
            .iter()
            .any(|line| line.iter().all(|&i| self.squares[i] == mark))
    }

    /// Returns true if `player` would complete a line by playing `index`.
    ///
    /// The check runs on a copy; `self` is left untouched.
    #[instrument(level = "trace", skip(self))]
    pub fn would_win(&self, player: Player, index: usize) -> bool {
        let mut copy = *self;
        copy.place(index, player);
        copy.has_winner(player)
    }

    /// Returns the other player.
    pub fn opponent(&self, player: Player) -> Player {
        player.opponent()
    }

    /// Returns the owner of the first complete line, scanning [`LINES`] in order.
    pub fn winner(&self) -> Option<Player> {
        LINES.iter().find_map(|&[a, b, c]| {
            let sq = self.squares[a];
            if sq != Square::Empty && sq == self.squares[b] && sq == self.squares[c] {
                sq.player()
            } else {
                None
            }
        })
    }

    /// Checks if every square is occupied.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|s| *s != Square::Empty)
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; CELLS] {
        &self.squares
    }

    /// Copies the board out as nine optional marks.
    pub fn snapshot(&self) -> [Option<Player>; CELLS] {
        self.squares.map(Square::player)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                match self.squares[pos] {
                    Square::Empty => write!(f, "{}", pos + 1)?,
                    Square::Occupied(player) => write!(f, "{}", player)?,
                }
                if col < 2 {
                    write!(f, "|")?;
                }
            }
            if row < 2 {
                write!(f, "\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win.
    Won(Player),
    /// Game ended in a draw.
    Draw,
}

impl GameStatus {
    /// Returns true once the game has been won or drawn.
    pub fn is_over(self) -> bool {
        self != GameStatus::InProgress
    }

    /// Returns the winner if there is one.
    pub fn winner(self) -> Option<Player> {
        match self {
            GameStatus::Won(player) => Some(player),
            GameStatus::InProgress | GameStatus::Draw => None,
        }
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "In progress"),
            GameStatus::Won(player) => write!(f, "Player {} wins", player),
            GameStatus::Draw => write!(f, "Draw"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_from(marks: &[(usize, Player)]) -> Board {
        let mut board = Board::new();
        for &(index, player) in marks {
            board.place(index, player);
        }
        board
    }

    #[test]
    fn test_empty_cells_ascending() {
        let board = board_from(&[(4, Player::X), (0, Player::O), (8, Player::X)]);
        assert_eq!(board.empty_cells(), vec![1, 2, 3, 5, 6, 7]);
    }

    #[test]
    fn test_has_winner_only_for_line_owner() {
        for line in LINES {
            let mut board = Board::new();
            for i in line {
                board.place(i, Player::O);
            }
            assert!(board.has_winner(Player::O), "line {:?}", line);
            assert!(!board.has_winner(Player::X), "line {:?}", line);
            assert_eq!(board.winner(), Some(Player::O));
        }
    }

    #[test]
    fn test_would_win_leaves_board_untouched() {
        let board = board_from(&[(0, Player::X), (1, Player::X), (4, Player::O)]);
        let before = board;
        for index in 0..CELLS {
            for player in [Player::X, Player::O] {
                let _ = board.would_win(player, index);
            }
        }
        assert_eq!(board, before);
        assert!(board.would_win(Player::X, 2));
        assert!(!board.would_win(Player::O, 2));
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_index_panics() {
        Board::new().is_empty(9);
    }

    #[test]
    fn test_display_numbers_empty_cells() {
        let board = board_from(&[(0, Player::X), (4, Player::O)]);
        assert_eq!(board.to_string(), "X|2|3\n-+-+-\n4|O|6\n-+-+-\n7|8|9");
    }

    #[test]
    fn test_snapshot_matches_squares() {
        let board = board_from(&[(2, Player::O)]);
        let snapshot = board.snapshot();
        assert_eq!(snapshot[2], Some(Player::O));
        assert_eq!(snapshot.iter().filter(|s| s.is_none()).count(), 8);
    }
}
