//! Move records and move errors.

use crate::Player;
use derive_new::new;
use serde::{Deserialize, Serialize};

/// A move in tic-tac-toe: a player placing their mark at an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct Move {
    /// The player making the move.
    pub player: Player,
    /// Board index (0-8) where the mark was placed.
    pub index: usize,
}

/// Reasons a move is refused.
///
/// [`GameEngine::make_move`](crate::GameEngine::make_move) swallows these;
/// [`GameEngine::try_move`](crate::GameEngine::try_move) returns them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The game has already been won or drawn.
    #[display("Game is already over")]
    GameOver,

    /// The index is not a board cell.
    #[display("Position {} is out of range (must be 0-8)", _0)]
    OutOfRange(usize),

    /// The square at the index is already occupied.
    #[display("Square {} is already occupied", _0)]
    Occupied(usize),

    /// A bot move is pending and the board belongs to the bot.
    #[display("Waiting for the bot to move")]
    BotPending,
}

impl std::error::Error for MoveError {}
