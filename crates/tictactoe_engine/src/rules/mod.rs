//! Game rules for tic-tac-toe.
//!
//! Pure functions that classify a board. Rules are kept apart from
//! board storage so the engine and the bots share one definition of
//! "finished".

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::check_winner;

use crate::{Board, GameStatus};
use tracing::instrument;

/// Classifies a board as won, drawn or still in progress.
///
/// A win is checked before fullness, so a board completed by a
/// winning move is a win, not a draw.
#[instrument(level = "trace")]
pub fn evaluate(board: &Board) -> GameStatus {
    if let Some(winner) = check_winner(board) {
        GameStatus::Won(winner)
    } else if is_full(board) {
        GameStatus::Draw
    } else {
        GameStatus::InProgress
    }
}
