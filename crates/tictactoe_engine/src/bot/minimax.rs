//! Advanced bot: full-depth minimax with alpha-beta pruning.

use super::{BotStrategy, Difficulty, win_or_block};
use crate::{Board, Player};
use tracing::{debug, instrument};

/// Score of a win found at search depth 0; deeper wins score less.
const WIN_SCORE: i32 = 10;

/// Scores `board` from `bot`'s point of view.
///
/// Wins score `10 - depth` and losses `depth - 10`, so faster wins and
/// slower losses are preferred. `maximizing` says whose turn it is at
/// this ply: `bot` when true, its opponent otherwise. Sibling moves are
/// skipped once `beta <= alpha`.
pub fn minimax(
    board: &Board,
    bot: Player,
    depth: i32,
    maximizing: bool,
    mut alpha: i32,
    mut beta: i32,
) -> i32 {
    let opponent = bot.opponent();
    if board.has_winner(bot) {
        return WIN_SCORE - depth;
    }
    if board.has_winner(opponent) {
        return depth - WIN_SCORE;
    }
    let empty = board.empty_cells();
    if empty.is_empty() {
        return 0;
    }

    if maximizing {
        let mut best = i32::MIN;
        for cell in empty {
            let mut child = *board;
            child.place(cell, bot);
            let score = minimax(&child, bot, depth + 1, false, alpha, beta);
            best = best.max(score);
            alpha = alpha.max(score);
            if beta <= alpha {
                break;
            }
        }
        best
    } else {
        let mut best = i32::MAX;
        for cell in empty {
            let mut child = *board;
            child.place(cell, opponent);
            let score = minimax(&child, bot, depth + 1, true, alpha, beta);
            best = best.min(score);
            beta = beta.min(score);
            if beta <= alpha {
                break;
            }
        }
        best
    }
}

/// Best cell for `bot` and its minimax score.
///
/// Each empty cell is searched with a full window, so the returned score
/// is exact. Ties go to the lowest index. Returns `None` on a full board.
#[instrument(level = "debug", skip(board))]
pub fn best_move(board: &Board, bot: Player) -> Option<(usize, i32)> {
    let mut best: Option<(usize, i32)> = None;
    for cell in board.empty_cells() {
        let mut child = *board;
        child.place(cell, bot);
        let score = minimax(&child, bot, 0, false, i32::MIN, i32::MAX);
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((cell, score));
        }
    }
    best
}

/// Plays perfectly.
#[derive(Debug, Default, Clone, Copy)]
pub struct MinimaxBot;

impl MinimaxBot {
    /// Creates a minimax bot.
    pub fn new() -> Self {
        Self
    }
}

impl BotStrategy for MinimaxBot {
    fn select_move(&mut self, board: &Board, player: Player) -> usize {
        assert!(!board.is_full(), "no legal moves available");

        if let Some(cell) = win_or_block(board, player) {
            debug!(%player, cell, "Advanced bot played tactical move");
            return cell;
        }

        let (cell, score) = best_move(board, player).expect("no legal moves available");
        debug!(%player, cell, score, "Advanced bot chose minimax move");
        cell
    }

    fn difficulty(&self) -> Difficulty {
        Difficulty::Advanced
    }
}
