//! Keyboard mapping for the game screen.

use crossterm::event::KeyCode;
use tictactoe_engine::Position;

/// What a key press asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move the cursor.
    Cursor(Position),
    /// Play at the cursor.
    PlayCursor,
    /// Play at a cell index (0-8).
    Play(usize),
    /// Start a new game.
    Reset,
    /// Switch to the next difficulty.
    CycleDifficulty,
    /// Turn the bot on or off.
    ToggleBot,
    /// Give the bot the other mark.
    SwapSide,
    /// Clear the statistics.
    ClearStats,
    /// Leave the app.
    Quit,
}

/// Moves cursor based on arrow keys, stopping at the board edges.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let (row, col) = (cursor.row(), cursor.col());
    let target = match key {
        KeyCode::Up => Position::from_row_col(row.wrapping_sub(1), col),
        KeyCode::Down => Position::from_row_col(row + 1, col),
        KeyCode::Left => Position::from_row_col(row, col.wrapping_sub(1)),
        KeyCode::Right => Position::from_row_col(row, col + 1),
        _ => None,
    };
    target.unwrap_or(cursor)
}

/// Maps a key to an action, given the current cursor.
pub fn action_for(cursor: Position, key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
            Some(Action::Cursor(move_cursor(cursor, key)))
        }
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::PlayCursor),
        KeyCode::Char(c @ '1'..='9') => c.to_digit(10).map(|d| Action::Play(d as usize - 1)),
        KeyCode::Char('r') => Some(Action::Reset),
        KeyCode::Char('d') => Some(Action::CycleDifficulty),
        KeyCode::Char('b') => Some(Action::ToggleBot),
        KeyCode::Char('s') => Some(Action::SwapSide),
        KeyCode::Char('c') => Some(Action::ClearStats),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}
