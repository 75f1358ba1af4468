//! Tic-tac-toe rules engine and bots.
//!
//! # Architecture
//!
//! - **Board**: a 3x3 `Copy` value with win and emptiness queries
//! - **Rules**: pure win/draw classification over the fixed line table
//! - **Bots**: Easy (random), Intermediate (win/block), Advanced (minimax)
//! - **Engine**: the synchronous state machine that owns the board
//! - **Controller**: async wrapper that delays the bot's reply and
//!   cancels it on reset
//!
//! # Example
//!
//! ```
//! use tictactoe_engine::{BotSettings, Difficulty, GameEngine, Player};
//!
//! let mut engine = GameEngine::new(BotSettings::bot(Difficulty::Advanced, Player::O));
//! engine.make_move(0);
//! assert_eq!(engine.board_snapshot()[4], Some(Player::O));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod bot;
mod controller;
mod engine;
mod position;
pub mod rules;
mod settings;
mod types;

pub use action::{Move, MoveError};
pub use bot::{
    BotStrategy, Difficulty, HeuristicBot, MinimaxBot, RandomBot, best_move, minimax,
    win_or_block,
};
pub use controller::{DEFAULT_REPLY_DELAY, GameController, GameEvent};
pub use engine::GameEngine;
pub use position::Position;
pub use settings::BotSettings;
pub use types::{Board, CELLS, GameStatus, LINES, Player, Square};
