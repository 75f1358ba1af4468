//! Tictactoe application library - configuration, statistics and bot matches
//!
//! The game itself lives in [`tictactoe_engine`]; this crate holds the
//! pieces the terminal front end and the simulator share.
//!
//! # Architecture
//!
//! - **Config**: TOML settings for bot mode, reply delay, seed and logging
//! - **Statistics**: running results per side and per bot difficulty
//! - **Simulate**: headless bot-versus-bot matches
//!
//! # Example
//!
//! ```
//! use tictactoe::{SimulationConfig, run_simulation};
//! use tictactoe_engine::Difficulty;
//!
//! let report = run_simulation(SimulationConfig::new(
//!     Difficulty::Advanced,
//!     Difficulty::Advanced,
//!     3,
//!     7,
//! ));
//! assert_eq!(*report.draws(), 3);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod simulate;
mod statistics;

// Crate-level exports - Configuration
pub use config::{AppConfig, ConfigError};

// Crate-level exports - Statistics
pub use statistics::{DifficultyStats, Statistics};

// Crate-level exports - Simulation
pub use simulate::{MatchReport, SimulationConfig, play_game, run as run_simulation};
