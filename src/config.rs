//! Application configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tictactoe_engine::{BotSettings, Difficulty, Player};
use tracing::{debug, info, instrument};

/// Settings for the terminal game and the simulator.
///
/// Every field has a default, so an empty file is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// Delay before the bot answers, in milliseconds.
    #[serde(default = "default_reply_delay_ms")]
    reply_delay_ms: u64,

    /// Seed for bot randomness; entropy when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,

    /// Log filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    log_filter: String,

    /// File the terminal UI logs to.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,

    /// Bot mode, difficulty and side.
    #[serde(default = "default_bot", deserialize_with = "deserialize_bot")]
    bot: BotSettings,
}

fn default_reply_delay_ms() -> u64 {
    500
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("tictactoe.log")
}

fn default_bot() -> BotSettings {
    BotSettings::default().with_enabled(true)
}

/// The `[bot]` table as written; keys left out take [`default_bot`] values.
#[derive(Deserialize)]
#[serde(default)]
struct BotTable {
    enabled: bool,
    difficulty: Difficulty,
    bot_player: Player,
}

impl Default for BotTable {
    fn default() -> Self {
        let bot = default_bot();
        Self {
            enabled: bot.enabled,
            difficulty: bot.difficulty,
            bot_player: bot.bot_player,
        }
    }
}

fn deserialize_bot<'de, D>(deserializer: D) -> Result<BotSettings, D::Error>
where
    D: Deserializer<'de>,
{
    let table = BotTable::deserialize(deserializer)?;
    Ok(BotSettings::bot(table.difficulty, table.bot_player).with_enabled(table.enabled))
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: default_reply_delay_ms(),
            seed: None,
            log_filter: default_log_filter(),
            log_file: default_log_file(),
            bot: default_bot(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(
            difficulty = %config.bot.difficulty,
            bot_player = %config.bot.bot_player,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Loads `path` if given, otherwise returns the defaults.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Serializes the configuration back to TOML.
    #[instrument(skip(self))]
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string(self)
            .map_err(|e| ConfigError::new(format!("Failed to serialize config: {}", e)))
    }

    /// Bot reply delay as a [`Duration`].
    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    /// Replaces the bot settings.
    pub fn set_bot(&mut self, bot: BotSettings) {
        self.bot = bot;
    }

    /// Replaces the reply delay.
    pub fn set_reply_delay_ms(&mut self, reply_delay_ms: u64) {
        self.reply_delay_ms = reply_delay_ms;
    }

    /// Replaces the seed.
    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.seed = seed;
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
