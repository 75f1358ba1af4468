//! Bot configuration shared by the engine and its front ends.

use crate::{Difficulty, Player};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};

/// Whether a bot plays, how well, and which mark it holds.
///
/// Defaults to a disabled Intermediate bot playing O.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Setters)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct BotSettings {
    /// Bot mode is on.
    pub enabled: bool,
    /// Strategy the bot uses.
    pub difficulty: Difficulty,
    /// Mark the bot plays.
    pub bot_player: Player,
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            difficulty: Difficulty::default(),
            bot_player: Player::O,
        }
    }
}

impl BotSettings {
    /// Settings for an enabled bot.
    pub fn bot(difficulty: Difficulty, bot_player: Player) -> Self {
        Self {
            enabled: true,
            difficulty,
            bot_player,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = BotSettings::default();
        assert!(!settings.enabled);
        assert_eq!(settings.difficulty, Difficulty::Intermediate);
        assert_eq!(settings.bot_player, Player::O);
    }

    #[test]
    fn test_setters_chain() {
        let settings = BotSettings::default()
            .with_enabled(true)
            .with_bot_player(Player::X)
            .with_difficulty(Difficulty::Advanced);
        assert_eq!(settings, BotSettings::bot(Difficulty::Advanced, Player::X));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: BotSettings =
            serde_json::from_str(r#"{"difficulty":"Easy"}"#).expect("valid json");
        assert_eq!(settings.difficulty, Difficulty::Easy);
        assert_eq!(settings.bot_player, Player::O);
        assert!(!settings.enabled);
    }
}
