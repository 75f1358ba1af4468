//! Running game statistics, fed once per finished game.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use strum::IntoEnumIterator;
use tictactoe_engine::{Difficulty, Player};
use tracing::{debug, instrument};

/// Results against one bot difficulty, from the bot's side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct DifficultyStats {
    games_played: u32,
    games_won: u32,
    games_lost: u32,
    games_drawn: u32,
}

impl DifficultyStats {
    /// Share of games the bot won, as a percentage.
    pub fn win_percentage(&self) -> f64 {
        percentage(self.games_won, self.games_played)
    }
}

/// Aggregated results across games.
///
/// Streaks follow the human side: X in two-player games, the bot's
/// opponent otherwise.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct Statistics {
    total_games: u32,
    wins_x: u32,
    wins_o: u32,
    draws: u32,
    current_win_streak: u32,
    longest_win_streak: u32,
    total_duration: Duration,
    fastest_win: Option<Duration>,
    by_difficulty: BTreeMap<Difficulty, DifficultyStats>,
}

fn percentage(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        f64::from(part) / f64::from(whole) * 100.0
    }
}

impl Default for Statistics {
    fn default() -> Self {
        Self::new()
    }
}

impl Statistics {
    /// Empty statistics with a slot for every difficulty.
    pub fn new() -> Self {
        Self {
            total_games: 0,
            wins_x: 0,
            wins_o: 0,
            draws: 0,
            current_win_streak: 0,
            longest_win_streak: 0,
            total_duration: Duration::ZERO,
            fastest_win: None,
            by_difficulty: Difficulty::iter()
                .map(|d| (d, DifficultyStats::default()))
                .collect(),
        }
    }

    /// Records one finished game.
    ///
    /// `winner` is `None` for a draw. `bot` names the bot's difficulty and
    /// mark when a bot took part.
    #[instrument(skip(self))]
    pub fn record_game_result(
        &mut self,
        winner: Option<Player>,
        duration: Duration,
        bot: Option<(Difficulty, Player)>,
    ) {
        self.total_games += 1;
        self.total_duration += duration;

        let human = bot.map_or(Player::X, |(_, mark)| mark.opponent());
        match winner {
            Some(player) => {
                match player {
                    Player::X => self.wins_x += 1,
                    Player::O => self.wins_o += 1,
                }
                if player == human {
                    self.current_win_streak += 1;
                } else {
                    self.current_win_streak = 0;
                }
                self.longest_win_streak = self.longest_win_streak.max(self.current_win_streak);
                if self.fastest_win.is_none_or(|fastest| duration < fastest) {
                    self.fastest_win = Some(duration);
                }
            }
            None => {
                self.draws += 1;
                self.current_win_streak = 0;
            }
        }

        if let Some((difficulty, mark)) = bot {
            let stats = self.by_difficulty.entry(difficulty).or_default();
            stats.games_played += 1;
            match winner {
                Some(player) if player == mark => stats.games_won += 1,
                Some(_) => stats.games_lost += 1,
                None => stats.games_drawn += 1,
            }
        }

        debug!(total_games = self.total_games, "Game result recorded");
    }

    /// Share of games won by `player`, as a percentage.
    pub fn win_percentage(&self, player: Player) -> f64 {
        let wins = match player {
            Player::X => self.wins_x,
            Player::O => self.wins_o,
        };
        percentage(wins, self.total_games)
    }

    /// Share of drawn games, as a percentage.
    pub fn draw_percentage(&self) -> f64 {
        percentage(self.draws, self.total_games)
    }

    /// Share of games the bot won at `difficulty`, as a percentage.
    pub fn bot_win_percentage(&self, difficulty: Difficulty) -> f64 {
        self.by_difficulty
            .get(&difficulty)
            .map_or(0.0, DifficultyStats::win_percentage)
    }

    /// Mean game length, zero before the first game.
    pub fn average_duration(&self) -> Duration {
        if self.total_games == 0 {
            Duration::ZERO
        } else {
            self.total_duration / self.total_games
        }
    }

    /// Clears every counter.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Multi-line human-readable summary.
    pub fn summary(&self) -> String {
        let fastest = self
            .fastest_win
            .map_or_else(|| "N/A".to_string(), |d| format!("{:.1}s", d.as_secs_f64()));
        format!(
            "Games Played: {}\n\
             X Wins: {} ({:.1}%)\n\
             O Wins: {} ({:.1}%)\n\
             Draws: {} ({:.1}%)\n\
             Longest Win Streak: {}\n\
             Average Game Duration: {:.1}s\n\
             Fastest Win: {}",
            self.total_games,
            self.wins_x,
            self.win_percentage(Player::X),
            self.wins_o,
            self.win_percentage(Player::O),
            self.draws,
            self.draw_percentage(),
            self.longest_win_streak,
            self.average_duration().as_secs_f64(),
            fastest,
        )
    }

    /// One line per difficulty that has been played.
    pub fn bot_summary(&self) -> String {
        let mut summary = String::from("Bot Performance:\n");
        for (difficulty, stats) in &self.by_difficulty {
            if stats.games_played > 0 {
                summary.push_str(&format!(
                    "{}: {}/{} ({:.1}%)\n",
                    difficulty,
                    stats.games_won,
                    stats.games_played,
                    stats.win_percentage()
                ));
            }
        }
        summary
    }
}
