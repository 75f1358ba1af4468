//! Application state and logic.

use super::input::Action;
use std::time::Instant;
use tictactoe::Statistics;
use tictactoe_engine::{GameController, GameEvent, MoveError, Player, Position};
use tracing::{debug, info};

/// Main application state.
#[derive(Debug)]
pub struct App {
    controller: GameController,
    cursor: Position,
    status_message: String,
    statistics: Statistics,
    game_started: Instant,
    should_quit: bool,
}

impl App {
    /// Creates a new application around a running controller.
    pub fn new(controller: GameController) -> Self {
        let mut app = Self {
            controller,
            cursor: Position::Center,
            status_message: String::new(),
            statistics: Statistics::new(),
            game_started: Instant::now(),
            should_quit: false,
        };
        app.status_message = app.turn_message();
        app
    }

    /// The controller driving the game.
    pub fn controller(&self) -> &GameController {
        &self.controller
    }

    /// Cell under the cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Results of the games played this session.
    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// True once the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Handles a game event from the controller.
    pub fn handle_event(&mut self, event: GameEvent) {
        debug!(?event, "Handling game event");

        match event {
            GameEvent::MoveMade { player, index } => {
                let label = Position::from_index(index).map_or("?", |p| p.label());
                self.status_message =
                    format!("{} played {}. {}", player, label, self.turn_message());
            }
            GameEvent::BotThinking => {
                self.status_message = format!(
                    "Bot ({}) is thinking...",
                    self.controller.settings().difficulty
                );
            }
            GameEvent::GameOver { winner } => {
                let settings = self.controller.settings();
                let bot = settings
                    .enabled
                    .then_some((settings.difficulty, settings.bot_player));
                self.statistics
                    .record_game_result(winner, self.game_started.elapsed(), bot);

                self.status_message = match winner {
                    Some(player) => {
                        format!("{} wins! Press 'r' to restart or 'q' to quit.", player)
                    }
                    None => {
                        "Game ended in a draw! Press 'r' to restart or 'q' to quit.".to_string()
                    }
                };
            }
            GameEvent::Reset => {
                self.game_started = Instant::now();
                self.status_message = self.turn_message();
            }
        }
    }

    /// Applies a user action.
    pub fn handle_action(&mut self, action: Action) {
        debug!(?action, "Handling action");

        match action {
            Action::Cursor(position) => self.cursor = position,
            Action::PlayCursor => self.play(self.cursor.to_index()),
            Action::Play(index) => {
                if let Some(position) = Position::from_index(index) {
                    self.cursor = position;
                }
                self.play(index);
            }
            Action::Reset => self.controller.reset(),
            Action::CycleDifficulty => {
                let difficulty = self.controller.settings().difficulty.next();
                self.controller.set_difficulty(difficulty);
                self.status_message = format!("Difficulty set to {}", difficulty);
            }
            Action::ToggleBot => {
                let enabled = !self.controller.settings().enabled;
                self.controller.set_bot_enabled(enabled);
            }
            Action::SwapSide => {
                let bot_player = self.controller.settings().bot_player.opponent();
                self.controller.set_bot_player(bot_player);
            }
            Action::ClearStats => {
                self.statistics.reset();
                self.status_message = "Statistics cleared".to_string();
            }
            Action::Quit => {
                info!("User quit");
                self.should_quit = true;
            }
        }
    }

    fn play(&mut self, index: usize) {
        match self.controller.try_move(index) {
            Ok(_) => {}
            Err(MoveError::BotPending) => {
                self.status_message = "Wait for the bot to move".to_string();
            }
            Err(e) => {
                self.status_message = format!("Move error: {}", e);
            }
        }
    }

    fn turn_message(&self) -> String {
        let player = self.controller.current_player();
        let settings = self.controller.settings();
        if settings.enabled && player == settings.bot_player {
            format!("Bot ({}) to move", player)
        } else if settings.enabled {
            format!("Your turn ({})", player)
        } else {
            format!("Player {}'s turn", player)
        }
    }

    /// Mark played by the person at the keyboard, if a bot is playing.
    pub fn human_player(&self) -> Option<Player> {
        let settings = self.controller.settings();
        settings.enabled.then(|| settings.bot_player.opponent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tictactoe_engine::{BotSettings, Difficulty, GameEngine};
    use tokio::sync::mpsc::UnboundedReceiver;

    fn app(settings: BotSettings) -> (App, UnboundedReceiver<GameEvent>) {
        let engine = GameEngine::with_seed(settings, 3);
        let (controller, rx) = GameController::new(engine, Duration::from_millis(500));
        (App::new(controller), rx)
    }

    fn drain(app: &mut App, rx: &mut UnboundedReceiver<GameEvent>) {
        while let Ok(event) = rx.try_recv() {
            app.handle_event(event);
        }
    }

    #[tokio::test]
    async fn test_two_player_win_is_recorded() {
        let (mut app, mut rx) = app(BotSettings::default());
        for index in [0, 3, 1, 4, 2] {
            app.handle_action(Action::Play(index));
        }
        drain(&mut app, &mut rx);

        assert_eq!(*app.statistics().total_games(), 1);
        assert_eq!(*app.statistics().wins_x(), 1);
        assert!(app.status_message().starts_with("X wins"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_move_while_bot_thinking_is_refused() {
        let (mut app, mut rx) = app(BotSettings::bot(Difficulty::Advanced, Player::O));
        app.handle_action(Action::Play(0));
        app.handle_action(Action::Play(1));
        drain(&mut app, &mut rx);

        assert_eq!(app.controller().move_count(), 1);
        assert!(app.controller().bot_pending());
        assert_eq!(app.human_player(), Some(Player::X));
    }

    #[tokio::test]
    async fn test_toggle_bot_and_quit() {
        let (mut app, _rx) = app(BotSettings::default());
        app.handle_action(Action::ToggleBot);
        assert!(app.controller().settings().enabled);
        app.handle_action(Action::Quit);
        assert!(app.should_quit());
    }
}
