//! Async game controller with a delayed, cancellable bot reply.
//!
//! The bot answers after [`DEFAULT_REPLY_DELAY`] so a human can see their
//! own move land first. At most one bot move is ever pending. Any reset
//! invalidates it, and human input is refused until it resolves.

use crate::action::MoveError;
use crate::bot::Difficulty;
use crate::engine::GameEngine;
use crate::settings::BotSettings;
use crate::types::{Board, CELLS, GameStatus, Player};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Duration, sleep};
use tracing::{debug, info, instrument};

/// Delay between a human move and the bot's answer.
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(500);

/// Messages sent from the controller to its observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A mark was placed.
    MoveMade {
        /// Who played.
        player: Player,
        /// Where (0-8).
        index: usize,
    },
    /// A bot move has been scheduled.
    BotThinking,
    /// The game ended.
    GameOver {
        /// `None` for a draw.
        winner: Option<Player>,
    },
    /// A fresh game started.
    Reset,
}

/// Engine plus the generation of the game it is playing.
///
/// The generation only changes under the lock, so a woken bot task that
/// sees a matching generation is guaranteed to act on the game it was
/// scheduled for.
#[derive(Debug)]
struct Inner {
    engine: GameEngine,
    generation: u64,
}

/// Drives a [`GameEngine`] for interactive front ends.
///
/// Must be used from within a tokio runtime: bot replies run as spawned
/// tasks.
#[derive(Debug)]
pub struct GameController {
    inner: Arc<Mutex<Inner>>,
    pending: Option<JoinHandle<()>>,
    reply_delay: Duration,
    events: mpsc::UnboundedSender<GameEvent>,
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

impl GameController {
    /// Wraps `engine` and starts a new game.
    ///
    /// Returns the controller and the receiving end of its event channel.
    #[instrument(skip(engine))]
    pub fn new(
        engine: GameEngine,
        reply_delay: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<GameEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let mut controller = Self {
            inner: Arc::new(Mutex::new(Inner {
                engine,
                generation: 0,
            })),
            pending: None,
            reply_delay,
            events,
        };
        controller.reset();
        (controller, rx)
    }

    // ─────────────────────────────────────────────────────────────
    //  Mutations
    // ─────────────────────────────────────────────────────────────

    /// Plays the current player's mark at `index`, ignoring invalid moves.
    pub fn make_move(&mut self, index: usize) {
        if let Err(e) = self.try_move(index) {
            debug!(index, error = %e, "Ignoring invalid move");
        }
    }

    /// Plays a human move and schedules the bot's answer if one is due.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::BotPending`] while the bot owns the turn, or the
    /// engine's error for an illegal move.
    #[instrument(skip(self))]
    pub fn try_move(&mut self, index: usize) -> Result<GameStatus, MoveError> {
        let (player, status, generation, bot_next) = {
            let mut inner = lock(&self.inner);
            if inner.engine.bot_to_move() {
                return Err(MoveError::BotPending);
            }
            let player = inner.engine.current_player();
            let status = inner.engine.try_move(index)?;
            (player, status, inner.generation, inner.engine.bot_to_move())
        };

        self.publish_move(player, index, status);
        if bot_next {
            self.schedule_bot_move(generation);
        }
        Ok(status)
    }

    /// Starts a new game, discarding any pending bot move.
    ///
    /// If an enabled bot plays X, its opening move is scheduled.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.restart_with(|_| {});
    }

    /// Turns bot mode on and starts a new game.
    #[instrument(skip(self))]
    pub fn enable_bot(&mut self) {
        self.restart_with(|engine| {
            let settings = engine.settings().with_enabled(true);
            engine.replace_settings(settings);
        });
    }

    /// Turns bot mode on or off and starts a new game.
    #[instrument(skip(self))]
    pub fn set_bot_enabled(&mut self, enabled: bool) {
        self.restart_with(|engine| {
            let settings = engine.settings().with_enabled(enabled);
            engine.replace_settings(settings);
        });
    }

    /// Gives the bot `bot_player` and starts a new game.
    #[instrument(skip(self))]
    pub fn set_bot_player(&mut self, bot_player: Player) {
        self.restart_with(|engine| {
            let settings = engine.settings().with_bot_player(bot_player);
            engine.replace_settings(settings);
        });
    }

    /// Swaps the bot strategy without touching the game in progress.
    ///
    /// A pending bot move will be played with the new strategy.
    #[instrument(skip(self))]
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        lock(&self.inner).engine.set_difficulty(difficulty);
    }

    fn restart_with(&mut self, configure: impl FnOnce(&mut GameEngine)) {
        self.cancel_pending();
        let (generation, bot_next) = {
            let mut inner = lock(&self.inner);
            inner.generation += 1;
            configure(&mut inner.engine);
            inner.engine.new_game();
            let _ = self.events.send(GameEvent::Reset);
            (inner.generation, inner.engine.bot_to_move())
        };

        info!(generation, "Game reset");
        if bot_next {
            self.schedule_bot_move(generation);
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            debug!("Cancelling pending bot move");
            handle.abort();
        }
    }

    /// Spawns the single-shot deferred bot move for `generation`.
    ///
    /// Supersedes any move that is still pending.
    fn schedule_bot_move(&mut self, generation: u64) {
        self.cancel_pending();
        let _ = self.events.send(GameEvent::BotThinking);

        let inner = Arc::clone(&self.inner);
        let events = self.events.clone();
        let delay = self.reply_delay;
        debug!(generation, ?delay, "Scheduling bot move");

        self.pending = Some(tokio::spawn(async move {
            sleep(delay).await;

            let mut guard = lock(&inner);
            if guard.generation != generation {
                debug!(
                    scheduled = generation,
                    current = guard.generation,
                    "Discarding stale bot move"
                );
                return;
            }
            let player = guard.engine.current_player();
            let Some(index) = guard.engine.play_bot_turn() else {
                return;
            };

            // Published under the lock so a racing reset's `Reset` lands after.
            let status = guard.engine.status();
            let _ = events.send(GameEvent::MoveMade { player, index });
            if status.is_over() {
                let _ = events.send(GameEvent::GameOver {
                    winner: status.winner(),
                });
            }
        }));
    }

    fn publish_move(&self, player: Player, index: usize, status: GameStatus) {
        let _ = self.events.send(GameEvent::MoveMade { player, index });
        if status.is_over() {
            let _ = self.events.send(GameEvent::GameOver {
                winner: status.winner(),
            });
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Queries
    // ─────────────────────────────────────────────────────────────

    /// Player whose turn it is.
    pub fn current_player(&self) -> Player {
        lock(&self.inner).engine.current_player()
    }

    /// True once the game is won or drawn.
    pub fn is_game_over(&self) -> bool {
        lock(&self.inner).engine.is_game_over()
    }

    /// The winner, if the game has been won.
    pub fn winner(&self) -> Option<Player> {
        lock(&self.inner).engine.winner()
    }

    /// The game status.
    pub fn status(&self) -> GameStatus {
        lock(&self.inner).engine.status()
    }

    /// A copy of the board.
    pub fn board(&self) -> Board {
        *lock(&self.inner).engine.board()
    }

    /// The board as nine optional marks.
    pub fn board_snapshot(&self) -> [Option<Player>; CELLS] {
        lock(&self.inner).engine.board_snapshot()
    }

    /// Current bot settings.
    pub fn settings(&self) -> BotSettings {
        lock(&self.inner).engine.settings()
    }

    /// Number of moves played this game.
    pub fn move_count(&self) -> usize {
        lock(&self.inner).engine.history().len()
    }

    /// True while a scheduled bot move has not yet run.
    pub fn bot_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for GameController {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(settings: BotSettings) -> (GameController, mpsc::UnboundedReceiver<GameEvent>) {
        GameController::new(GameEngine::with_seed(settings, 11), DEFAULT_REPLY_DELAY)
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<GameEvent>) -> Vec<GameEvent> {
        let mut out = Vec::new();
        while let Ok(event) = rx.try_recv() {
            out.push(event);
        }
        out
    }

    #[tokio::test(start_paused = true)]
    async fn test_bot_reply_arrives_after_delay() {
        let (mut game, mut rx) = controller(BotSettings::bot(Difficulty::Advanced, Player::O));
        game.make_move(0);

        assert!(game.bot_pending());
        assert_eq!(game.current_player(), Player::O);
        assert_eq!(game.board_snapshot()[4], None);

        sleep(DEFAULT_REPLY_DELAY * 2).await;

        assert!(!game.bot_pending());
        assert_eq!(game.board_snapshot()[4], Some(Player::O));
        assert_eq!(game.current_player(), Player::X);
        assert_eq!(
            drain(&mut rx),
            vec![
                GameEvent::Reset,
                GameEvent::MoveMade {
                    player: Player::X,
                    index: 0
                },
                GameEvent::BotThinking,
                GameEvent::MoveMade {
                    player: Player::O,
                    index: 4
                },
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_human_blocked_while_bot_pending() {
        let (mut game, _rx) = controller(BotSettings::bot(Difficulty::Easy, Player::O));
        game.make_move(0);
        assert_eq!(game.try_move(1), Err(MoveError::BotPending));
        assert_eq!(game.move_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_discards_pending_bot_move() {
        let (mut game, _rx) = controller(BotSettings::bot(Difficulty::Easy, Player::O));
        game.make_move(0);
        game.reset();

        sleep(DEFAULT_REPLY_DELAY * 2).await;

        assert_eq!(game.move_count(), 0);
        assert_eq!(game.current_player(), Player::X);
        assert!(game.board_snapshot().iter().all(Option::is_none));
    }

    #[tokio::test(start_paused = true)]
    async fn test_bot_as_x_opens_after_reset() {
        let (game, _rx) = controller(BotSettings::bot(Difficulty::Advanced, Player::X));
        assert_eq!(game.move_count(), 0);
        assert!(game.bot_pending());

        sleep(DEFAULT_REPLY_DELAY * 2).await;

        assert_eq!(game.move_count(), 1);
        assert_eq!(game.current_player(), Player::O);
    }

    #[tokio::test(start_paused = true)]
    async fn test_switching_bot_side_supersedes_pending_move() {
        let (mut game, _rx) = controller(BotSettings::bot(Difficulty::Advanced, Player::O));
        game.make_move(0);
        game.set_bot_player(Player::X);

        sleep(DEFAULT_REPLY_DELAY * 2).await;

        // Only the new game's opening move was played.
        assert_eq!(game.move_count(), 1);
        assert_eq!(game.board_snapshot().iter().flatten().count(), 1);
        assert_eq!(game.current_player(), Player::O);
    }

    #[tokio::test(start_paused = true)]
    async fn test_two_player_mode_never_schedules() {
        let (mut game, _rx) = controller(BotSettings::default());
        game.make_move(0);
        assert!(!game.bot_pending());
        game.make_move(1);
        assert_eq!(game.board_snapshot()[1], Some(Player::O));
    }

    #[tokio::test(start_paused = true)]
    async fn test_enable_bot_restarts_and_schedules_opening() {
        let (mut game, mut rx) = controller(BotSettings::default().with_bot_player(Player::X));
        game.make_move(4);
        game.enable_bot();

        assert!(game.settings().enabled);
        assert_eq!(game.move_count(), 0);
        assert!(game.bot_pending());

        sleep(DEFAULT_REPLY_DELAY * 2).await;

        assert_eq!(game.move_count(), 1);
        assert_eq!(game.current_player(), Player::O);
        let events = drain(&mut rx);
        assert_eq!(
            events[..4],
            [
                GameEvent::Reset,
                GameEvent::MoveMade {
                    player: Player::X,
                    index: 4
                },
                GameEvent::Reset,
                GameEvent::BotThinking,
            ]
        );
        assert!(matches!(
            events[4..],
            [GameEvent::MoveMade {
                player: Player::X,
                ..
            }]
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_no_bot_move_is_published_after_a_reset() {
        let engine = GameEngine::with_seed(BotSettings::bot(Difficulty::Easy, Player::O), 5);
        let (mut game, mut rx) = GameController::new(engine, Duration::ZERO);

        for round in 0..500u64 {
            game.make_move(0);
            sleep(Duration::from_micros(round % 50)).await;
            game.reset();
            sleep(Duration::from_millis(1)).await;

            let events = drain(&mut rx);
            let last_reset = events
                .iter()
                .rposition(|e| *e == GameEvent::Reset)
                .expect("reset publishes an event");
            assert!(
                events[last_reset + 1..].is_empty(),
                "round {}: {:?}",
                round,
                events
            );
            assert!(game.board_snapshot().iter().all(Option::is_none));
        }
    }
}
