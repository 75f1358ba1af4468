//! Game engine: turn order, terminal state and bot replies.

use crate::action::{Move, MoveError};
use crate::bot::{BotStrategy, Difficulty};
use crate::rules;
use crate::settings::BotSettings;
use crate::types::{Board, CELLS, GameStatus, Player};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, instrument, warn};

/// Tic-tac-toe game engine.
///
/// The engine is the only writer of its board. Callers mutate it through
/// [`make_move`](Self::make_move), [`reset`](Self::reset) and the settings
/// methods, and read it through the query methods.
///
/// Bot replies here are synchronous: a human move that hands the turn to
/// the bot is answered before `make_move` returns. See
/// [`GameController`](crate::GameController) for the delayed version.
#[derive(Debug)]
pub struct GameEngine {
    board: Board,
    current_player: Player,
    status: GameStatus,
    history: Vec<Move>,
    settings: BotSettings,
    strategy: Box<dyn BotStrategy>,
    rng: StdRng,
}

impl GameEngine {
    /// Creates an engine and starts a game.
    ///
    /// If the settings enable a bot playing X, its opening move is already
    /// on the board when this returns.
    #[instrument]
    pub fn new(settings: BotSettings) -> Self {
        Self::with_rng(settings, StdRng::from_entropy())
    }

    /// Like [`new`](Self::new), with reproducible bot randomness.
    #[instrument]
    pub fn with_seed(settings: BotSettings, seed: u64) -> Self {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(settings: BotSettings, mut rng: StdRng) -> Self {
        let strategy = settings.difficulty.strategy(StdRng::seed_from_u64(rng.r#gen()));
        let mut engine = Self {
            board: Board::new(),
            current_player: Player::X,
            status: GameStatus::InProgress,
            history: Vec::new(),
            settings,
            strategy,
            rng,
        };
        engine.reset();
        engine
    }

    // ─────────────────────────────────────────────────────────────
    //  Mutations
    // ─────────────────────────────────────────────────────────────

    /// Plays the current player's mark at `index` (0-8).
    ///
    /// Invalid moves are ignored: nothing changes if the game is over,
    /// `index` is out of range, or the square is taken. If the move hands
    /// the turn to an enabled bot, the bot replies once before returning.
    #[instrument(skip(self), fields(player = %self.current_player))]
    pub fn make_move(&mut self, index: usize) {
        if let Err(e) = self.try_move(index) {
            debug!(index, error = %e, "Ignoring invalid move");
            return;
        }

        if self.bot_to_move() {
            self.play_bot_turn();
        }
    }

    /// Applies exactly one move for the current player.
    ///
    /// Never triggers a bot reply.
    ///
    /// # Errors
    ///
    /// Returns a [`MoveError`] and leaves the game untouched if the game is
    /// over, `index` is out of range, or the square is occupied.
    #[instrument(skip(self), fields(player = %self.current_player))]
    pub fn try_move(&mut self, index: usize) -> Result<GameStatus, MoveError> {
        if self.status.is_over() {
            return Err(MoveError::GameOver);
        }
        if index >= CELLS {
            return Err(MoveError::OutOfRange(index));
        }
        if !self.board.is_empty(index) {
            return Err(MoveError::Occupied(index));
        }

        let player = self.current_player;
        self.board.place(index, player);
        self.history.push(Move::new(player, index));
        self.check_win();

        if !self.status.is_over() {
            self.current_player = player.next();
        }

        debug!(index, status = ?self.status, "Move applied");
        Ok(self.status)
    }

    /// Lets the bot play one move if it is the bot's turn.
    ///
    /// Returns the cell the bot played, or `None` if the bot is disabled,
    /// the game is over, or it is not the bot's turn.
    #[instrument(skip(self), fields(difficulty = %self.settings.difficulty))]
    pub fn play_bot_turn(&mut self) -> Option<usize> {
        if !self.bot_to_move() {
            return None;
        }

        let player = self.current_player;
        let cell = self.strategy.select_move(&self.board, player);
        match self.try_move(cell) {
            Ok(status) => {
                info!(%player, cell, ?status, "Bot moved");
                Some(cell)
            }
            Err(e) => {
                warn!(%player, cell, error = %e, "Bot chose an illegal move");
                None
            }
        }
    }

    /// Starts a new game; an enabled bot playing X opens immediately.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.new_game();
        if self.bot_to_move() {
            self.play_bot_turn();
        }
    }

    /// Starts a new game without letting the bot open.
    #[instrument(skip(self))]
    pub fn new_game(&mut self) {
        self.board = Board::new();
        self.current_player = Player::X;
        self.status = GameStatus::InProgress;
        self.history.clear();
        debug!("New game started");
    }

    /// Turns bot mode on and restarts the game.
    #[instrument(skip(self))]
    pub fn enable_bot(&mut self) {
        self.settings.enabled = true;
        self.reset();
    }

    /// Turns bot mode on or off; always restarts the game.
    #[instrument(skip(self))]
    pub fn set_bot_enabled(&mut self, enabled: bool) {
        self.settings.enabled = enabled;
        self.reset();
    }

    /// Assigns the bot a mark; always restarts the game.
    #[instrument(skip(self))]
    pub fn set_bot_player(&mut self, bot_player: Player) {
        self.settings.bot_player = bot_player;
        self.reset();
    }

    /// Swaps the bot strategy. The game in progress continues.
    #[instrument(skip(self))]
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.settings.difficulty = difficulty;
        self.strategy = difficulty.strategy(StdRng::seed_from_u64(self.rng.r#gen()));
    }

    /// Replaces all bot settings without touching the board.
    pub(crate) fn replace_settings(&mut self, settings: BotSettings) {
        self.settings = settings;
        self.set_difficulty(settings.difficulty);
    }

    fn check_win(&mut self) {
        self.status = rules::evaluate(&self.board);
        match self.status {
            GameStatus::Won(winner) => info!(%winner, moves = self.history.len(), "Game won"),
            GameStatus::Draw => info!("Game drawn"),
            GameStatus::InProgress => {}
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Queries
    // ─────────────────────────────────────────────────────────────

    /// Player whose turn it is (the last mover once the game is over).
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// True once the game is won or drawn.
    pub fn is_game_over(&self) -> bool {
        self.status.is_over()
    }

    /// The winner, if the game has been won.
    pub fn winner(&self) -> Option<Player> {
        self.status.winner()
    }

    /// The game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The board as nine optional marks.
    pub fn board_snapshot(&self) -> [Option<Player>; CELLS] {
        self.board.snapshot()
    }

    /// Moves played this game, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Current bot settings.
    pub fn settings(&self) -> BotSettings {
        self.settings
    }

    /// True if an enabled bot owns the current turn of a live game.
    pub fn bot_to_move(&self) -> bool {
        self.settings.enabled
            && !self.status.is_over()
            && self.current_player == self.settings.bot_player
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(BotSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_player() -> GameEngine {
        GameEngine::with_seed(BotSettings::default(), 0)
    }

    #[test]
    fn test_try_move_reports_errors_without_changing_state() {
        let mut engine = two_player();
        engine.make_move(4);
        let before = engine.board_snapshot();

        assert_eq!(engine.try_move(4), Err(MoveError::Occupied(4)));
        assert_eq!(engine.try_move(9), Err(MoveError::OutOfRange(9)));
        assert_eq!(engine.board_snapshot(), before);
        assert_eq!(engine.current_player(), Player::O);
    }

    #[test]
    fn test_no_moves_after_game_over() {
        let mut engine = two_player();
        for i in [0, 3, 1, 4, 2] {
            engine.make_move(i);
        }
        assert_eq!(engine.try_move(8), Err(MoveError::GameOver));
        assert_eq!(engine.current_player(), Player::X);
        assert_eq!(engine.history().len(), 5);
    }

    #[test]
    fn test_bot_replies_once_per_human_move() {
        let mut engine = GameEngine::with_seed(BotSettings::bot(Difficulty::Easy, Player::O), 5);
        engine.make_move(0);
        assert_eq!(engine.history().len(), 2);
        assert_eq!(engine.history()[1].player, Player::O);
        assert_eq!(engine.current_player(), Player::X);
    }

    #[test]
    fn test_bot_as_x_opens_on_construction_and_reset() {
        let mut engine =
            GameEngine::with_seed(BotSettings::bot(Difficulty::Advanced, Player::X), 1);
        assert_eq!(engine.history().len(), 1);
        assert_eq!(engine.current_player(), Player::O);

        engine.reset();
        assert_eq!(engine.history().len(), 1);
        assert_eq!(engine.history()[0].player, Player::X);
    }

    #[test]
    fn test_set_difficulty_keeps_game() {
        let mut engine = two_player();
        engine.make_move(0);
        engine.set_difficulty(Difficulty::Advanced);
        assert_eq!(engine.history().len(), 1);
        assert_eq!(engine.settings().difficulty, Difficulty::Advanced);
    }

    #[test]
    fn test_set_bot_player_restarts() {
        let mut engine = two_player();
        engine.make_move(0);
        engine.set_bot_player(Player::X);
        // Bot disabled, so nothing is played after the restart.
        assert!(engine.history().is_empty());
        assert_eq!(engine.settings().bot_player, Player::X);
    }

    #[test]
    fn test_play_bot_turn_needs_bot_turn() {
        let mut engine = GameEngine::with_seed(BotSettings::bot(Difficulty::Easy, Player::O), 2);
        // X to move, so the bot must wait.
        assert_eq!(engine.play_bot_turn(), None);
        assert!(engine.history().is_empty());
    }
}
