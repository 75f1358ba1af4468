//! Terminal UI for tictactoe.

mod app;
mod input;
mod ui;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::Duration;
use tictactoe_engine::{GameController, GameEvent};
use tokio::sync::mpsc;
use tracing::{error, info, instrument};

use app::App;

/// How long to wait for a key before redrawing.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Runs the game screen until the user quits.
///
/// Logging must already be routed away from the terminal.
pub async fn run_tui(
    controller: GameController,
    events: mpsc::UnboundedReceiver<GameEvent>,
) -> Result<()> {
    info!("Starting tictactoe TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_game(&mut terminal, App::new(controller), events).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

#[instrument(skip_all)]
async fn run_game(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    mut app: App,
    mut events: mpsc::UnboundedReceiver<GameEvent>,
) -> Result<()> {
    loop {
        while let Ok(event) = events.try_recv() {
            app.handle_event(event);
        }

        terminal.draw(|f| ui::draw(f, &app))?;

        if event::poll(POLL_INTERVAL)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && let Some(action) = input::action_for(app.cursor(), key.code)
        {
            app.handle_action(action);
        }

        if app.should_quit() {
            info!(summary = %app.statistics().summary(), "Session finished");
            return Ok(());
        }

        // Let spawned bot moves run between polls.
        tokio::task::yield_now().await;
    }
}
