//! Terminal User Interface module
//!
//! Renders the command center: market status, agent liveness, brain
//! voting, and the live log terminal.

pub mod app;
pub mod event;
pub mod theme;
pub mod ui;
pub mod widgets;

pub use app::{AgentRow, TuiApp};
pub use event::{AppEvent, EventHandler, KeyAction};
pub use theme::Theme;

use std::io;
use std::time::Duration;

use chrono::Utc;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tokio::sync::watch;

use crate::state::DashboardStore;
use crate::stream::ConnectionPhase;

/// Display refresh rate; liveness ages are re-derived on each tick
const TICK_RATE: Duration = Duration::from_millis(250);

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

/// Restore the terminal to normal mode
pub fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Run the TUI until the user quits.
///
/// Reads are snapshot-only: each tick pulls one consistent copy of the
/// store and the current connection phase; nothing here mutates the
/// store.
pub async fn run_tui(
    store: DashboardStore,
    phase: watch::Receiver<ConnectionPhase>,
    registry: Vec<String>,
) -> io::Result<()> {
    let mut terminal = init_terminal()?;
    let mut events = EventHandler::new(TICK_RATE);
    let mut app = TuiApp::new(registry);

    app.refresh(store.snapshot().await, *phase.borrow());

    while app.is_running() {
        terminal.draw(|f| ui::render(f, &app, Utc::now()))?;

        match events.next().await {
            Some(AppEvent::Tick) => {
                app.refresh(store.snapshot().await, *phase.borrow());
            }
            Some(AppEvent::Key(key)) => match KeyAction::from(key) {
                KeyAction::Quit => app.quit(),
                KeyAction::ScrollUp => app.scroll_up(),
                KeyAction::ScrollDown => app.scroll_down(),
                KeyAction::ScrollTop => app.scroll_to_top(),
                KeyAction::Help => app.toggle_help(),
                KeyAction::None => {}
            },
            Some(AppEvent::Resize(_, _)) => {}
            None => break,
        }
    }

    restore_terminal()
}
