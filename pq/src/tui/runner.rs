//! TUI Runner - main loop that owns the terminal
//!
//! Each loop iteration draws once, waits for one event and hands it to
//! the App. Nothing here mutates dashboard state directly.

use std::time::Duration;

use eyre::Result;
use tracing::{debug, info};

use super::Tui;
use super::app::App;
use super::events::{Event, EventHandler};
use super::views;

/// TUI Runner that manages the terminal and event loop
pub struct TuiRunner {
    app: App,
    terminal: Tui,
    event_handler: EventHandler,
}

impl TuiRunner {
    pub fn new(terminal: Tui, app: App, tick_rate: Duration) -> Self {
        debug!(?tick_rate, "TuiRunner::new: called");
        Self {
            app,
            terminal,
            event_handler: EventHandler::new(tick_rate),
        }
    }

    /// Run the TUI main loop until the user quits
    pub async fn run(&mut self) -> Result<()> {
        info!("TUI started");
        loop {
            self.terminal.draw(|frame| views::render(&self.app, frame))?;

            match self.event_handler.next().await? {
                Event::Key(key) => {
                    if self.app.handle_key(key) {
                        break;
                    }
                }
                Event::Resize(width, height) => {
                    debug!(width, height, "TuiRunner::run: resize");
                    self.terminal.autoresize()?;
                }
                Event::Tick => {}
            }
        }

        info!("TUI exiting");
        Ok(())
    }
}
