//! src/main.rs
//! Virtual drive TUI entry point: terminal setup, the shared tick, and the
//! draw/dispatch loop.

use std::io::{self, Stdout};
use std::panic::PanicHookInfo;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::time::{self, Interval, MissedTickBehavior};
use tracing::info;

use stash_core::config::Config;
use stash_core::controller::event_loop::EventLoop;
use stash_core::logging;
use stash_core::model::app_state::AppState;
use stash_core::view::ui;

type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> Result<()> {
    let _log_guard = logging::init(None).context("Failed to initialize logging")?;
    setup_panic_handler();

    let config = Config::load()
        .await
        .context("Failed to load configuration")?;

    let mut app = App::new(config).context("Failed to initialize application")?;
    let result = app.run().await;
    app.restore_terminal();
    result.context("Application runtime error")?;

    info!("Application exited cleanly");
    Ok(())
}

struct App {
    terminal: AppTerminal,
    event_loop: EventLoop,
    tick_interval: Duration,
}

impl App {
    fn new(config: Config) -> Result<Self> {
        let tick_interval: Duration = config.upload.tick_interval;
        let state = AppState::new(config);

        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        Ok(Self {
            terminal,
            event_loop: EventLoop::new(state),
            tick_interval,
        })
    }

    async fn run(&mut self) -> Result<()> {
        let mut tick: Interval = time::interval(self.tick_interval);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            let state = self.event_loop.app();
            self.terminal.draw(|frame| ui::render(frame, state))?;

            let action = self.event_loop.next_action(&mut tick).await;
            self.event_loop.dispatch(action);

            if self.event_loop.app().should_quit() {
                return Ok(());
            }
        }
    }

    /// Best effort: never mask the real error on the way out.
    fn restore_terminal(&mut self) {
        disable_raw_mode().ok();
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen).ok();
        self.terminal.show_cursor().ok();
    }
}

/// Leave the terminal usable even when something panics mid-draw.
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info: &PanicHookInfo<'_>| {
        disable_raw_mode().ok();
        execute!(io::stdout(), LeaveAlternateScreen).ok();
        default_hook(info);
    }));
}
