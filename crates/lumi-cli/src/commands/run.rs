use std::io;
use std::time::Duration;

use clap::Args;
use crossterm::{
    event::{self, Event as TermEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use lumi_core::{MemoryStore, Pump, Settings, SettingsStore, TimerSource, TomlFileStore};
use ratatui::prelude::*;
use tracing::{info, warn};

use crate::app::{with_overrides, App};
use crate::ui;

/// Longest wait for input between redraws.
const IDLE_POLL: Duration = Duration::from_millis(250);

#[derive(Args, Default)]
pub struct RunArgs {
    /// Focus minutes for this session (1-120)
    #[arg(long)]
    pub focus: Option<u32>,
    /// Break minutes for this session (1-60)
    #[arg(long = "break")]
    pub break_minutes: Option<u32>,
    /// Start counting immediately
    #[arg(long)]
    pub start: bool,
    /// Keep settings in memory only
    #[arg(long)]
    pub ephemeral: bool,
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let store: Box<dyn SettingsStore> = if args.ephemeral {
        Box::new(MemoryStore::default())
    } else {
        Box::new(TomlFileStore::open_default()?)
    };
    let saved = Settings::load(store.as_ref());
    let session = with_overrides(saved, args.focus, args.break_minutes);
    info!(settings = ?session, "terminal session starting");

    let mut app = App::with_session(saved, session, store);
    if args.start {
        app.timer.start();
    }

    enable_raw_mode()?;
    let guard = TerminalGuard {
        restore: restore_terminal,
    };
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = event_loop(&mut terminal, &mut app);

    drop(guard);
    terminal.show_cursor()?;

    println!("Goodbye!");
    res
}

/// Leaves raw mode and the alternate screen when dropped, including on an
/// early `?` return during setup.
struct TerminalGuard {
    restore: fn() -> io::Result<()>,
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = (self.restore)() {
            warn!(error = %e, "failed to restore terminal");
        }
    }
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Wake up for the next tick or grace-delay start, or for input.
        let now = app.timer.source().now();
        let timeout = app
            .timer
            .next_deadline()
            .map(|deadline| deadline.saturating_sub(now))
            .unwrap_or(IDLE_POLL)
            .min(IDLE_POLL);

        if event::poll(timeout)? {
            if let TermEvent::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key(key) {
                    return Ok(());
                }
            }
        }

        for event in app.timer.run_due() {
            app.observe(&event);
        }
    }
}
