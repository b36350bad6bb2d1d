//! Terminal session state: the timer, where settings go, what to show.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use lumi_core::{Event, FocusTimer, Scheduler, Settings, SettingsStore, SystemClock, TimerTask};
use tracing::warn;

pub type TerminalTimer = FocusTimer<Scheduler<TimerTask, SystemClock>>;

pub struct App {
    pub timer: TerminalTimer,
    store: Box<dyn SettingsStore>,
    /// What the store holds. Differs from the timer's settings only by the
    /// `--focus`/`--break` overrides, which are never written back.
    saved: Settings,
    /// Last interval-boundary message, shown until the next one.
    pub message: Option<&'static str>,
}

impl App {
    pub fn new(saved: Settings, store: Box<dyn SettingsStore>) -> Self {
        Self::with_session(saved, saved, store)
    }

    /// Run the timer on `session` while persisting changes against `saved`.
    pub fn with_session(saved: Settings, session: Settings, store: Box<dyn SettingsStore>) -> Self {
        Self {
            timer: FocusTimer::new(session, Scheduler::new(SystemClock::new())),
            store,
            saved,
            message: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        self.timer.settings()
    }

    pub fn observe(&mut self, event: &Event) {
        if let Some(text) = event.announcement() {
            self.message = Some(text);
        }
    }

    /// Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }

        let event = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('r') | KeyCode::Char('s') => self.timer.start(),
            KeyCode::Char('p') => self.timer.pause(),
            KeyCode::Char(' ') => self.timer.toggle(),
            KeyCode::Char('k') => self.timer.skip(),
            KeyCode::Char('f') => self.adjust(|s| s.focus_minutes = s.focus_minutes.saturating_add(1)),
            KeyCode::Char('F') => self.adjust(|s| s.focus_minutes = s.focus_minutes.saturating_sub(1)),
            KeyCode::Char('b') => self.adjust(|s| s.break_minutes = s.break_minutes.saturating_add(1)),
            KeyCode::Char('B') => self.adjust(|s| s.break_minutes = s.break_minutes.saturating_sub(1)),
            KeyCode::Char('a') => self.adjust(|s| s.auto_start_break = !s.auto_start_break),
            KeyCode::Char('A') => self.adjust(|s| s.auto_start_focus = !s.auto_start_focus),
            _ => None,
        };
        if let Some(event) = event {
            self.observe(&event);
        }
        false
    }

    /// Apply a settings key to the session and to the stored settings.
    fn adjust(&mut self, change: impl Fn(&mut Settings)) -> Option<Event> {
        let mut saved = self.saved;
        change(&mut saved);
        let saved = saved.clamped();
        if saved != self.saved {
            if let Err(e) = saved.save(self.store.as_mut()) {
                warn!(error = %e, "failed to persist settings");
            }
            self.saved = saved;
        }

        let mut session = *self.timer.settings();
        change(&mut session);
        let session = session.clamped();
        if session == *self.timer.settings() {
            return None;
        }
        Some(self.timer.apply_settings(session))
    }
}

/// Apply `--focus` / `--break` overrides on top of loaded settings.
pub fn with_overrides(settings: Settings, focus: Option<u32>, brk: Option<u32>) -> Settings {
    Settings {
        focus_minutes: focus.unwrap_or(settings.focus_minutes),
        break_minutes: brk.unwrap_or(settings.break_minutes),
        ..settings
    }
    .clamped()
}
