//! Focus/break countdown state machine.
//!
//! The engine owns no thread. It registers a 1 s periodic tick with its
//! injected [`TimerSource`] while running, and the host pumps fired timers
//! back through [`Pump::run_due`].
//!
//! ## State Transitions
//!
//! ```text
//! Focus(paused) <-> Focus(running) --0s--> Break(paused) <-> Break(running)
//!       ^                                                          |
//!       +-------------------------- 0s ----------------------------+
//! ```
//!
//! Reaching zero pauses and flips the mode. When the matching auto-start flag
//! is set, a start is scheduled after a one-second grace delay.

use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::settings::Settings;
use crate::clock::{Pump, Scheduler, TimerHandle, TimerSource};
use crate::events::Event;
use crate::storage::SettingsStore;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);
pub const AUTO_START_GRACE: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Focus,
    Break,
}

impl Mode {
    pub fn next(self) -> Self {
        match self {
            Mode::Focus => Mode::Break,
            Mode::Break => Mode::Focus,
        }
    }
}

/// Tasks the engine schedules on its timer source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTask {
    Tick,
    AutoStart,
}

/// Display-update payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub mode: Mode,
    pub remaining_secs: u64,
    pub total_secs: u64,
    pub is_running: bool,
}

impl TimerSnapshot {
    /// Remaining fraction of the interval, 1.0 at the start.
    pub fn progress(&self) -> f64 {
        super::display::progress(self.remaining_secs, self.total_secs)
    }
}

/// Core countdown engine.
#[derive(Debug)]
pub struct FocusTimer<S = Scheduler<TimerTask>> {
    source: S,
    settings: Settings,
    mode: Mode,
    remaining_secs: u64,
    /// Length of the interval in flight; settings changes don't touch it
    /// while running.
    total_secs: u64,
    /// Registered periodic tick. `Some` exactly while running.
    tick: Option<TimerHandle>,
    /// Pending grace-delay start after an interval completed.
    auto_start: Option<TimerHandle>,
}

impl<S: TimerSource<TimerTask>> FocusTimer<S> {
    /// Create a paused engine at the start of a focus interval.
    pub fn new(settings: Settings, source: S) -> Self {
        let settings = settings.clamped();
        let total_secs = settings.focus_secs();
        Self {
            source,
            settings,
            mode: Mode::Focus,
            remaining_secs: total_secs,
            total_secs,
            tick: None,
            auto_start: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn total_secs(&self) -> u64 {
        self.total_secs
    }

    pub fn is_running(&self) -> bool {
        self.tick.is_some()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn has_pending_auto_start(&self) -> bool {
        self.auto_start.is_some()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            total_secs: self.total_secs,
            is_running: self.is_running(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start or resume. No-op while running.
    pub fn start(&mut self) -> Option<Event> {
        self.cancel_auto_start();
        self.begin(false)
    }

    /// Pause. No-op while paused, apart from dropping a pending auto-start.
    pub fn pause(&mut self) -> Option<Event> {
        self.cancel_auto_start();
        if !self.stop_ticking() {
            return None;
        }
        debug!(mode = ?self.mode, remaining = self.remaining_secs, "timer paused");
        Some(Event::TimerPaused {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn toggle(&mut self) -> Option<Event> {
        if self.is_running() {
            self.pause()
        } else {
            self.start()
        }
    }

    /// Stop, flip the mode and reset the countdown. Never auto-continues.
    pub fn skip(&mut self) -> Option<Event> {
        self.cancel_auto_start();
        self.stop_ticking();
        let from = self.mode;
        self.enter_next_mode();
        debug!(?from, to = ?self.mode, "interval skipped");
        Some(Event::TimerSkipped {
            from,
            to: self.mode,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Advance the countdown by one second. Ignored while paused.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.is_running() {
            return None;
        }
        if self.remaining_secs > 0 {
            self.remaining_secs -= 1;
            return Some(Event::TimerTicked {
                mode: self.mode,
                remaining_secs: self.remaining_secs,
                at: Utc::now(),
            });
        }
        Some(self.interval_complete())
    }

    /// Apply new settings and persist them.
    ///
    /// Durations are clamped. A paused engine is reset to the (possibly new)
    /// duration of its current mode; a running countdown is left alone.
    /// A failed write is logged and otherwise ignored.
    pub fn update_settings(&mut self, settings: Settings, store: &mut dyn SettingsStore) -> Event {
        let settings = settings.clamped();
        if let Err(e) = settings.save(store) {
            warn!(error = %e, "failed to persist settings");
        }
        self.apply_settings(settings)
    }

    /// Apply new settings without persisting them, as for session-only
    /// overrides. Same clamping and reset rules as [`Self::update_settings`].
    pub fn apply_settings(&mut self, settings: Settings) -> Event {
        self.settings = settings.clamped();
        if !self.is_running() {
            self.reset_countdown();
        }
        info!(settings = ?self.settings, "settings updated");
        Event::SettingsUpdated {
            settings: self.settings,
            at: Utc::now(),
        }
    }

    /// Dispatch a fired timer.
    fn fire(&mut self, handle: TimerHandle, task: TimerTask) -> Option<Event> {
        match task {
            TimerTask::Tick if self.tick == Some(handle) => self.tick(),
            TimerTask::AutoStart if self.auto_start == Some(handle) => {
                self.auto_start = None;
                self.begin(true)
            }
            // Stale handle from a timer replaced after it fell due.
            _ => None,
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn begin(&mut self, auto: bool) -> Option<Event> {
        if self.is_running() {
            return None;
        }
        self.tick = Some(self.source.start_periodic(TICK_PERIOD, TimerTask::Tick));
        debug!(mode = ?self.mode, remaining = self.remaining_secs, auto, "timer started");
        Some(Event::TimerStarted {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            auto,
            at: Utc::now(),
        })
    }

    fn interval_complete(&mut self) -> Event {
        self.stop_ticking();
        let finished = self.mode;
        self.enter_next_mode();

        let auto_continue = match self.mode {
            Mode::Break => self.settings.auto_start_break,
            Mode::Focus => self.settings.auto_start_focus,
        };
        if auto_continue {
            self.auto_start = Some(
                self.source
                    .start_delayed(AUTO_START_GRACE, TimerTask::AutoStart),
            );
        }

        info!(?finished, next = ?self.mode, auto_continue, "interval complete");
        Event::IntervalCompleted {
            finished,
            next: self.mode,
            duration_secs: self.total_secs,
            auto_continue,
            at: Utc::now(),
        }
    }

    /// Returns whether a tick source was registered.
    fn stop_ticking(&mut self) -> bool {
        match self.tick.take() {
            Some(handle) => {
                self.source.cancel(handle);
                true
            }
            None => false,
        }
    }

    fn cancel_auto_start(&mut self) {
        if let Some(handle) = self.auto_start.take() {
            debug!("pending auto-start cancelled");
            self.source.cancel(handle);
        }
    }

    fn enter_next_mode(&mut self) {
        self.mode = self.mode.next();
        self.reset_countdown();
    }

    fn reset_countdown(&mut self) {
        self.total_secs = match self.mode {
            Mode::Focus => self.settings.focus_secs(),
            Mode::Break => self.settings.break_secs(),
        };
        self.remaining_secs = self.total_secs;
    }
}

impl<S: TimerSource<TimerTask>> Pump for FocusTimer<S> {
    type Output = Event;

    fn next_deadline(&self) -> Option<Duration> {
        self.source.next_deadline()
    }

    fn run_due(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        while let Some((handle, task)) = self.source.pop_due() {
            events.extend(self.fire(handle, task));
        }
        events
    }
}
