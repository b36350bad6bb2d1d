//! Injected scheduling capability.
//!
//! The state machines never sleep or spawn threads. They register periodic
//! and one-shot timers with a [`TimerSource`], and the host drains fired
//! timers back into them by calling `run_due()` (see [`Pump`]).
//!
//! Fired timers are returned as task tokens (`T`), so a component only ever
//! handles its own tasks and ownership stays with the component:
//!
//! ```text
//! host loop ──poll──> component.run_due() ──pop_due──> Scheduler<T, C>
//!                          │                                 │
//!                          └── handles T, may (re)schedule ──┘
//! ```
//!
//! [`SystemClock`] backs the terminal frontend; [`ManualClock`] is a fake
//! clock that tests advance explicitly.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Opaque handle to a scheduled timer. Used as a cancellation token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

/// Schedule/cancel capability injected into the state machines.
pub trait TimerSource<T> {
    /// Register a repeating timer. The first firing is one `period` from now.
    fn start_periodic(&mut self, period: Duration, task: T) -> TimerHandle;

    /// Register a one-shot timer firing `delay` from now.
    fn start_delayed(&mut self, delay: Duration, task: T) -> TimerHandle;

    /// Cancel a timer. Unknown or already-fired handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);

    /// Whether `handle` still refers to a timer that has not been cancelled
    /// (and, for one-shots, has not fired).
    fn is_pending(&self, handle: TimerHandle) -> bool;

    /// Time since the clock's origin.
    fn now(&self) -> Duration;

    /// Earliest deadline among registered timers.
    fn next_deadline(&self) -> Option<Duration>;

    /// Remove (or re-arm, for periodic timers) the earliest timer whose
    /// deadline has passed and return its task.
    fn pop_due(&mut self) -> Option<(TimerHandle, T)>;
}

/// Monotonic time source measured from an origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall clock, measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Fake clock for tests. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward by `by`, firing every timer that falls due on the
    /// way at its own deadline, in deadline order.
    pub fn advance<P: Pump>(&self, pump: &mut P, by: Duration) -> Vec<P::Output> {
        let target = self.now.get() + by;
        let mut fired = Vec::new();
        while let Some(deadline) = pump.next_deadline() {
            if deadline > target {
                break;
            }
            if deadline > self.now.get() {
                self.now.set(deadline);
            }
            fired.extend(pump.run_due());
        }
        self.now.set(target);
        fired
    }

    pub fn advance_ms<P: Pump>(&self, pump: &mut P, ms: u64) -> Vec<P::Output> {
        self.advance(pump, Duration::from_millis(ms))
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// A component whose scheduled work can be pumped by a host loop.
pub trait Pump {
    type Output;

    fn next_deadline(&self) -> Option<Duration>;

    /// Handle every task that is due now. Returns what the component emitted.
    fn run_due(&mut self) -> Vec<Self::Output>;
}

#[derive(Debug)]
struct Entry<T> {
    handle: TimerHandle,
    due: Duration,
    period: Option<Duration>,
    task: T,
}

/// Timer queue over a [`Clock`].
#[derive(Debug)]
pub struct Scheduler<T, C = SystemClock> {
    clock: C,
    entries: Vec<Entry<T>>,
    next_id: u64,
}

impl<T, C: Clock> Scheduler<T, C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            entries: Vec::new(),
            next_id: 0,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Number of registered timers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, delay: Duration, period: Option<Duration>, task: T) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.entries.push(Entry {
            handle,
            due: self.clock.now() + delay,
            period,
            task,
        });
        handle
    }
}

impl<T: Clone, C: Clock> TimerSource<T> for Scheduler<T, C> {
    fn start_periodic(&mut self, period: Duration, task: T) -> TimerHandle {
        // A zero period would never let time move past the deadline.
        let period = period.max(Duration::from_millis(1));
        self.insert(period, Some(period), task)
    }

    fn start_delayed(&mut self, delay: Duration, task: T) -> TimerHandle {
        self.insert(delay, None, task)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.entries.retain(|e| e.handle != handle);
    }

    fn is_pending(&self, handle: TimerHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    fn now(&self) -> Duration {
        self.clock.now()
    }

    fn next_deadline(&self) -> Option<Duration> {
        self.entries.iter().map(|e| e.due).min()
    }

    fn pop_due(&mut self) -> Option<(TimerHandle, T)> {
        let now = self.clock.now();
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= now)
            .min_by_key(|(_, e)| (e.due, e.handle))
            .map(|(i, _)| i)?;

        match self.entries[idx].period {
            Some(period) => {
                let entry = &mut self.entries[idx];
                entry.due += period;
                Some((entry.handle, entry.task.clone()))
            }
            None => {
                let entry = self.entries.swap_remove(idx);
                Some((entry.handle, entry.task))
            }
        }
    }
}
