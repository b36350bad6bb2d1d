//! Auto-hide/show decisions for the peeking dock.
//!
//! Unpinned, the dock slides to a thin edge indicator once the cursor has
//! stayed away from both the window and the indicator zone for the hide
//! debounce, and slides back when the cursor reaches the indicator zone.
//! Each transition holds an animation lock so samples arriving mid-slide
//! can't bounce it back.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::geometry::{CursorSample, DockLayout, Point};
use crate::clock::{Pump, Scheduler, TimerHandle, TimerSource};

/// Length of a show/hide slide.
pub const TRANSITION: Duration = Duration::from_millis(280);
/// How long a transition blocks further sample-driven transitions.
pub const ANIMATION_LOCK: Duration = Duration::from_millis(500);
pub const HIDE_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockTask {
    HideDebounce,
    AnimationUnlock,
}

/// Instruction for the window host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DockCommand {
    Show { target: Point, duration: Duration },
    Hide { target: Point, duration: Duration },
}

impl DockCommand {
    pub fn target(&self) -> Point {
        match *self {
            DockCommand::Show { target, .. } | DockCommand::Hide { target, .. } => target,
        }
    }

    pub fn duration(&self) -> Duration {
        match *self {
            DockCommand::Show { duration, .. } | DockCommand::Hide { duration, .. } => duration,
        }
    }
}

#[derive(Debug)]
pub struct DockController<S = Scheduler<DockTask>> {
    source: S,
    layout: DockLayout,
    hidden: bool,
    /// Starts pinned: the dock is visible until the user asks to hide it.
    pinned: bool,
    animation_lock: Option<TimerHandle>,
    pending_hide: Option<TimerHandle>,
}

impl<S: TimerSource<DockTask>> DockController<S> {
    pub fn new(layout: DockLayout, source: S) -> Self {
        Self {
            source,
            layout,
            hidden: false,
            pinned: true,
            animation_lock: None,
            pending_hide: None,
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    pub fn is_animating(&self) -> bool {
        self.animation_lock.is_some()
    }

    pub fn has_pending_hide(&self) -> bool {
        self.pending_hide.is_some()
    }

    pub fn layout(&self) -> &DockLayout {
        &self.layout
    }

    /// Feed one cursor sample.
    pub fn on_sample(&mut self, sample: &CursorSample) -> Option<DockCommand> {
        if self.pinned {
            return None;
        }

        let in_zone = sample.in_indicator_zone();
        let over_window = sample.over_window();

        if over_window || in_zone {
            self.cancel_pending_hide();
        }

        if self.hidden && !self.is_animating() {
            if in_zone {
                self.lock_animation();
                return Some(self.show());
            }
        } else if !self.hidden
            && !self.is_animating()
            && !over_window
            && !in_zone
            && self.pending_hide.is_none()
        {
            debug!("cursor left the dock, hide scheduled");
            self.pending_hide = Some(
                self.source
                    .start_delayed(HIDE_DEBOUNCE, DockTask::HideDebounce),
            );
        }
        None
    }

    /// Suppress auto-hide and drop any pending hide. Reveals the dock if it
    /// is hidden.
    pub fn pin(&mut self) -> Option<DockCommand> {
        self.pinned = true;
        self.cancel_pending_hide();
        debug!("dock pinned");
        if self.hidden {
            Some(self.show())
        } else {
            None
        }
    }

    /// Enter hidden mode at the user's request.
    pub fn unpin_and_hide(&mut self) -> DockCommand {
        self.pinned = false;
        debug!("dock unpinned");
        self.hide()
    }

    /// Reveal without pinning, so the dock hides again once the cursor leaves.
    pub fn request_show(&mut self) -> DockCommand {
        self.show()
    }

    /// The hide button: show (still unpinned) when hidden, else unpin and hide.
    pub fn toggle_hide_mode(&mut self) -> DockCommand {
        if self.hidden {
            self.request_show()
        } else {
            self.unpin_and_hide()
        }
    }

    /// A click on a real control. Re-pins before the control acts.
    pub fn control_interaction(&mut self) -> Option<DockCommand> {
        if self.pinned {
            None
        } else {
            self.pin()
        }
    }

    fn fire(&mut self, handle: TimerHandle, task: DockTask) -> Option<DockCommand> {
        match task {
            DockTask::HideDebounce if self.pending_hide == Some(handle) => {
                self.pending_hide = None;
                // Anything may have changed during the debounce.
                if self.pinned || self.hidden || self.is_animating() {
                    return None;
                }
                self.lock_animation();
                Some(self.hide())
            }
            DockTask::AnimationUnlock if self.animation_lock == Some(handle) => {
                self.animation_lock = None;
                None
            }
            _ => None,
        }
    }

    fn show(&mut self) -> DockCommand {
        self.cancel_pending_hide();
        self.hidden = false;
        debug!("dock shown");
        DockCommand::Show {
            target: self.layout.normal,
            duration: TRANSITION,
        }
    }

    fn hide(&mut self) -> DockCommand {
        self.hidden = true;
        debug!("dock hidden");
        DockCommand::Hide {
            target: self.layout.hidden,
            duration: TRANSITION,
        }
    }

    fn lock_animation(&mut self) {
        if let Some(previous) = self.animation_lock.take() {
            self.source.cancel(previous);
        }
        self.animation_lock = Some(
            self.source
                .start_delayed(ANIMATION_LOCK, DockTask::AnimationUnlock),
        );
    }

    fn cancel_pending_hide(&mut self) {
        if let Some(handle) = self.pending_hide.take() {
            self.source.cancel(handle);
        }
    }
}

impl<S: TimerSource<DockTask>> Pump for DockController<S> {
    type Output = DockCommand;

    fn next_deadline(&self) -> Option<Duration> {
        self.source.next_deadline()
    }

    fn run_due(&mut self) -> Vec<DockCommand> {
        let mut commands = Vec::new();
        while let Some((handle, task)) = self.source.pop_due() {
            commands.extend(self.fire(handle, task));
        }
        commands
    }
}
