//! Drives the dock the way a window host does: cursor samples every 33 ms,
//! animation frames every 16 ms, window geometry read back from the frames.

use std::time::Duration;

use lumi_core::dock::{DockTask, FRAME_INTERVAL};
use lumi_core::{
    Clock, DockCommand, DockController, DockLayout, ManualClock, Point, Scheduler, WindowAnimator,
};

const SAMPLE_INTERVAL: Duration = Duration::from_millis(33);

struct Host {
    clock: ManualClock,
    dock: DockController<Scheduler<DockTask, ManualClock>>,
    animator: WindowAnimator,
    window: Point,
    commands: Vec<DockCommand>,
    next_sample: Duration,
    next_frame: Duration,
}

impl Host {
    fn new() -> Self {
        let clock = ManualClock::new();
        let layout = DockLayout::for_work_area(1920, 1080);
        Self {
            dock: DockController::new(layout, Scheduler::new(clock.clone())),
            clock,
            animator: WindowAnimator::new(),
            window: layout.normal,
            commands: Vec::new(),
            next_sample: Duration::ZERO,
            next_frame: Duration::ZERO,
        }
    }

    fn apply(&mut self, command: DockCommand) {
        let now = self.clock.now();
        self.animator.apply(&command, self.window, now);
        self.commands.push(command);
    }

    /// Run the host loop for `ms` with the cursor parked at `cursor`.
    fn run(&mut self, cursor: Point, ms: u64) {
        let end = self.clock.now() + Duration::from_millis(ms);
        while self.clock.now() < end {
            let now = self.clock.now();
            if now >= self.next_sample {
                let sample = self.dock.layout().sample(cursor, self.window);
                if let Some(command) = self.dock.on_sample(&sample) {
                    self.apply(command);
                }
                self.next_sample = now + SAMPLE_INTERVAL;
            }
            if now >= self.next_frame {
                if let Some(position) = self.animator.frame(now) {
                    self.window = position;
                }
                self.next_frame = now + FRAME_INTERVAL;
            }

            let step = self
                .next_sample
                .min(self.next_frame)
                .min(end)
                .saturating_sub(now);
            for command in self.clock.advance(&mut self.dock, step) {
                self.apply(command);
            }
        }
    }
}

const AWAY: Point = Point::new(300, 300);
const EDGE: Point = Point::new(1915, 950);

#[test]
fn pinned_dock_stays_put() {
    let mut host = Host::new();
    host.run(AWAY, 2000);
    assert!(host.commands.is_empty());
    assert_eq!(host.window, host.dock.layout().normal);
}

#[test]
fn dock_slides_away_and_back() {
    let mut host = Host::new();
    let layout = *host.dock.layout();

    // User presses the hide button, then shows it again without pinning.
    let hide = host.dock.toggle_hide_mode();
    host.apply(hide);
    host.run(EDGE, 600);
    assert!(!host.dock.is_hidden());
    assert_eq!(host.window, layout.normal);

    // Cursor leaves: debounce, slide out, rest at the indicator.
    host.run(AWAY, 1500);
    assert!(host.dock.is_hidden());
    assert_eq!(host.window, layout.hidden);

    // Cursor reaches the edge: slide back in.
    host.run(EDGE, 600);
    assert!(!host.dock.is_hidden());
    assert_eq!(host.window, layout.normal);
}

#[test]
fn clicking_a_control_pins_the_dock() {
    let mut host = Host::new();
    let hide = host.dock.unpin_and_hide();
    host.apply(hide);
    host.run(AWAY, 500);

    if let Some(show) = host.dock.control_interaction() {
        host.apply(show);
    }
    host.run(AWAY, 2000);
    assert!(host.dock.is_pinned());
    assert!(!host.dock.is_hidden());
    assert_eq!(host.window, host.dock.layout().normal);
}
