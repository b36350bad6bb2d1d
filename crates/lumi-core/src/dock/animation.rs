//! Window slide interpolation for the dock host.
//!
//! The host calls [`WindowAnimator::frame`] every [`FRAME_INTERVAL`] and
//! moves the window to the returned position. The window size never changes.

use std::time::Duration;

use super::geometry::Point;
use super::visibility::DockCommand;

pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Transition {
    from: Point,
    target: Point,
    started: Duration,
    duration: Duration,
}

#[derive(Debug, Clone, Default)]
pub struct WindowAnimator {
    transition: Option<Transition>,
}

impl WindowAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    pub fn target(&self) -> Option<Point> {
        self.transition.map(|t| t.target)
    }

    /// Begin sliding from the window's live position to `target`.
    ///
    /// Returns `false` without touching the slide in flight when it already
    /// heads to `target`. A different target replaces it and restarts from
    /// `live`, so the window never snaps.
    pub fn animate_to(&mut self, live: Point, target: Point, duration: Duration, now: Duration) -> bool {
        if self.target() == Some(target) {
            return false;
        }
        self.transition = Some(Transition {
            from: live,
            target,
            started: now,
            duration,
        });
        true
    }

    pub fn apply(&mut self, command: &DockCommand, live: Point, now: Duration) -> bool {
        self.animate_to(live, command.target(), command.duration(), now)
    }

    /// Position for `now`, or `None` when idle. The last frame lands exactly
    /// on the target and ends the slide.
    pub fn frame(&mut self, now: Duration) -> Option<Point> {
        let t = self.transition?;
        let elapsed = now.saturating_sub(t.started);
        let progress = if t.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f64() / t.duration.as_secs_f64()).min(1.0)
        };

        if progress >= 1.0 {
            self.transition = None;
            return Some(t.target);
        }

        let eased = ease_out_cubic(progress);
        let lerp = |a: i32, b: i32| (f64::from(a) + f64::from(b - a) * eased).round() as i32;
        Some(Point::new(lerp(t.from.x, t.target.x), lerp(t.from.y, t.target.y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SLIDE: Duration = Duration::from_millis(280);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn easing_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!(ease_out_cubic(0.5) > 0.5);
    }

    #[test]
    fn slides_from_start_to_target() {
        let mut a = WindowAnimator::new();
        let from = Point::new(1568, 868);
        let to = Point::new(1896, 868);
        assert!(a.animate_to(from, to, SLIDE, ms(0)));

        assert_eq!(a.frame(ms(0)), Some(from));
        let mid = a.frame(ms(140)).unwrap();
        assert!(mid.x > from.x && mid.x < to.x);
        assert_eq!(mid.y, 868);

        assert_eq!(a.frame(ms(280)), Some(to));
        assert!(!a.is_animating());
        assert_eq!(a.frame(ms(296)), None);
    }

    #[test]
    fn same_target_in_flight_is_a_no_op() {
        let mut a = WindowAnimator::new();
        let to = Point::new(100, 0);
        a.animate_to(Point::new(0, 0), to, SLIDE, ms(0));
        assert!(!a.animate_to(Point::new(50, 0), to, SLIDE, ms(100)));

        // Still the original slide: finishes at 280, not 380.
        assert_eq!(a.frame(ms(280)), Some(to));
    }

    #[test]
    fn new_target_restarts_from_live_position() {
        let mut a = WindowAnimator::new();
        a.animate_to(Point::new(0, 0), Point::new(100, 0), SLIDE, ms(0));
        let live = a.frame(ms(100)).unwrap();

        assert!(a.animate_to(live, Point::new(0, 0), SLIDE, ms(100)));
        assert_eq!(a.frame(ms(100)), Some(live));
        assert_eq!(a.frame(ms(380)), Some(Point::new(0, 0)));
    }

    #[test]
    fn applies_dock_commands() {
        let mut a = WindowAnimator::new();
        let cmd = DockCommand::Hide {
            target: Point::new(1896, 868),
            duration: SLIDE,
        };
        assert!(a.apply(&cmd, Point::new(1568, 868), ms(0)));
        assert_eq!(a.target(), Some(Point::new(1896, 868)));
    }
}
