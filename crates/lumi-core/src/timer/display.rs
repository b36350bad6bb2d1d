//! Pure projections of timer state for rendering.

use std::f64::consts::PI;

/// Circumference of the dock's progress ring (radius 44).
pub const RING_CIRCUMFERENCE: f64 = 2.0 * PI * 44.0;

/// `MM:SS`. Minutes are not wrapped, so 120 minutes renders as `120:00`.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// `HH:MM:SS`, as the terminal shows it.
pub fn format_long_clock(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Remaining fraction in `[0, 1]`; 0 when there is no interval.
pub fn progress(remaining_secs: u64, total_secs: u64) -> f64 {
    if total_secs == 0 {
        return 0.0;
    }
    (remaining_secs as f64 / total_secs as f64).clamp(0.0, 1.0)
}

/// Stroke dash offset that draws the ring for `progress`.
pub fn ring_dash_offset(progress: f64) -> f64 {
    RING_CIRCUMFERENCE * (1.0 - progress.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_clock() {
        assert_eq!(format_clock(1500), "25:00");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(0), "00:00");
    }

    #[test]
    fn long_clock() {
        assert_eq!(format_long_clock(3665), "01:01:05");
        assert_eq!(format_long_clock(300), "00:05:00");
    }

    #[test]
    fn progress_is_remaining_fraction() {
        assert_eq!(progress(1500, 1500), 1.0);
        assert_eq!(progress(750, 1500), 0.5);
        assert_eq!(progress(0, 1500), 0.0);
        assert_eq!(progress(5, 0), 0.0);
    }

    #[test]
    fn ring_is_empty_when_done() {
        assert_eq!(ring_dash_offset(1.0), 0.0);
        assert!((ring_dash_offset(0.0) - RING_CIRCUMFERENCE).abs() < 1e-9);
    }
}
