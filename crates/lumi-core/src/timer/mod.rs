mod display;
mod engine;
mod settings;

pub use display::{format_clock, format_long_clock, progress, ring_dash_offset, RING_CIRCUMFERENCE};
pub use engine::{FocusTimer, Mode, TimerSnapshot, TimerTask, AUTO_START_GRACE, TICK_PERIOD};
pub use settings::{
    Settings, AUTO_START_BREAK_KEY, AUTO_START_FOCUS_KEY, BREAK_DURATION_KEY, BREAK_MINUTES,
    FOCUS_DURATION_KEY, FOCUS_MINUTES,
};
