//! The desktop "peeking dock": visibility decisions, window slides, eyes.
//!
//! The window host owns the actual window. It feeds cursor samples to a
//! [`DockController`], hands the resulting [`DockCommand`]s to a
//! [`WindowAnimator`], and moves the window to each animation frame.

mod animation;
mod eyes;
mod geometry;
mod visibility;

pub use animation::{ease_out_cubic, WindowAnimator, FRAME_INTERVAL};
pub use eyes::{gaze_offset, GAZE_FALLOFF, MAX_GAZE_OFFSET};
pub use geometry::{
    CursorSample, DockLayout, Point, EDGE_PADDING, INDICATOR_WIDTH, INDICATOR_ZONE_SLACK,
    INDICATOR_ZONE_WIDTH, WINDOW_HEIGHT, WINDOW_HOVER_MARGIN, WINDOW_WIDTH,
};
pub use visibility::{
    DockCommand, DockController, DockTask, ANIMATION_LOCK, HIDE_DEBOUNCE, TRANSITION,
};
