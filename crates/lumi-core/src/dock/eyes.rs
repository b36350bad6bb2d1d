//! The dock's eyes follow the cursor anywhere on screen.

/// Furthest the pupils move from center, in pixels.
pub const MAX_GAZE_OFFSET: f64 = 10.0;
/// Cursor distance per pixel of pupil travel.
pub const GAZE_FALLOFF: f64 = 40.0;

/// Pupil offset `(dx, dy)` for eyes centered at `eyes` looking at `cursor`,
/// both in screen coordinates.
pub fn gaze_offset(eyes: (f64, f64), cursor: (f64, f64)) -> (f64, f64) {
    let dx = cursor.0 - eyes.0;
    let dy = cursor.1 - eyes.1;
    let angle = dy.atan2(dx);
    let distance = (dx.hypot(dy) / GAZE_FALLOFF).min(MAX_GAZE_OFFSET);
    (angle.cos() * distance, angle.sin() * distance)
}
