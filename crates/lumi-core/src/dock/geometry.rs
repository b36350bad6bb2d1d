use serde::{Deserialize, Serialize};

pub const WINDOW_WIDTH: i32 = 320;
pub const WINDOW_HEIGHT: i32 = 180;
/// Gap between the resting window and the work area's bottom-right corner.
pub const EDGE_PADDING: i32 = 32;
/// Width of the sliver left on screen when hidden.
pub const INDICATOR_WIDTH: i32 = 24;

/// Width of the screen-edge strip that reveals a hidden dock.
pub const INDICATOR_ZONE_WIDTH: i32 = 50;
/// Vertical slack above and below the indicator.
pub const INDICATOR_ZONE_SLACK: i32 = 30;
/// Margin around the window that still counts as hovering it.
pub const WINDOW_HOVER_MARGIN: i32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Fixed dock placement for a work area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockLayout {
    pub screen_width: i32,
    pub window_width: i32,
    pub window_height: i32,
    /// Resting (shown) position.
    pub normal: Point,
    /// Edge-indicator (hidden) position.
    pub hidden: Point,
}

impl DockLayout {
    /// Bottom-right placement on a `width` x `height` work area.
    pub fn for_work_area(width: i32, height: i32) -> Self {
        let normal = Point::new(
            width - WINDOW_WIDTH - EDGE_PADDING,
            height - WINDOW_HEIGHT - EDGE_PADDING,
        );
        Self {
            screen_width: width,
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            normal,
            hidden: Point::new(width - INDICATOR_WIDTH, normal.y),
        }
    }

    /// Build a sample for a cursor position with the window at `window`.
    pub fn sample(&self, mouse: Point, window: Point) -> CursorSample {
        CursorSample {
            mouse_x: mouse.x,
            mouse_y: mouse.y,
            window_x: window.x,
            window_y: window.y,
            window_width: self.window_width,
            window_height: self.window_height,
            screen_width: self.screen_width,
            indicator_y: self.normal.y,
            indicator_height: self.window_height,
        }
    }
}

/// One cursor/geometry reading from the window host (~30 per second).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorSample {
    pub mouse_x: i32,
    pub mouse_y: i32,
    pub window_x: i32,
    pub window_y: i32,
    pub window_width: i32,
    pub window_height: i32,
    pub screen_width: i32,
    pub indicator_y: i32,
    pub indicator_height: i32,
}

impl CursorSample {
    /// Cursor is in the right-edge strip, level with the indicator.
    pub fn in_indicator_zone(&self) -> bool {
        self.mouse_x >= self.screen_width - INDICATOR_ZONE_WIDTH
            && self.mouse_y >= self.indicator_y - INDICATOR_ZONE_SLACK
            && self.mouse_y <= self.indicator_y + self.indicator_height + INDICATOR_ZONE_SLACK
    }

    /// Cursor is over the window or within the hover margin around it.
    pub fn over_window(&self) -> bool {
        self.mouse_x >= self.window_x - WINDOW_HOVER_MARGIN
            && self.mouse_x <= self.window_x + self.window_width + WINDOW_HOVER_MARGIN
            && self.mouse_y >= self.window_y - WINDOW_HOVER_MARGIN
            && self.mouse_y <= self.window_y + self.window_height + WINDOW_HOVER_MARGIN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> DockLayout {
        DockLayout::for_work_area(1920, 1080)
    }

    #[test]
    fn positions_for_full_hd() {
        let l = layout();
        assert_eq!(l.normal, Point::new(1568, 868));
        assert_eq!(l.hidden, Point::new(1896, 868));
    }

    #[test]
    fn indicator_zone_bounds() {
        let l = layout();
        let at = |x, y| l.sample(Point::new(x, y), l.hidden).in_indicator_zone();

        assert!(at(1870, 900));
        assert!(at(1919, 868 - 30));
        assert!(at(1919, 868 + 180 + 30));
        assert!(!at(1869, 900));
        assert!(!at(1919, 868 - 31));
        assert!(!at(1919, 868 + 180 + 31));
    }

    #[test]
    fn hover_margin_extends_window_box() {
        let l = layout();
        let over = |x, y| l.sample(Point::new(x, y), l.normal).over_window();

        assert!(over(1568 - 20, 868 - 20));
        assert!(over(1568 + 320 + 20, 868 + 180 + 20));
        assert!(!over(1568 - 21, 900));
        assert!(!over(1700, 868 + 180 + 21));
    }
}
