//! Boundary to the input-injection primitive
//!
//! Everything passed through here is already in desktop coordinates.

use crate::area::{Point, Rect};

pub trait ClickSink: Send + Sync {
    /// Click at an absolute desktop position; fire and forget.
    fn click(&self, point: Point);

    fn click_center(&self, rect: Rect) {
        self.click(rect.center());
    }
}

/// Click sink that only logs where it would have clicked.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogClicker;

impl ClickSink for LogClicker {
    fn click(&self, point: Point) {
        log::info!("🖱️ Click at desktop ({}, {})", point.x, point.y);
    }
}
