//! Coordinate frames and the images attached to them

pub mod image_cache;
pub mod rect;
pub mod rect_area;

pub use image_cache::ImageCache;
pub use rect::{Point, Rect};
pub use rect_area::{CAPTURE_AREA_DEPTH, DESKTOP_DEPTH, RectArea};
