//! Plain rectangle and point types in integer screen coordinates

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A rectangle expressed in some coordinate frame.
///
/// Which frame is not recorded here; a `Rect` is only meaningful together
/// with the [`RectArea`](super::RectArea) it was produced from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const EMPTY: Rect = Rect::new(0, 0, 0, 0);

    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Zero width or zero height
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Get the center point of this rectangle
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Check if this rectangle contains a point
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }

    /// Check that the rectangle lies entirely inside an image of the given size.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        let (width, height) = (i64::from(width), i64::from(height));
        self.x >= 0
            && self.y >= 0
            && self.width >= 0
            && self.height >= 0
            && i64::from(self.x) + i64::from(self.width) <= width
            && i64::from(self.y) + i64::from(self.height) <= height
    }

    /// Parse coordinates from a string such as "300,1682,50,50"
    pub fn parse(region_str: &str) -> Option<Rect> {
        let parts: Vec<&str> = region_str.split(',').collect();
        if parts.len() == 4
            && let (Ok(x), Ok(y), Ok(width), Ok(height)) = (
                parts[0].trim().parse::<i32>(),
                parts[1].trim().parse::<i32>(),
                parts[2].trim().parse::<i32>(),
                parts[3].trim().parse::<i32>(),
            )
        {
            return Some(Rect::new(x, y, width, height));
        }
        None
    }
}
