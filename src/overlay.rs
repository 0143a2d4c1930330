//! Named rectangles handed to the on-screen overlay
//!
//! Rendering happens elsewhere; this module only keeps the registry of what
//! should currently be highlighted, keyed by recognition name.

use std::collections::HashMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::area::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawStyle {
    /// RGBA outline colour
    pub color: [u8; 4],
    pub thickness: u32,
}

impl Default for DrawStyle {
    fn default() -> Self {
        Self {
            color: [255, 0, 0, 255],
            thickness: 2,
        }
    }
}

/// A rectangle in capture-area coordinates, ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectDrawable {
    pub rect: Rect,
    pub label: Option<String>,
    pub style: DrawStyle,
}

impl RectDrawable {
    pub fn new(rect: Rect, label: Option<String>, style: DrawStyle) -> Self {
        Self { rect, label, style }
    }
}

pub trait OverlaySink: Send + Sync {
    /// Register or replace the rectangle stored under `name`.
    fn put_rect(&self, name: &str, drawable: RectDrawable);
    fn remove_rect(&self, name: &str);
}

/// In-memory overlay registry; last write wins per name.
#[derive(Debug, Default)]
pub struct DrawContent {
    rects: RwLock<HashMap<String, RectDrawable>>,
}

impl DrawContent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<RectDrawable> {
        self.read(|rects| rects.get(name).cloned())
    }

    pub fn len(&self) -> usize {
        self.read(HashMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registered names in sorted order
    pub fn names(&self) -> Vec<String> {
        let mut names = self.read(|rects| rects.keys().cloned().collect::<Vec<_>>());
        names.sort();
        names
    }

    pub fn clear(&self) {
        self.write(HashMap::clear);
    }

    // A poisoned lock still holds a consistent map, so keep using it.
    fn read<T>(&self, f: impl FnOnce(&HashMap<String, RectDrawable>) -> T) -> T {
        let guard = self.rects.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&guard)
    }

    fn write<T>(&self, f: impl FnOnce(&mut HashMap<String, RectDrawable>) -> T) -> T {
        let mut guard = self.rects.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard)
    }
}

impl OverlaySink for DrawContent {
    fn put_rect(&self, name: &str, drawable: RectDrawable) {
        log::debug!("Overlay put '{}' at {:?}", name, drawable.rect);
        self.write(|rects| rects.insert(name.to_string(), drawable));
    }

    fn remove_rect(&self, name: &str) {
        if self.write(|rects| rects.remove(name)).is_some() {
            log::debug!("Overlay removed '{}'", name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins() {
        let overlay = DrawContent::new();
        let style = DrawStyle::default();

        overlay.put_rect("button", RectDrawable::new(Rect::new(1, 1, 5, 5), None, style));
        overlay.put_rect(
            "button",
            RectDrawable::new(Rect::new(9, 9, 5, 5), Some("button".into()), style),
        );

        assert_eq!(overlay.len(), 1);
        assert_eq!(overlay.get("button").unwrap().rect, Rect::new(9, 9, 5, 5));
    }

    #[test]
    fn test_remove_and_names() {
        let overlay = DrawContent::new();
        let drawable = RectDrawable::new(Rect::new(0, 0, 2, 2), None, DrawStyle::default());
        overlay.put_rect("b", drawable.clone());
        overlay.put_rect("a", drawable);

        assert_eq!(overlay.names(), vec!["a".to_string(), "b".to_string()]);

        overlay.remove_rect("a");
        overlay.remove_rect("missing");
        assert_eq!(overlay.names(), vec!["b".to_string()]);

        overlay.clear();
        assert!(overlay.is_empty());
    }
}
