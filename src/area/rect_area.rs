//! Rectangular areas positioned inside nested coordinate frames
//!
//! The usual hierarchy is:
//! desktop (depth 0) -> capture area (depth 1) -> part of the capture -> recognised image.
//! Every area stores its offset relative to its owner only; absolute
//! positions are computed by walking the owner chain.

use std::sync::Arc;

use image::{GrayImage, RgbImage, RgbaImage};

use super::image_cache::ImageCache;
use super::rect::Rect;
use crate::error::{VisionError, VisionResult};

/// Depth of the desktop frame
pub const DESKTOP_DEPTH: u32 = 0;
/// Depth of the window/screen capture frame
pub const CAPTURE_AREA_DEPTH: u32 = 1;

#[derive(Debug, Clone, Default)]
pub struct RectArea<'a> {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    depth: u32,
    coordinate_name: Option<String>,
    owner: Option<&'a RectArea<'a>>,
    image: Option<Arc<ImageCache>>,
}

impl<'a> RectArea<'a> {
    pub fn new(x: i32, y: i32, width: i32, height: i32, owner: Option<&'a RectArea<'a>>) -> Self {
        Self {
            x,
            y,
            width,
            height,
            depth: owner.map_or(DESKTOP_DEPTH, |o| o.depth + 1),
            coordinate_name: None,
            owner,
            image: None,
        }
    }

    /// The empty "no result" area.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Root frame covering a desktop of the given size.
    pub fn desktop(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height, None).with_coordinate_name("Desktop")
    }

    /// Wrap a shared image; width and height are taken from the image.
    pub fn with_image(
        image: Arc<ImageCache>,
        x: i32,
        y: i32,
        owner: Option<&'a RectArea<'a>>,
    ) -> VisionResult<Self> {
        let (width, height) = image.dimensions()?;
        let mut area = Self::new(x, y, 0, 0, owner);
        area.width = to_i32(width);
        area.height = to_i32(height);
        area.image = Some(image);
        Ok(area)
    }

    pub fn from_pixels(pixels: RgbaImage, x: i32, y: i32, owner: Option<&'a RectArea<'a>>) -> Self {
        let (width, height) = pixels.dimensions();
        let mut area = Self::new(x, y, to_i32(width), to_i32(height), owner);
        area.image = Some(Arc::new(ImageCache::from_pixels(pixels)));
        area
    }

    pub fn from_matrix(matrix: RgbImage, x: i32, y: i32, owner: Option<&'a RectArea<'a>>) -> Self {
        let (width, height) = matrix.dimensions();
        let mut area = Self::new(x, y, to_i32(width), to_i32(height), owner);
        area.image = Some(Arc::new(ImageCache::from_matrix(matrix)));
        area
    }

    pub fn with_coordinate_name(mut self, name: impl Into<String>) -> Self {
        self.coordinate_name = Some(name.into());
        self
    }

    pub fn coordinate_name(&self) -> Option<&str> {
        self.coordinate_name.as_deref()
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn owner(&self) -> Option<&'a RectArea<'a>> {
        self.owner
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn is_at_desktop_level(&self) -> bool {
        self.depth == DESKTOP_DEPTH
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn has_image(&self) -> bool {
        self.image.as_deref().is_some_and(ImageCache::has_source)
    }

    pub fn image(&self) -> VisionResult<&Arc<ImageCache>> {
        self.image.as_ref().ok_or(VisionError::NoImageContent)
    }

    pub fn pixels(&self) -> VisionResult<&RgbaImage> {
        self.image()?.pixels()
    }

    pub fn matrix(&self) -> VisionResult<&RgbImage> {
        self.image()?.matrix()
    }

    pub fn grey(&self) -> VisionResult<&GrayImage> {
        self.image()?.grey()
    }

    /// Express this area in the coordinate frame found at `depth`.
    ///
    /// Offsets of every frame strictly deeper than `depth` are summed; the
    /// target frame's own offset is not, since the result is relative to it.
    pub fn project_to(&self, depth: u32) -> VisionResult<Rect> {
        if depth == self.depth {
            return Ok(self.to_rect());
        }

        let (mut x, mut y) = (self.x, self.y);
        let mut father = self.owner;
        loop {
            let Some(frame) = father else {
                return Err(VisionError::CoordinateFrameNotFound { depth });
            };
            if frame.depth == depth {
                break;
            }
            x += frame.x;
            y += frame.y;
            father = frame.owner;
        }

        Ok(Rect::new(x, y, self.width, self.height))
    }

    pub fn project_to_desktop(&self) -> VisionResult<Rect> {
        self.project_to(DESKTOP_DEPTH)
    }

    pub fn project_to_capture_area(&self) -> VisionResult<Rect> {
        self.project_to(CAPTURE_AREA_DEPTH)
    }

    /// Cut `rect` out of this area's image into a new child area positioned
    /// at `rect`'s origin.
    pub fn crop(&'a self, rect: Rect) -> VisionResult<RectArea<'a>> {
        let matrix = self.matrix()?;
        if rect.is_empty() || !rect.fits_within(matrix.width(), matrix.height()) {
            return Err(VisionError::RegionOutOfBounds {
                region: rect,
                width: matrix.width(),
                height: matrix.height(),
            });
        }

        let sub = image::imageops::crop_imm(
            matrix,
            rect.x as u32,
            rect.y as u32,
            rect.width as u32,
            rect.height as u32,
        )
        .to_image();

        Ok(RectArea::from_matrix(sub, rect.x, rect.y, Some(self)))
    }
}

fn to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_depth_follows_owner() {
        let desktop = RectArea::desktop(1920, 1080);
        let capture = RectArea::new(10, 10, 800, 600, Some(&desktop));
        let part = RectArea::new(5, 5, 20, 20, Some(&capture));

        assert_eq!(desktop.depth(), 0);
        assert_eq!(capture.depth(), 1);
        assert_eq!(part.depth(), 2);
        assert!(desktop.is_at_desktop_level());
        assert!(!part.is_at_desktop_level());
        assert_eq!(desktop.coordinate_name(), Some("Desktop"));
    }

    #[test]
    fn test_projection_through_three_levels() {
        let desktop = RectArea::desktop(1920, 1080);
        let capture = RectArea::new(10, 10, 800, 600, Some(&desktop));
        let part = RectArea::new(5, 5, 20, 20, Some(&capture));

        assert_eq!(part.project_to_desktop().unwrap(), Rect::new(15, 15, 20, 20));
        assert_eq!(part.project_to_capture_area().unwrap(), Rect::new(5, 5, 20, 20));
    }

    #[test]
    fn test_projection_to_own_depth_is_identity() {
        let desktop = RectArea::desktop(100, 100);
        let capture = RectArea::new(3, 4, 50, 60, Some(&desktop));
        let part = RectArea::new(7, 8, 9, 10, Some(&capture));

        assert_eq!(desktop.project_to(0).unwrap(), desktop.to_rect());
        assert_eq!(capture.project_to(1).unwrap(), Rect::new(3, 4, 50, 60));
        assert_eq!(part.project_to(2).unwrap(), Rect::new(7, 8, 9, 10));
    }

    #[test]
    fn test_projection_negative_offsets() {
        let desktop = RectArea::desktop(100, 100);
        let capture = RectArea::new(-8, 20, 50, 50, Some(&desktop));
        let part = RectArea::new(3, -5, 4, 4, Some(&capture));

        assert_eq!(part.project_to_desktop().unwrap(), Rect::new(-5, 15, 4, 4));
    }

    #[test]
    fn test_projection_fails_without_root() {
        // Orphan frame is depth 0 and cannot reach depth 1
        let orphan = RectArea::new(1, 1, 5, 5, None);
        assert!(matches!(
            orphan.project_to_capture_area(),
            Err(VisionError::CoordinateFrameNotFound { depth: 1 })
        ));

        let desktop = RectArea::desktop(100, 100);
        let capture = RectArea::new(0, 0, 10, 10, Some(&desktop));
        let err = capture.project_to(7).unwrap_err();
        assert!(matches!(err, VisionError::CoordinateFrameNotFound { depth: 7 }));
        assert!(err.is_setup_defect());
    }

    #[test]
    fn test_empty_area() {
        let area = RectArea::empty();
        assert!(area.is_empty());
        assert!(!area.has_image());
        assert_eq!(area.depth(), 0);
        assert!(matches!(area.grey(), Err(VisionError::NoImageContent)));
    }

    #[test]
    fn test_image_area_takes_image_size() {
        let desktop = RectArea::desktop(1920, 1080);
        let capture = RectArea::from_matrix(RgbImage::new(64, 48), 100, 200, Some(&desktop));

        assert!(capture.has_image());
        assert_eq!(capture.to_rect(), Rect::new(100, 200, 64, 48));
        assert_eq!(capture.depth(), 1);
    }

    #[test]
    fn test_with_shared_image() {
        let cache = Arc::new(ImageCache::from_pixels(RgbaImage::new(12, 6)));
        let area = RectArea::with_image(Arc::clone(&cache), 2, 3, None).unwrap();

        assert_eq!(area.to_rect(), Rect::new(2, 3, 12, 6));
        assert!(Arc::ptr_eq(area.image().unwrap(), &cache));
        assert!(area.has_image());
    }

    #[test]
    fn test_crop_projects_back_to_rect() {
        let mut matrix = RgbImage::new(40, 30);
        matrix.put_pixel(12, 7, Rgb([255, 0, 0]));
        let desktop = RectArea::desktop(1920, 1080);
        let capture = RectArea::from_matrix(matrix, 50, 60, Some(&desktop));

        let rect = Rect::new(10, 5, 8, 6);
        let cropped = capture.crop(rect).unwrap();

        assert_eq!(cropped.depth(), capture.depth() + 1);
        assert_eq!(cropped.project_to(capture.depth()).unwrap(), rect);
        assert_eq!(cropped.project_to_desktop().unwrap(), Rect::new(60, 65, 8, 6));
        assert_eq!(cropped.matrix().unwrap().get_pixel(2, 2), &Rgb([255, 0, 0]));
    }

    #[test]
    fn test_crop_rejects_out_of_bounds() {
        let capture = RectArea::from_matrix(RgbImage::new(20, 20), 0, 0, None);
        assert!(matches!(
            capture.crop(Rect::new(15, 15, 10, 10)),
            Err(VisionError::RegionOutOfBounds { width: 20, height: 20, .. })
        ));

        let blank = RectArea::new(0, 0, 20, 20, None);
        assert!(matches!(
            blank.crop(Rect::new(0, 0, 5, 5)),
            Err(VisionError::NoImageContent)
        ));
    }
}
