//! Lazily derived representations of a single image
//!
//! A cache starts from one source form (the RGBA pixel buffer a screen
//! capture arrives in, or an RGB matrix) and derives the other forms on first
//! access. Every slot is written at most once, so references handed out stay
//! valid and identical for the lifetime of the cache, and concurrent readers
//! never race a derivation.

use std::sync::OnceLock;

use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};

use crate::error::{VisionError, VisionResult};

#[derive(Debug)]
pub struct ImageCache {
    pixels: OnceLock<RgbaImage>,
    matrix: OnceLock<RgbImage>,
    grey: OnceLock<GrayImage>,
}

impl ImageCache {
    /// Cache backed by a pixel buffer; the matrix form is derived on demand.
    pub fn from_pixels(pixels: RgbaImage) -> Self {
        Self {
            pixels: OnceLock::from(pixels),
            matrix: OnceLock::new(),
            grey: OnceLock::new(),
        }
    }

    /// Cache backed by a matrix; the pixel buffer is derived on demand.
    pub fn from_matrix(matrix: RgbImage) -> Self {
        Self {
            pixels: OnceLock::new(),
            matrix: OnceLock::from(matrix),
            grey: OnceLock::new(),
        }
    }

    /// Decode an in-memory PNG/JPEG into a pixel-buffer backed cache.
    pub fn from_encoded(bytes: &[u8]) -> Result<Self, image::ImageError> {
        Ok(Self::from_pixels(image::load_from_memory(bytes)?.to_rgba8()))
    }

    pub fn has_source(&self) -> bool {
        self.pixels.get().is_some() || self.matrix.get().is_some()
    }

    /// Pixel-buffer form, derived from the matrix on first use.
    pub fn pixels(&self) -> VisionResult<&RgbaImage> {
        if let Some(pixels) = self.pixels.get() {
            return Ok(pixels);
        }
        let matrix = self.matrix.get().ok_or(VisionError::NoSourceImage)?;
        Ok(self.pixels.get_or_init(|| {
            log::debug!("Deriving pixel buffer from {}x{} matrix", matrix.width(), matrix.height());
            DynamicImage::ImageRgb8(matrix.clone()).to_rgba8()
        }))
    }

    /// Matrix form, derived from the pixel buffer on first use.
    pub fn matrix(&self) -> VisionResult<&RgbImage> {
        if let Some(matrix) = self.matrix.get() {
            return Ok(matrix);
        }
        let pixels = self.pixels.get().ok_or(VisionError::NoSourceImage)?;
        Ok(self.matrix.get_or_init(|| {
            log::debug!("Deriving matrix from {}x{} pixel buffer", pixels.width(), pixels.height());
            DynamicImage::ImageRgba8(pixels.clone()).to_rgb8()
        }))
    }

    /// Greyscale form, always reduced from the matrix form.
    pub fn grey(&self) -> VisionResult<&GrayImage> {
        if let Some(grey) = self.grey.get() {
            return Ok(grey);
        }
        let matrix = self.matrix()?;
        Ok(self.grey.get_or_init(|| image::imageops::grayscale(matrix)))
    }

    /// Width and height of the source image.
    pub fn dimensions(&self) -> VisionResult<(u32, u32)> {
        if let Some(pixels) = self.pixels.get() {
            return Ok(pixels.dimensions());
        }
        Ok(self.matrix()?.dimensions())
    }
}
