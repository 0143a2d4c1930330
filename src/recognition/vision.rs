//! Search engine: finds recognition objects inside a frame's image and turns
//! hits into child frames, overlay rectangles and clicks.

use std::sync::Arc;

use image::GrayImage;

use super::matcher::{ImageprocMatcher, TemplateMatcher};
use super::types::{RecognitionObject, RecognitionType};
use crate::area::{Point, Rect, RectArea};
use crate::error::{VisionError, VisionResult};
use crate::input::ClickSink;
use crate::overlay::{DrawContent, OverlaySink, RectDrawable};

/// Everything a search needs besides the frame and the request: the matcher,
/// where highlights go, and where clicks go.
pub struct VisionContext {
    matcher: Box<dyn TemplateMatcher>,
    overlay: Arc<dyn OverlaySink>,
    input: Arc<dyn ClickSink>,
}

impl VisionContext {
    pub fn new(
        matcher: Box<dyn TemplateMatcher>,
        overlay: Arc<dyn OverlaySink>,
        input: Arc<dyn ClickSink>,
    ) -> Self {
        Self {
            matcher,
            overlay,
            input,
        }
    }

    /// imageproc matching with the given overlay registry and click sink
    pub fn with_defaults(overlay: Arc<DrawContent>, input: Arc<dyn ClickSink>) -> Self {
        Self::new(Box::new(ImageprocMatcher), overlay, input)
    }

    /// Search `host` for `ro`. A miss is an empty area, not an error.
    pub fn find<'h>(
        &self,
        host: &'h RectArea<'h>,
        ro: &RecognitionObject,
    ) -> VisionResult<RectArea<'h>> {
        self.find_with(host, ro, |_| {})
    }

    /// Like [`find`](Self::find), running `action` on the hit before returning it.
    pub fn find_with<'h, F>(
        &self,
        host: &'h RectArea<'h>,
        ro: &RecognitionObject,
        action: F,
    ) -> VisionResult<RectArea<'h>>
    where
        F: FnOnce(&RectArea<'h>),
    {
        if !host.has_image() {
            return Err(VisionError::NoImageContent);
        }

        match ro.recognition_type {
            RecognitionType::TemplateMatch => self.find_template(host, ro, action),
            kind => Err(VisionError::UnsupportedRecognitionType { kind }),
        }
    }

    fn find_template<'h, F>(
        &self,
        host: &'h RectArea<'h>,
        ro: &RecognitionObject,
        action: F,
    ) -> VisionResult<RectArea<'h>>
    where
        F: FnOnce(&RectArea<'h>),
    {
        let template = ro
            .template
            .as_ref()
            .ok_or_else(|| VisionError::InvalidRecognitionObject {
                reason: "template image is missing".to_string(),
            })?;
        let template_grey = template.grey()?;

        if let Some(mask) = &ro.mask
            && mask.dimensions() != template_grey.dimensions()
        {
            return Err(VisionError::InvalidRecognitionObject {
                reason: format!(
                    "mask is {}x{} but template is {}x{}",
                    mask.width(),
                    mask.height(),
                    template_grey.width(),
                    template_grey.height()
                ),
            });
        }

        let host_grey = host.grey()?;
        let roi = ro.region_of_interest;
        let cropped;
        // Origin of the searched image inside the host
        let offset: Point;
        let search: &GrayImage = if roi.is_empty() {
            offset = Point::default();
            host_grey
        } else {
            if !roi.fits_within(host_grey.width(), host_grey.height()) {
                return Err(VisionError::RegionOutOfBounds {
                    region: roi,
                    width: host_grey.width(),
                    height: host_grey.height(),
                });
            }
            cropped = image::imageops::crop_imm(
                host_grey,
                roi.x as u32,
                roi.y as u32,
                roi.width as u32,
                roi.height as u32,
            )
            .to_image();
            offset = roi.origin();
            &cropped
        };

        let hit = self.matcher.match_template(
            search,
            template_grey,
            ro.match_mode,
            ro.mask.as_ref(),
            ro.threshold,
        );

        // Non-positive coordinates count as no match, including real hits on
        // the top or left edge of the search area.
        let hit = match hit {
            Some(p) if p.x > 0 && p.y > 0 => Some(p),
            Some(p) => {
                log::warn!(
                    "⚠️ '{}' matched on search area edge at ({}, {}), ignored",
                    ro.name,
                    p.x,
                    p.y
                );
                None
            }
            None => None,
        };

        let Some(point) = hit else {
            log::debug!("'{}' not found", ro.name);
            if let Some(name) = ro.overlay_name() {
                self.overlay.remove_rect(name);
            }
            return Ok(RectArea::empty());
        };

        let found = RectArea::with_image(
            Arc::clone(template),
            point.x + offset.x,
            point.y + offset.y,
            Some(host),
        )?;
        log::debug!("✅ '{}' found at {:?} (depth {})", ro.name, found.to_rect(), found.depth());

        if let Some(name) = ro.overlay_name() {
            let rect = found.project_to_capture_area()?;
            self.overlay
                .put_rect(name, RectDrawable::new(rect, Some(name.to_string()), ro.draw_style));
        }

        action(&found);
        Ok(found)
    }

    /// Find `ro` and click the centre of the hit, if any.
    pub fn find_and_click_center<'h>(
        &self,
        host: &'h RectArea<'h>,
        ro: &RecognitionObject,
    ) -> VisionResult<RectArea<'h>> {
        let found = self.find(host, ro)?;
        if !found.is_empty() {
            self.click_center(&found)?;
        }
        Ok(found)
    }

    /// Click the centre of `area`, always in desktop coordinates.
    pub fn click_center(&self, area: &RectArea<'_>) -> VisionResult<()> {
        let rect: Rect = if area.is_at_desktop_level() {
            area.to_rect()
        } else {
            area.project_to_desktop()?
        };
        self.input.click_center(rect);
        Ok(())
    }
}
