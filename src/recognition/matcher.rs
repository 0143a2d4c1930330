//! Template matcher boundary and its imageproc-backed implementation
//!
//! The matcher answers one question: where does the template fit best in the
//! search image, and is that fit good enough. Tie-breaking between equally
//! good positions is left to the score map scan.

use image::GrayImage;
use imageproc::template_matching::{
    Extremes, find_extremes, match_template, match_template_with_mask,
};

use super::types::TemplateMatchMode;
use crate::area::Point;

pub trait TemplateMatcher: Send + Sync {
    /// Best position of `template` inside `search`, or `None` when the best
    /// score does not meet `threshold`.
    fn match_template(
        &self,
        search: &GrayImage,
        template: &GrayImage,
        mode: TemplateMatchMode,
        mask: Option<&GrayImage>,
        threshold: f32,
    ) -> Option<Point>;
}

/// Matcher using `imageproc::template_matching`.
///
/// Correlation modes accept the maximum score when `score >= threshold`.
/// `SqDiffNormed` accepts the minimum when `1 - score >= threshold`, and raw
/// `SqDiff` when `score <= threshold`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageprocMatcher;

impl TemplateMatcher for ImageprocMatcher {
    fn match_template(
        &self,
        search: &GrayImage,
        template: &GrayImage,
        mode: TemplateMatchMode,
        mask: Option<&GrayImage>,
        threshold: f32,
    ) -> Option<Point> {
        if template.width() == 0
            || template.height() == 0
            || template.width() > search.width()
            || template.height() > search.height()
        {
            log::debug!(
                "⚠️ Template {}x{} does not fit search area {}x{}",
                template.width(),
                template.height(),
                search.width(),
                search.height()
            );
            return None;
        }

        let scores = match mask {
            Some(mask) if mask.dimensions() != template.dimensions() => return None,
            Some(mask) => match_template_with_mask(search, template, mode.method(), mask),
            None => match_template(search, template, mode.method()),
        };

        let Extremes {
            max_value,
            min_value,
            max_value_location,
            min_value_location,
        } = find_extremes(&scores);

        let (score, location, accepted) = match mode {
            TemplateMatchMode::CCorr | TemplateMatchMode::CCorrNormed => {
                (max_value, max_value_location, max_value >= threshold)
            }
            TemplateMatchMode::SqDiffNormed => {
                (min_value, min_value_location, 1.0 - min_value >= threshold)
            }
            TemplateMatchMode::SqDiff => (min_value, min_value_location, min_value <= threshold),
        };

        log::debug!(
            "🔍 {:?} best score {:.4} at ({}, {}), threshold {:.3}",
            mode,
            score,
            location.0,
            location.1,
            threshold
        );

        accepted.then(|| Point::new(location.0 as i32, location.1 as i32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    /// Textured background so normalised scores never divide by zero
    fn textured(width: u32, height: u32) -> GrayImage {
        GrayImage::from_fn(width, height, |x, y| Luma([((x * 31 + y * 17) % 97 + 40) as u8]))
    }

    fn template_pattern() -> GrayImage {
        GrayImage::from_fn(6, 5, |x, y| Luma([if (x + y) % 2 == 0 { 250 } else { 5 }]))
    }

    fn stamp(image: &mut GrayImage, patch: &GrayImage, at_x: u32, at_y: u32) {
        for (x, y, pixel) in patch.enumerate_pixels() {
            image.put_pixel(at_x + x, at_y + y, *pixel);
        }
    }

    #[test]
    fn test_exact_match_sqdiff_normed() {
        let template = template_pattern();
        let mut search = textured(40, 30);
        stamp(&mut search, &template, 13, 8);

        let found = ImageprocMatcher.match_template(
            &search,
            &template,
            TemplateMatchMode::SqDiffNormed,
            None,
            0.95,
        );
        assert_eq!(found, Some(Point::new(13, 8)));
    }

    #[test]
    fn test_exact_match_ccorr_normed() {
        let template = template_pattern();
        let mut search = textured(40, 30);
        stamp(&mut search, &template, 21, 17);

        let found = ImageprocMatcher.match_template(
            &search,
            &template,
            TemplateMatchMode::CCorrNormed,
            None,
            0.95,
        );
        assert_eq!(found, Some(Point::new(21, 17)));
    }

    #[test]
    fn test_unreachable_threshold_is_no_match() {
        let template = template_pattern();
        let mut search = textured(40, 30);
        stamp(&mut search, &template, 5, 5);

        let found = ImageprocMatcher.match_template(
            &search,
            &template,
            TemplateMatchMode::SqDiffNormed,
            None,
            1.5,
        );
        assert_eq!(found, None);
    }

    #[test]
    fn test_template_larger_than_search() {
        let found = ImageprocMatcher.match_template(
            &textured(4, 4),
            &template_pattern(),
            TemplateMatchMode::CCorrNormed,
            None,
            0.1,
        );
        assert_eq!(found, None);
    }

    #[test]
    fn test_mask_size_mismatch_is_no_match() {
        let mask = GrayImage::from_pixel(2, 2, Luma([255]));
        let found = ImageprocMatcher.match_template(
            &textured(40, 30),
            &template_pattern(),
            TemplateMatchMode::SqDiff,
            Some(&mask),
            f32::MAX,
        );
        assert_eq!(found, None);
    }
}
