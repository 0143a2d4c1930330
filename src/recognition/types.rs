//! Recognition request data types

use std::sync::Arc;

use image::GrayImage;
use imageproc::template_matching::MatchTemplateMethod;
use serde::{Deserialize, Serialize};

use crate::area::{ImageCache, Rect};
use crate::config::MatchConfig;
use crate::overlay::DrawStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecognitionType {
    TemplateMatch,
    ColorMatch,
    Ocr,
    Detect,
}

/// Scoring method for template matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemplateMatchMode {
    /// Sum of squared differences, lower is better
    SqDiff,
    SqDiffNormed,
    /// Cross correlation, higher is better
    CCorr,
    CCorrNormed,
}

impl TemplateMatchMode {
    pub fn method(self) -> MatchTemplateMethod {
        match self {
            TemplateMatchMode::SqDiff => MatchTemplateMethod::SumOfSquaredErrors,
            TemplateMatchMode::SqDiffNormed => MatchTemplateMethod::SumOfSquaredErrorsNormalized,
            TemplateMatchMode::CCorr => MatchTemplateMethod::CrossCorrelation,
            TemplateMatchMode::CCorrNormed => MatchTemplateMethod::CrossCorrelationNormalized,
        }
    }

    /// Whether the best position is the minimum of the score map
    pub fn lower_is_better(self) -> bool {
        matches!(self, TemplateMatchMode::SqDiff | TemplateMatchMode::SqDiffNormed)
    }

    /// Parse the names accepted on the command line.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "sqdiff" => Some(TemplateMatchMode::SqDiff),
            "sqdiff-normed" => Some(TemplateMatchMode::SqDiffNormed),
            "ccorr" => Some(TemplateMatchMode::CCorr),
            "ccorr-normed" => Some(TemplateMatchMode::CCorrNormed),
            _ => None,
        }
    }
}

/// What to look for and where.
///
/// Built once and then only read; a search never modifies it.
#[derive(Debug, Clone)]
pub struct RecognitionObject {
    pub recognition_type: RecognitionType,
    /// Overlay key; also used in log output
    pub name: String,
    /// Part of the host image to search, `Rect::EMPTY` for all of it
    pub region_of_interest: Rect,
    pub template: Option<Arc<ImageCache>>,
    pub mask: Option<GrayImage>,
    pub threshold: f32,
    pub match_mode: TemplateMatchMode,
    pub draw_on_window: bool,
    pub draw_style: DrawStyle,
}

impl RecognitionObject {
    pub fn template_match(template: impl Into<Arc<ImageCache>>, config: &MatchConfig) -> Self {
        Self {
            recognition_type: RecognitionType::TemplateMatch,
            name: String::new(),
            region_of_interest: Rect::EMPTY,
            template: Some(template.into()),
            mask: None,
            threshold: config.threshold,
            match_mode: config.match_mode,
            draw_on_window: config.draw_on_window,
            draw_style: config.draw_style,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_region_of_interest(mut self, region: Rect) -> Self {
        self.region_of_interest = region;
        self
    }

    pub fn with_mask(mut self, mask: GrayImage) -> Self {
        self.mask = Some(mask);
        self
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_match_mode(mut self, mode: TemplateMatchMode) -> Self {
        self.match_mode = mode;
        self
    }

    pub fn draw_on_window(mut self, style: DrawStyle) -> Self {
        self.draw_on_window = true;
        self.draw_style = style;
        self
    }

    /// Overlay key when drawing is requested and a name is set
    pub fn overlay_name(&self) -> Option<&str> {
        (self.draw_on_window && !self.name.is_empty()).then_some(self.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    #[test]
    fn test_builder_takes_config_defaults() {
        let config = crate::config::create_ui_config();
        let template = ImageCache::from_matrix(RgbImage::new(4, 4));
        let ro = RecognitionObject::template_match(template, &config).with_name("confirm");

        assert_eq!(ro.recognition_type, RecognitionType::TemplateMatch);
        assert_eq!(ro.threshold, 0.9);
        assert_eq!(ro.region_of_interest, Rect::EMPTY);
        assert_eq!(ro.overlay_name(), Some("confirm"));
    }

    #[test]
    fn test_overlay_name_requires_name_and_flag() {
        let template = ImageCache::from_matrix(RgbImage::new(2, 2));
        let ro = RecognitionObject::template_match(template, &MatchConfig::default());
        assert_eq!(ro.overlay_name(), None);

        let named = ro.clone().with_name("icon");
        assert_eq!(named.overlay_name(), None);

        let unnamed_drawn = ro.draw_on_window(DrawStyle::default());
        assert_eq!(unnamed_drawn.overlay_name(), None);
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!(
            TemplateMatchMode::parse("sqdiff-normed"),
            Some(TemplateMatchMode::SqDiffNormed)
        );
        assert_eq!(TemplateMatchMode::parse("ccorr"), Some(TemplateMatchMode::CCorr));
        assert_eq!(TemplateMatchMode::parse("ccoeff"), None);
        assert!(TemplateMatchMode::SqDiff.lower_is_better());
        assert!(!TemplateMatchMode::CCorrNormed.lower_is_better());
    }
}
