pub mod area;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod input;
pub mod overlay;
pub mod recognition;

pub use area::{ImageCache, Point, Rect, RectArea};
pub use config::MatchConfig;
pub use error::{VisionError, VisionResult};
pub use recognition::{RecognitionObject, RecognitionType, TemplateMatchMode, VisionContext};
