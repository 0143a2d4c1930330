//! Recognition requests and the search engine that runs them against frames
//!
//! - `types`: what to look for (`RecognitionObject`)
//! - `matcher`: the template matching boundary (`TemplateMatcher`)
//! - `vision`: find / find-and-click on a `RectArea`

pub mod matcher;
pub mod types;
pub mod vision;


pub use matcher::{ImageprocMatcher, TemplateMatcher};
pub use types::{RecognitionObject, RecognitionType, TemplateMatchMode};
pub use vision::VisionContext;
