use std::path::PathBuf;
use thiserror::Error;

use crate::area::Rect;
use crate::recognition::RecognitionType;

/// A specialized `Result` type for frame and recognition operations.
pub type VisionResult<T> = Result<T, VisionError>;

/// The error type for all frame, image and recognition operations.
///
/// "No match" is never an error: a search that finds nothing returns an
/// empty [`RectArea`](crate::area::RectArea).
#[derive(Debug, Error)]
pub enum VisionError {
    #[error("Frame has no image content, cannot run a search on it")]
    NoImageContent,

    #[error("Image cache holds neither a pixel buffer nor a matrix")]
    NoSourceImage,

    #[error("Invalid recognition object: {reason}")]
    InvalidRecognitionObject { reason: String },

    #[error("Recognition type {kind:?} is not supported by frame search")]
    UnsupportedRecognitionType { kind: RecognitionType },

    #[error("Coordinate frame at depth {depth} not found in the owner chain")]
    CoordinateFrameNotFound { depth: u32 },

    #[error("Region {region:?} does not fit inside a {width}x{height} image")]
    RegionOutOfBounds {
        region: Rect,
        width: u32,
        height: u32,
    },

    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    #[error("Unknown routine name: {name}")]
    UnknownRoutine { name: String },

    #[error("Dispatch command channel closed")]
    ChannelClosed,

    #[error("Dispatch command queue is full")]
    QueueFull,

    #[error("Failed to load image {path:?}: {source}")]
    ImageLoad {
        path: PathBuf,
        source: image::ImageError,
    },
}

impl VisionError {
    /// Check if this error means the caller built an inconsistent frame tree
    /// or request, as opposed to an environment failure such as a missing file.
    pub fn is_setup_defect(&self) -> bool {
        !matches!(
            self,
            VisionError::ChannelClosed | VisionError::QueueFull | VisionError::ImageLoad { .. }
        )
    }
}
