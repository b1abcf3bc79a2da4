use thiserror::Error;

/// Errors originating from the viewer core.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("image set must contain at least one image")]
    EmptyImageSet,

    #[error("image index {index} out of range (set has {len} images)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("invalid zoom limits: {reason}")]
    InvalidZoomLimits { reason: String },
}
