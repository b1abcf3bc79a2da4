use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while turning an image source into a displayable bitmap.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("image {path} has zero size")]
    Empty { path: PathBuf },
}
