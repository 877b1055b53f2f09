use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn a file into a source image.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("image file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModeError {
    #[error("fixed selection size must be non-zero, got {width}x{height}")]
    EmptyFixedSize { width: u32, height: u32 },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid highlight color {0:?}, expected #rrggbb")]
    InvalidColor(String),

    #[error(transparent)]
    InvalidFixedSize(#[from] ModeError),
}
