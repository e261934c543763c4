//! Error types for the scalecraft crate.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for scalecraft operations.
pub type Result<T> = std::result::Result<T, ScaleCraftError>;

/// Errors that can occur while loading, transforming or saving an image.
#[derive(Debug, Error)]
pub enum ScaleCraftError {
    /// The source file is missing, unreadable or not a supported image
    #[error("Failed to decode image {path}: {source}")]
    Decode {
        /// Source path
        path: PathBuf,
        /// Underlying decoder error
        #[source]
        source: image::ImageError,
    },

    /// Argument outside its accepted range
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Directory creation or file write failed
    #[error("Failed to write {path}: {source}")]
    Write {
        /// Destination path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Encoder error
    #[error("Encoding error: {0}")]
    Encode(#[source] image::ImageError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ScaleCraftError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub(crate) fn decode(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self::Decode {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Whether the error was raised by argument validation, before any side effect.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}
