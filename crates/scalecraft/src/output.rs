//! Encoding and writing processed images.

use crate::error::{Result, ScaleCraftError};
use image::{DynamicImage, ImageOutputFormat};
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use std::path::Path;

/// Highest accepted quality value.
pub const MAX_QUALITY: u8 = 100;

/// Formats a processor can save to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JPEG image
    #[default]
    Jpeg,
    /// PNG image
    Png,
}

impl OutputFormat {
    /// File extension written for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
        }
    }

    /// Get the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
        }
    }

    /// Infer the format from a destination path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match image::ImageFormat::from_path(path).ok()? {
            image::ImageFormat::Jpeg => Some(OutputFormat::Jpeg),
            image::ImageFormat::Png => Some(OutputFormat::Png),
            _ => None,
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = ScaleCraftError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(OutputFormat::Jpeg),
            "png" => Ok(OutputFormat::Png),
            other => Err(ScaleCraftError::invalid(format!(
                "Unsupported output format: {other}"
            ))),
        }
    }
}

/// Check that `quality` lies in `0..=100`.
pub fn validate_quality(quality: u8) -> Result<u8> {
    if quality > MAX_QUALITY {
        return Err(ScaleCraftError::invalid(format!(
            "Quality must be between 0 and {MAX_QUALITY}, got {quality}"
        )));
    }
    Ok(quality)
}

/// Encode an image to bytes.
///
/// `quality` drives the JPEG quantizer. PNG is lossless and ignores it.
pub fn encode(img: &DynamicImage, format: OutputFormat, quality: u8) -> Result<Vec<u8>> {
    let quality = validate_quality(quality)?;
    let mut buffer = Cursor::new(Vec::new());

    let output_format = match format {
        OutputFormat::Jpeg => ImageOutputFormat::Jpeg(quality),
        OutputFormat::Png => ImageOutputFormat::Png,
    };

    img.write_to(&mut buffer, output_format)
        .map_err(ScaleCraftError::Encode)?;
    Ok(buffer.into_inner())
}

/// Write encoded bytes to `path`, optionally creating missing parent directories.
///
/// The write is not atomic; a failure part-way can leave a truncated file.
pub fn write_bytes(path: &Path, bytes: &[u8], create_dirs: bool) -> Result<()> {
    if create_dirs {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ScaleCraftError::write(parent, e))?;
        }
    }

    std::fs::write(path, bytes).map_err(|e| ScaleCraftError::write(path, e))
}
