//! Source image inspection.

use crate::alpha::has_alpha_channel;
use crate::error::{Result, ScaleCraftError};
use crate::orientation::{read_orientation, Orientation};
use image::GenericImageView;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What a source file looks like before any processing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceInfo {
    /// Stored width in pixels
    pub width: u32,
    /// Stored height in pixels
    pub height: u32,
    /// Detected container format, lowercase
    pub format: String,
    /// EXIF orientation (normal when absent)
    pub orientation: Orientation,
    /// Whether the decoded image has an alpha channel
    pub has_alpha: bool,
    /// File size in bytes
    pub size_bytes: usize,
}

impl SourceInfo {
    /// Dimensions once the orientation has been applied.
    pub fn oriented_dimensions(&self) -> (u32, u32) {
        if self.orientation.swaps_dimensions() {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        }
    }

    /// Calculate aspect ratio (width / height) of the upright image.
    pub fn aspect_ratio(&self) -> f64 {
        let (w, h) = self.oriented_dimensions();
        f64::from(w) / f64::from(h)
    }

    /// Check if the upright image is landscape.
    pub fn is_landscape(&self) -> bool {
        let (w, h) = self.oriented_dimensions();
        w > h
    }

    /// Check if the upright image is portrait.
    pub fn is_portrait(&self) -> bool {
        let (w, h) = self.oriented_dimensions();
        h > w
    }

    /// Check if image is square.
    pub fn is_square(&self) -> bool {
        self.width == self.height
    }
}

/// Inspect an image file without transforming it.
pub fn inspect(path: impl AsRef<Path>) -> Result<SourceInfo> {
    let path = path.as_ref();
    let data = std::fs::read(path)
        .map_err(|e| ScaleCraftError::decode(path, image::ImageError::IoError(e)))?;
    inspect_bytes(&data).map_err(|e| match e {
        ScaleCraftError::Decode { source, .. } => ScaleCraftError::decode(path, source),
        other => other,
    })
}

/// Inspect in-memory image data.
pub fn inspect_bytes(data: &[u8]) -> Result<SourceInfo> {
    let format =
        image::guess_format(data).map_err(|e| ScaleCraftError::decode("<memory>", e))?;
    let img = image::load_from_memory_with_format(data, format)
        .map_err(|e| ScaleCraftError::decode("<memory>", e))?;
    let (width, height) = img.dimensions();

    Ok(SourceInfo {
        width,
        height,
        format: format!("{:?}", format).to_lowercase(),
        orientation: read_orientation(data),
        has_alpha: has_alpha_channel(&img),
        size_bytes: data.len(),
    })
}
