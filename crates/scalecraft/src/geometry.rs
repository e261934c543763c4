//! Target dimension calculation for `scale` and `resize`.

use crate::error::{Result, ScaleCraftError};

/// Dimensions after multiplying both sides by `factor`, floored.
///
/// # Example
/// ```
/// use scalecraft::geometry::scaled_dimensions;
///
/// assert_eq!(scaled_dimensions(200, 100, 0.5).unwrap(), (100, 50));
/// assert_eq!(scaled_dimensions(3, 3, 0.5).unwrap(), (1, 1));
/// assert!(scaled_dimensions(200, 100, 0.0).is_err());
/// ```
pub fn scaled_dimensions(width: u32, height: u32, factor: f64) -> Result<(u32, u32)> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(ScaleCraftError::invalid(format!(
            "Scale factor must be a positive finite number, got {factor}"
        )));
    }

    checked_dimensions(width, height, factor)
}

/// Dimensions that fit within `max_width` x `max_height` while keeping the
/// aspect ratio, or `None` if the image already fits.
///
/// # Example
/// ```
/// use scalecraft::geometry::fit_dimensions;
///
/// assert_eq!(fit_dimensions(800, 600, 400, 400).unwrap(), Some((400, 300)));
/// assert_eq!(fit_dimensions(300, 200, 400, 400).unwrap(), None);
/// ```
pub fn fit_dimensions(
    width: u32,
    height: u32,
    max_width: u32,
    max_height: u32,
) -> Result<Option<(u32, u32)>> {
    if width <= max_width && height <= max_height {
        return Ok(None);
    }

    let ratio = f64::min(
        f64::from(max_width) / f64::from(width),
        f64::from(max_height) / f64::from(height),
    );

    checked_dimensions(width, height, ratio).map(Some)
}

fn checked_dimensions(width: u32, height: u32, factor: f64) -> Result<(u32, u32)> {
    let new_width = (f64::from(width) * factor).floor();
    let new_height = (f64::from(height) * factor).floor();

    if new_width < 1.0 || new_height < 1.0 {
        return Err(ScaleCraftError::invalid(format!(
            "Target size {new_width}x{new_height} for a {width}x{height} image is empty"
        )));
    }
    if new_width > f64::from(u32::MAX) || new_height > f64::from(u32::MAX) {
        return Err(ScaleCraftError::invalid(format!(
            "Target size {new_width}x{new_height} is too large"
        )));
    }

    Ok((new_width as u32, new_height as u32))
}
