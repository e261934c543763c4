//! EXIF orientation handling.
//!
//! Rotations in the table below are counter-clockwise; the `image` crate
//! rotates clockwise, so `rotate90()` here is a 270° counter-clockwise turn.
//!
//! | tag | transform                              |
//! |-----|----------------------------------------|
//! | 1   | none                                   |
//! | 2   | flip horizontal                        |
//! | 3   | rotate 180°                            |
//! | 4   | flip vertical                          |
//! | 5   | flip horizontal, then rotate 90° CCW   |
//! | 6   | rotate 270° CCW                        |
//! | 7   | flip horizontal, then rotate 270° CCW  |
//! | 8   | rotate 90° CCW                         |

use image::DynamicImage;
use serde::{Deserialize, Serialize};
use std::io::Cursor;

/// The eight EXIF orientations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// 1: stored upright
    #[default]
    Normal,
    /// 2: mirrored left to right
    FlipHorizontal,
    /// 3: upside down
    Rotate180,
    /// 4: mirrored top to bottom
    FlipVertical,
    /// 5: mirrored along the main diagonal
    Transpose,
    /// 6: needs a quarter turn clockwise
    Rotate90,
    /// 7: mirrored along the anti-diagonal
    Transverse,
    /// 8: needs a quarter turn counter-clockwise
    Rotate270,
}

impl Orientation {
    /// Convert a raw tag value. Returns `None` outside 1..=8.
    pub fn from_exif(value: u32) -> Option<Self> {
        match value {
            1 => Some(Self::Normal),
            2 => Some(Self::FlipHorizontal),
            3 => Some(Self::Rotate180),
            4 => Some(Self::FlipVertical),
            5 => Some(Self::Transpose),
            6 => Some(Self::Rotate90),
            7 => Some(Self::Transverse),
            8 => Some(Self::Rotate270),
            _ => None,
        }
    }

    /// Raw tag value.
    pub fn to_exif(self) -> u32 {
        match self {
            Self::Normal => 1,
            Self::FlipHorizontal => 2,
            Self::Rotate180 => 3,
            Self::FlipVertical => 4,
            Self::Transpose => 5,
            Self::Rotate90 => 6,
            Self::Transverse => 7,
            Self::Rotate270 => 8,
        }
    }

    /// Whether applying this orientation swaps width and height.
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Self::Transpose | Self::Rotate90 | Self::Transverse | Self::Rotate270
        )
    }

    /// Apply the corrective transform so the image displays upright.
    pub fn apply(self, img: DynamicImage) -> DynamicImage {
        match self {
            Self::Normal => img,
            Self::FlipHorizontal => img.fliph(),
            Self::Rotate180 => img.rotate180(),
            Self::FlipVertical => img.flipv(),
            Self::Transpose => img.fliph().rotate270(),
            Self::Rotate90 => img.rotate90(),
            Self::Transverse => img.fliph().rotate90(),
            Self::Rotate270 => img.rotate270(),
        }
    }
}

/// Read the orientation tag from raw file bytes.
///
/// Missing or unreadable metadata and out-of-range values all yield
/// [`Orientation::Normal`].
pub fn read_orientation(data: &[u8]) -> Orientation {
    read_tag(data)
        .and_then(Orientation::from_exif)
        .unwrap_or_default()
}

fn read_tag(data: &[u8]) -> Option<u32> {
    let mut cursor = Cursor::new(data);
    let exif = exif::Reader::new().read_from_container(&mut cursor).ok()?;
    let field = exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)?;
    field.value.get_uint(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn sample() -> DynamicImage {
        // 3x2 with distinct pixels
        let mut img = RgbImage::new(3, 2);
        for (x, y, p) in img.enumerate_pixels_mut() {
            *p = Rgb([(x * 10) as u8, (y * 10) as u8, 0]);
        }
        DynamicImage::ImageRgb8(img)
    }

    fn px(img: &DynamicImage, x: u32, y: u32) -> [u8; 3] {
        img.to_rgb8().get_pixel(x, y).0
    }

    #[test]
    fn test_from_exif() {
        assert_eq!(Orientation::from_exif(1), Some(Orientation::Normal));
        assert_eq!(Orientation::from_exif(6), Some(Orientation::Rotate90));
        assert_eq!(Orientation::from_exif(8), Some(Orientation::Rotate270));
        assert_eq!(Orientation::from_exif(0), None);
        assert_eq!(Orientation::from_exif(9), None);
    }

    #[test]
    fn test_exif_values_are_stable() {
        for value in 1..=8 {
            let orientation = Orientation::from_exif(value).unwrap();
            assert_eq!(orientation.to_exif(), value);
        }
    }

    #[test]
    fn test_swaps_dimensions() {
        for value in 1..=8 {
            let orientation = Orientation::from_exif(value).unwrap();
            let out = orientation.apply(sample());
            let swapped = (out.width(), out.height()) == (2, 3);
            assert_eq!(orientation.swaps_dimensions(), swapped, "tag {value}");
        }
    }

    #[test]
    fn test_rotate90_moves_bottom_left_to_top_left() {
        let out = Orientation::Rotate90.apply(sample());
        assert_eq!((out.width(), out.height()), (2, 3));
        // bottom-left (0,1) of the source becomes top-left
        assert_eq!(px(&out, 0, 0), [0, 10, 0]);
    }

    #[test]
    fn test_transpose_mirrors_main_diagonal() {
        let src = sample();
        let out = Orientation::Transpose.apply(src.clone());
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(px(&out, y, x), px(&src, x, y));
            }
        }
    }

    #[test]
    fn test_transverse_mirrors_anti_diagonal() {
        let src = sample();
        let out = Orientation::Transverse.apply(src.clone());
        // (x, y) in a w*h image lands at (h-1-y, w-1-x)
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(px(&out, 1 - y, 2 - x), px(&src, x, y));
            }
        }
    }

    #[test]
    fn test_read_orientation_without_exif() {
        assert_eq!(read_orientation(&[]), Orientation::Normal);
        assert_eq!(read_orientation(b"not an image"), Orientation::Normal);
    }
}
